//! User routes
//!
//! Signup, login and the token-protected example route. The protected
//! route reads its token from `x-auth-token`.

use super::extract::ValidatedJson;
use crate::auth::{require_token, AuthUser, Claims, TokenGate};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use catalog_shared::{LoginRequest, MessageResponse, SignupRequest, TokenResponse};

/// Create user routes
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let gate = TokenGate::x_auth_token(state.tokens().clone());

    Router::new()
        .route(
            "/protected",
            get(protected).route_layer(middleware::from_fn_with_state(gate, require_token)),
        )
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /user/signup
async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    UserService::signup(state.users(), req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully.")),
    ))
}

/// Login with email and password
///
/// POST /user/login (also mounted at POST /product/login)
pub(crate) async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = UserService::login(state.users(), state.tokens(), req).await?;
    Ok(Json(TokenResponse { token }))
}

/// Echo the decoded claims of a valid token
///
/// GET /user/protected
async fn protected(auth: AuthUser) -> Json<Claims> {
    Json(auth.claims)
}
