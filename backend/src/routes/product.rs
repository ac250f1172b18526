//! Product routes
//!
//! Reads are public. Writes require a raw token in the `Authorization`
//! header. The gate is bound to each write method, so any other method on a
//! product path falls through to `Product Not Found` without a token check.

use super::extract::ValidatedJson;
use crate::auth::{require_token, AuthUser, TokenGate};
use crate::error::{ApiError, ApiResult};
use crate::services::ProductService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use catalog_shared::{MessageResponse, NewProduct, Product, ProductChanges};
use tracing::debug;

/// Create product routes
pub fn product_routes(state: &AppState) -> Router<AppState> {
    let gate = TokenGate::authorization(state.tokens().clone());
    let auth = middleware::from_fn_with_state(gate, require_token);

    Router::new()
        .route("/all", get(list_products).fallback(unrouted))
        .route("/login", post(super::user::login).fallback(unrouted))
        .route(
            "/add",
            post(create_product)
                .route_layer(auth.clone())
                .fallback(unrouted),
        )
        .route(
            "/update/:id",
            put(update_product)
                .route_layer(auth.clone())
                .fallback(unrouted),
        )
        .route(
            "/delete/:id",
            delete(delete_product).route_layer(auth).fallback(unrouted),
        )
        .route("/:id", get(get_product).fallback(unrouted))
}

/// Methods a product path does not serve
async fn unrouted() -> ApiError {
    ApiError::product_not_found()
}

/// GET /product/all
async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = ProductService::list(state.products()).await?;
    Ok(Json(products))
}

/// GET /product/:id
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = ProductService::parse_id(&id)?;
    let product = ProductService::get(state.products(), id).await?;
    Ok(Json(product))
}

/// POST /product/add
///
/// Only the allow-listed fields of the body are kept.
async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(new_product): ValidatedJson<NewProduct>,
) -> ApiResult<Json<Product>> {
    debug!(email = %auth.email, "Creating product");
    let product = ProductService::create(state.products(), new_product).await?;
    Ok(Json(product))
}

/// PUT /product/update/:id
async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<ProductChanges>,
) -> ApiResult<Json<Product>> {
    debug!(email = %auth.email, product_id = %id, "Updating product");
    let id = ProductService::parse_id(&id)?;
    let product = ProductService::update(state.products(), id, changes).await?;
    Ok(Json(product))
}

/// DELETE /product/delete/:id
async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    debug!(email = %auth.email, product_id = %id, "Deleting product");
    let id = ProductService::parse_id(&id)?;
    ProductService::delete(state.products(), id).await?;
    Ok(Json(MessageResponse::new("Product Deleted")))
}
