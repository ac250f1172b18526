//! Declarative request validation
//!
//! A [`Schema`] is an ordered list of field rules checked against a raw JSON
//! payload before it is deserialized. Validation stops at the first failing
//! field so callers get exactly one message back, phrased the way API
//! clients of this service have always seen them (`"email" must be a valid
//! email`).

use serde_json::{Map, Value};
use std::fmt;
use validator::ValidateEmail;

/// Minimum password length accepted at signup and login
pub const MIN_PASSWORD_LEN: usize = 6;

/// JSON type a field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
}

/// Rule for a single payload field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub email: bool,
    pub min_len: Option<usize>,
}

impl FieldRule {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            email: false,
            min_len: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn email(self) -> Self {
        Self {
            email: true,
            ..self
        }
    }

    pub const fn min_len(self, len: usize) -> Self {
        Self {
            min_len: Some(len),
            ..self
        }
    }

    fn check(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        let value = match value {
            Some(value) => value,
            None if self.required => return Err(self.error("is required")),
            None => return Ok(()),
        };

        match self.kind {
            FieldKind::String => {
                let s = value
                    .as_str()
                    .ok_or_else(|| self.error("must be a string"))?;
                if s.is_empty() {
                    return Err(self.error("is not allowed to be empty"));
                }
                if let Some(min) = self.min_len {
                    if s.chars().count() < min {
                        return Err(self.error(&format!(
                            "length must be at least {} characters long",
                            min
                        )));
                    }
                }
                if self.email && !is_valid_email(s) {
                    return Err(self.error("must be a valid email"));
                }
            }
            FieldKind::Number => {
                if !value.is_number() {
                    return Err(self.error("must be a number"));
                }
            }
            FieldKind::Integer => {
                if !value.is_number() {
                    return Err(self.error("must be a number"));
                }
                if !(value.is_i64() || value.is_u64()) {
                    return Err(self.error("must be an integer"));
                }
            }
        }

        Ok(())
    }

    fn error(&self, message: &str) -> ValidationError {
        ValidationError::new(self.name, message)
    }
}

/// Ordered set of field rules for one payload shape
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
    /// Whether keys without a rule are tolerated
    pub allow_unknown: bool,
}

impl Schema {
    pub const fn strict(fields: &'static [FieldRule]) -> Self {
        Self {
            fields,
            allow_unknown: false,
        }
    }

    pub const fn lenient(fields: &'static [FieldRule]) -> Self {
        Self {
            fields,
            allow_unknown: true,
        }
    }

    /// Validate a payload, returning the first failure
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        let object = payload
            .as_object()
            .ok_or_else(|| ValidationError::new("value", "must be of type object"))?;

        for rule in self.fields {
            rule.check(object.get(rule.name))?;
        }

        if !self.allow_unknown {
            self.reject_unknown(object)?;
        }

        Ok(())
    }

    fn reject_unknown(&self, object: &Map<String, Value>) -> Result<(), ValidationError> {
        match object
            .keys()
            .find(|key| !self.fields.iter().any(|rule| rule.name == key.as_str()))
        {
            Some(key) => Err(ValidationError::new(key, "is not allowed")),
            None => Ok(()),
        }
    }
}

/// Payload types that carry a validation schema
pub trait Validate {
    fn schema() -> Schema;
}

/// Signup: name, email and a password of at least six characters
pub const SIGNUP_SCHEMA: Schema = Schema::strict(&[
    FieldRule::string("name").required(),
    FieldRule::string("email").required().email(),
    FieldRule::string("password").required().min_len(MIN_PASSWORD_LEN),
]);

/// Login: email and password
pub const LOGIN_SCHEMA: Schema = Schema::strict(&[
    FieldRule::string("email").required().email(),
    FieldRule::string("password").required().min_len(MIN_PASSWORD_LEN),
]);

/// Product creation; extra keys are dropped by projection, not rejected
pub const NEW_PRODUCT_SCHEMA: Schema = Schema::lenient(&[
    FieldRule::string("name").required(),
    FieldRule::number("price").required(),
    FieldRule::integer("quantity"),
    FieldRule::string("image"),
]);

/// Partial product update
pub const PRODUCT_CHANGES_SCHEMA: Schema = Schema::lenient(&[
    FieldRule::string("name"),
    FieldRule::number("price"),
    FieldRule::integer("quantity"),
    FieldRule::string("image"),
]);

/// Email format check; a dotted domain is required on top of the
/// `validator` crate's syntax rules
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
