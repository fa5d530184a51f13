use std::fmt::Display;

use serde_json::Value;
use thiserror::Error;

pub const CONNECTION_MESSAGE: &str = "No se pudo conectar con el servidor. Inténtalo de nuevo.";
pub const NOT_FOUND_MESSAGE: &str = "El juego ya no existe.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// No usable answer: network failure, server error, or a body we can't decode.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("not found")]
    NotFound,
}

impl ApiError {
    /// Text shown to the user. Backend validation messages are passed through untouched.
    pub fn user_message(&self) -> String {
        return match self {
            ApiError::Transport(_) => CONNECTION_MESSAGE.to_string(),
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
        };
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        return ApiError::Transport(err.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// `None` for errors not tied to a single field.
    pub field: Option<String>,
    pub messages: Vec<String>,
}

/// Error messages from a rejected create or update, as the backend worded them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

const NON_FIELD_KEYS: [&str; 3] = ["non_field_errors", "detail", "error"];

fn messages_of(value: &Value) -> Vec<String> {
    return match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        Value::Object(map) => map.values().flat_map(messages_of).collect(),
        Value::Null => vec![],
        other => vec![other.to_string()],
    };
}

impl ValidationErrors {
    pub fn from_body(body: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            let body = body.trim();
            if body.is_empty() {
                return Self::default();
            }

            return Self {
                errors: vec![FieldError {
                    field: None,
                    messages: vec![body.to_string()],
                }],
            };
        };

        // The wrapped form carries a generic `error` headline next to the real `detail`.
        let skip_headline = map.contains_key("error") && map.contains_key("detail");

        let mut errors = vec![];
        for (key, value) in map.iter() {
            if skip_headline && key == "error" {
                continue;
            }

            let messages = messages_of(value);
            if messages.is_empty() {
                continue;
            }

            let field = if NON_FIELD_KEYS.contains(&key.as_str()) {
                None
            } else {
                Some(key.clone())
            };

            errors.push(FieldError { field, messages });
        }

        return Self { errors };
    }

    pub fn field(&self, name: &str) -> Option<&FieldError> {
        return self
            .errors
            .iter()
            .find(|e| e.field.as_deref() == Some(name));
    }

    pub fn is_empty(&self) -> bool {
        return self.errors.is_empty();
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "El servidor rechazó los datos enviados.");
        }

        let lines: Vec<String> = self
            .errors
            .iter()
            .map(|e| match &e.field {
                Some(field) => format!("{field}: {}", e.messages.join(" ")),
                None => e.messages.join(" "),
            })
            .collect();

        return write!(f, "{}", lines.join(" "));
    }
}
