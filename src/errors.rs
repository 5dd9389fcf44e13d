//! Error handling for the beverage pricer
//!
//! Every fallible operation in the crate returns [`PricerResult`]. The three
//! request-level failures are `InvalidCategory` (bad survey answer),
//! `ModelLoad` (artifact unusable at startup) and `UnknownClass` (artifact
//! and label table disagree); the rest cover the ambient plumbing.

use thiserror::Error;

/// Main error type for the pricer
#[derive(Error, Debug)]
pub enum PricerError {
    #[error("Invalid category for {field}: '{value}'")]
    InvalidCategory { field: String, value: String },

    #[error("Feature column not in training schema: {column}")]
    UnknownColumn { column: String },

    #[error("Failed to load model artifact {path}: {message}")]
    ModelLoad { path: String, message: String },

    #[error("Model returned unknown class id: {class_id}")]
    UnknownClass { class_id: i64 },

    #[error("Inference failed: {message}")]
    Inference { message: String },

    #[error("Predictor has not been initialized")]
    NotInitialized,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Mutex lock failed: {resource}")]
    MutexPoisoned { resource: String },
}

/// Type alias for Result with PricerError
pub type PricerResult<T> = Result<T, PricerError>;

impl PricerError {
    /// Create an invalid category error
    pub fn invalid_category(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidCategory {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an unknown schema column error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Create a model load error
    pub fn model_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an inference error
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}

/// Poison-safe mutex locking that reports a [`PricerError`] instead of panicking.
pub trait SafeLock<T: ?Sized> {
    fn safe_lock(&self) -> PricerResult<std::sync::MutexGuard<'_, T>>;
}

impl<T: ?Sized> SafeLock<T> for std::sync::Mutex<T> {
    fn safe_lock(&self) -> PricerResult<std::sync::MutexGuard<'_, T>> {
        self.lock().map_err(|_| PricerError::MutexPoisoned {
            resource: "generic_mutex".to_string(),
        })
    }
}

impl From<figment::Error> for PricerError {
    fn from(err: figment::Error) -> Self {
        PricerError::config(err.to_string())
    }
}
