//! Library root for the `beverage_pricer` crate
//!
//! Survey answers go through the [`encoder`] into a fixed 37-column vector,
//! which the [`predictor`] hands to a pre-trained classifier to pick one of
//! four price ranges.

// Core error handling
pub mod errors;

// Survey input and feature engineering
pub mod category;
pub mod encoder;
pub mod schema;
pub mod survey;

// Classifier artifacts and prediction
pub mod model;
pub mod predictor;

// Configuration & logging
pub mod config_loader;
pub mod log_sink;

pub use config_loader::{load_config, load_config_from, PricerConfig};
pub use encoder::{encode, Encoder, FeatureVector};
pub use errors::{PricerError, PricerResult};
pub use model::{load_classifier, Classifier, LinearClassifier, LinearWeights, OnnxClassifier};
pub use predictor::{init, predict, PriceRange, Predictor};
pub use survey::SurveyResponse;
