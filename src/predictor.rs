//! Price-range predictor.
//!
//! A [`Predictor`] owns one loaded classifier and turns survey responses into
//! [`PriceRange`] labels. The process-wide instance is created by [`init`]
//! exactly once; concurrent first callers wait on the same load and everyone
//! afterwards shares the read-only result.

use lazy_static::lazy_static;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use crate::config_loader::PricerConfig;
use crate::encoder::Encoder;
use crate::errors::{PricerError, PricerResult, SafeLock};
use crate::model::{self, Classifier};
use crate::survey::SurveyResponse;

/// Price band predicted for a respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceRange {
    From50To100,
    From100To150,
    From150To200,
    From200To250,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::From50To100,
        PriceRange::From100To150,
        PriceRange::From150To200,
        PriceRange::From200To250,
    ];

    pub fn from_class_id(class_id: i64) -> PricerResult<Self> {
        match class_id {
            0 => Ok(PriceRange::From50To100),
            1 => Ok(PriceRange::From100To150),
            2 => Ok(PriceRange::From150To200),
            3 => Ok(PriceRange::From200To250),
            _ => Err(PricerError::UnknownClass { class_id }),
        }
    }

    pub fn class_id(self) -> i64 {
        match self {
            PriceRange::From50To100 => 0,
            PriceRange::From100To150 => 1,
            PriceRange::From150To200 => 2,
            PriceRange::From200To250 => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceRange::From50To100 => "₹50 - ₹100",
            PriceRange::From100To150 => "₹100 - ₹150",
            PriceRange::From150To200 => "₹150 - ₹200",
            PriceRange::From200To250 => "₹200 - ₹250",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct Predictor {
    classifier: Box<dyn Classifier>,
    encoder: Encoder,
}

impl Predictor {
    /// Load the artifact named by `config`.
    pub fn load(config: &PricerConfig) -> PricerResult<Self> {
        let classifier = model::load_classifier(&config.model_path).map_err(|e| {
            tracing::error!(path = %config.model_path.display(), error = %e, "Model load failed");
            e
        })?;
        Ok(Self::with_classifier(classifier, Encoder::new(config.strict_schema)))
    }

    pub fn with_classifier(classifier: Box<dyn Classifier>, encoder: Encoder) -> Self {
        Self { classifier, encoder }
    }

    pub fn predict(&self, response: &SurveyResponse) -> PricerResult<PriceRange> {
        let features = self.encoder.encode(response)?;
        let class_id = self.classifier.classify(&features)?;
        if let Some(probabilities) = self.classifier.probabilities(&features) {
            tracing::debug!(?probabilities, "Class probabilities");
        }
        let range = PriceRange::from_class_id(class_id).map_err(|e| {
            tracing::error!(class_id, model = self.classifier.name(), "Classifier returned unknown class");
            e
        })?;
        tracing::info!(class_id, label = range.label(), "Predicted price range");
        Ok(range)
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }
}

static GLOBAL: OnceLock<Predictor> = OnceLock::new();

lazy_static! {
    static ref INIT_LOCK: Mutex<()> = Mutex::new(());
}

/// Load the process-wide predictor. Only the first successful call loads;
/// later calls return the same instance. A failed load leaves it unset.
pub fn init(config: &PricerConfig) -> PricerResult<&'static Predictor> {
    if let Some(predictor) = GLOBAL.get() {
        return Ok(predictor);
    }

    let _guard = INIT_LOCK.safe_lock()?;
    if let Some(predictor) = GLOBAL.get() {
        return Ok(predictor);
    }

    let predictor = Predictor::load(config)?;
    Ok(GLOBAL.get_or_init(|| predictor))
}

/// The process-wide predictor, if [`init`] has succeeded.
pub fn global() -> PricerResult<&'static Predictor> {
    GLOBAL.get().ok_or(PricerError::NotInitialized)
}

/// Predict with the process-wide predictor.
pub fn predict(response: &SurveyResponse) -> PricerResult<PriceRange> {
    global()?.predict(response)
}
