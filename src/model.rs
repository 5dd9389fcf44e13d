//! Classifier artifacts.
//!
//! An artifact is loaded once and then only read. Two formats are supported,
//! picked by file extension: ONNX graphs run through `tract-onnx`, and a JSON
//! multinomial logistic model.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tract_onnx::prelude::*;

use crate::encoder::FeatureVector;
use crate::errors::{PricerError, PricerResult};
use crate::schema::{FEATURE_COUNT, TRAIN_FEATURES};

/// A loaded classifier. Implementations are immutable after construction.
pub trait Classifier: Send + Sync {
    /// Class id predicted for one feature vector.
    fn classify(&self, features: &FeatureVector) -> PricerResult<i64>;

    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Per-class probabilities, for models that expose them.
    fn probabilities(&self, _features: &FeatureVector) -> Option<Vec<f64>> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Onnx,
    LinearJson,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> PricerResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("onnx") => Ok(ArtifactFormat::Onnx),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ArtifactFormat::LinearJson),
            _ => Err(PricerError::model_load(
                path.display().to_string(),
                "unsupported artifact format, expected .onnx or .json",
            )),
        }
    }
}

/// Load the artifact at `path` in whichever format its extension names.
pub fn load_classifier(path: &Path) -> PricerResult<Box<dyn Classifier>> {
    let classifier: Box<dyn Classifier> = match ArtifactFormat::from_path(path)? {
        ArtifactFormat::Onnx => Box::new(OnnxClassifier::load(path)?),
        ArtifactFormat::LinearJson => Box::new(LinearClassifier::load(path)?),
    };
    tracing::info!(
        path = %path.display(),
        model = classifier.name(),
        "Loaded classifier artifact"
    );
    Ok(classifier)
}

/// Weights of a multinomial logistic model, one row per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearWeights {
    pub labels: Vec<i64>,
    pub intercepts: Vec<f64>,
    pub coefficients: Vec<Vec<f64>>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LinearWeights {
    fn validate(&self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("model has no classes".to_string());
        }
        if self.intercepts.len() != self.labels.len()
            || self.coefficients.len() != self.labels.len()
        {
            return Err(format!(
                "class count mismatch: {} labels, {} intercepts, {} coefficient rows",
                self.labels.len(),
                self.intercepts.len(),
                self.coefficients.len()
            ));
        }
        if let Some(row) = self.coefficients.iter().find(|r| r.len() != FEATURE_COUNT) {
            return Err(format!(
                "expected {FEATURE_COUNT} coefficients per class, found {}",
                row.len()
            ));
        }
        if let Some(names) = &self.feature_names {
            if !names.iter().map(String::as_str).eq(TRAIN_FEATURES.iter().copied()) {
                return Err("feature names do not match the training schema".to_string());
            }
        }
        Ok(())
    }
}

/// Multinomial logistic classifier read from JSON weights.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: LinearWeights,
}

impl LinearClassifier {
    pub fn new(weights: LinearWeights) -> PricerResult<Self> {
        weights
            .validate()
            .map_err(|message| PricerError::model_load("<in-memory>", message))?;
        Ok(Self { weights })
    }

    pub fn load(path: &Path) -> PricerResult<Self> {
        let location = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| PricerError::model_load(&location, e.to_string()))?;
        let weights: LinearWeights = serde_json::from_str(&content)
            .map_err(|e| PricerError::model_load(&location, format!("invalid weights: {e}")))?;
        weights
            .validate()
            .map_err(|message| PricerError::model_load(&location, message))?;
        Ok(Self { weights })
    }

    fn scores(&self, features: &FeatureVector) -> Vec<f64> {
        self.weights
            .intercepts
            .iter()
            .zip(self.weights.coefficients.iter())
            .map(|(bias, row)| {
                bias + row
                    .iter()
                    .zip(features.as_slice())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn classify(&self, features: &FeatureVector) -> PricerResult<i64> {
        let scores = self.scores(features);
        let best = argmax(scores.iter().copied())
            .ok_or_else(|| PricerError::inference("linear model produced no scores"))?;
        Ok(self.weights.labels[best])
    }

    fn name(&self) -> &str {
        "linear_json"
    }

    /// Softmax over the class scores, in label order.
    fn probabilities(&self, features: &FeatureVector) -> Option<Vec<f64>> {
        let scores = self.scores(features);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Some(exps.into_iter().map(|e| e / total).collect())
    }
}

/// ONNX graph compiled once into a runnable `tract` plan.
pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> PricerResult<Self> {
        let location = path.display().to_string();
        if !path.is_file() {
            return Err(PricerError::model_load(&location, "artifact file not found"));
        }
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| PricerError::model_load(&location, format!("{e:#}")))?;
        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, features: &FeatureVector) -> PricerResult<i64> {
        let values = features.to_f32();
        let input = Tensor::from_shape(&[1, FEATURE_COUNT], values.as_slice())
            .map_err(|e| PricerError::inference(format!("{e:#}")))?;
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PricerError::inference(format!("{e:#}")))?;
        let output = outputs
            .first()
            .ok_or_else(|| PricerError::inference("model produced no outputs"))?;

        // Label tensors come out as int64; score tensors get an argmax.
        if let Ok(labels) = output.to_array_view::<i64>() {
            return labels
                .iter()
                .next()
                .copied()
                .ok_or_else(|| PricerError::inference("empty label tensor"));
        }
        let scores = output
            .to_array_view::<f32>()
            .map_err(|e| PricerError::inference(format!("{e:#}")))?;
        argmax(scores.iter().map(|s| f64::from(*s)))
            .map(|i| i as i64)
            .ok_or_else(|| PricerError::inference("empty score tensor"))
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

// First index wins on ties, matching numpy's argmax.
fn argmax(values: impl Iterator<Item = f64>) -> Option<usize> {
    values
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, top)) if v <= top => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
