//! Classifier loading and prediction.
//!
//! The model side of the pipeline is deliberately thin: a pretrained
//! artifact is loaded from a named path and evaluated on a flattened
//! feature vector, returning the raw output array with no thresholding
//! or labeling. The [`Classifier`] trait is the seam that keeps the
//! artifact format out of the extraction logic.
//!
//! [`DenseModel`] is the built-in backend: a JSON description of a stack
//! of dense layers exported from the training pipeline. Its internals
//! are an external contract; this module only validates shapes and
//! evaluates.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{HamusError, Result};

/// Capability interface for pretrained classifiers.
///
/// Implementations map a flattened feature vector to the model's raw
/// output array, unmodified. Callers interpret the output themselves.
pub trait Classifier {
    /// Runs the model on a single feature vector.
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>>;
}

/// Activation function applied after a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Identity.
    Linear,
    /// `max(0, x)` per unit.
    Relu,
    /// Logistic sigmoid per unit.
    Sigmoid,
    /// Normalized exponentials over the layer.
    Softmax,
}

impl Activation {
    fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => {
                for v in values.iter_mut() {
                    *v = v.max(0.0);
                }
            }
            Activation::Sigmoid => {
                for v in values.iter_mut() {
                    *v = 1.0 / (1.0 + (-*v).exp());
                }
            }
            Activation::Softmax => {
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let mut sum = 0.0;
                for v in values.iter_mut() {
                    *v = (*v - max).exp();
                    sum += *v;
                }
                if sum > 0.0 {
                    for v in values.iter_mut() {
                        *v /= sum;
                    }
                }
            }
        }
    }
}

/// One dense layer of the artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayer {
    /// Row-major weight matrix, one row per output unit.
    weights: Vec<Vec<f32>>,
    /// Bias vector, one entry per output unit.
    bias: Vec<f32>,
    /// Activation applied to the layer's output.
    activation: Activation,
}

impl DenseLayer {
    fn output_width(&self) -> usize {
        self.weights.len()
    }

    fn input_width(&self) -> usize {
        self.weights.first().map(|row| row.len()).unwrap_or(0)
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut output: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias)
            .collect();
        self.activation.apply(&mut output);
        output
    }
}

/// A pretrained dense network loaded from a JSON artifact.
///
/// # Example
///
/// ```no_run
/// use hamus_core::classifier::{Classifier, DenseModel};
///
/// let model = DenseModel::from_file("phishing_model.json")?;
/// let prediction = model.predict(&[0.0; 20])?;
/// println!("raw output: {:?}", prediction);
/// # Ok::<(), hamus_core::HamusError>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DenseModel {
    layers: Vec<DenseLayer>,
}

impl DenseModel {
    /// Loads and validates an artifact from a path.
    ///
    /// # Errors
    ///
    /// Returns [`HamusError::ModelLoad`] when the file cannot be read,
    /// does not deserialize, or is internally inconsistent.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| HamusError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let model: Self = serde_json::from_str(&raw).map_err(|e| HamusError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        model.validate().map_err(|reason| HamusError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(model)
    }

    /// Number of layers in the artifact.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Width of the feature vector the model expects.
    pub fn input_width(&self) -> usize {
        self.layers.first().map(DenseLayer::input_width).unwrap_or(0)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.layers.is_empty() {
            return Err("artifact has no layers".to_string());
        }

        let mut width = self.layers[0].input_width();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(format!("layer {} has no units", i));
            }
            if layer.weights.iter().any(|row| row.len() != width) {
                return Err(format!("layer {} expects {} inputs", i, width));
            }
            if layer.bias.len() != layer.output_width() {
                return Err(format!(
                    "layer {} has {} units but {} biases",
                    i,
                    layer.output_width(),
                    layer.bias.len()
                ));
            }
            width = layer.output_width();
        }

        Ok(())
    }
}

impl Classifier for DenseModel {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>> {
        let expected = self.input_width();
        if features.len() != expected {
            return Err(HamusError::ShapeMismatch { expected, got: features.len() });
        }

        let mut values = features.to_vec();
        for layer in &self.layers {
            values = layer.forward(&values);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn single_layer_model(activation: &str) -> DenseModel {
        let body = format!(
            r#"{{"layers":[{{"weights":[[1.0,0.0],[0.0,2.0]],"bias":[0.5,-1.0],"activation":"{}"}}]}}"#,
            activation
        );
        serde_json::from_str(&body).unwrap()
    }

    #[test]
    fn test_linear_layer_output_is_raw() {
        let model = single_layer_model("linear");
        let output = model.predict(&[3.0, 4.0]).unwrap();
        assert_eq!(output, vec![3.5, 7.0]);
    }

    #[test]
    fn test_relu_clamps_negatives() {
        let model = single_layer_model("relu");
        let output = model.predict(&[-3.0, 0.0]).unwrap();
        assert_eq!(output, vec![0.0, 0.0]);
    }

    #[test]
    fn test_sigmoid_bounds() {
        let model = single_layer_model("sigmoid");
        let output = model.predict(&[10.0, -10.0]).unwrap();
        assert!(output[0] > 0.9);
        assert!(output[1] < 0.1);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let model = single_layer_model("softmax");
        let output = model.predict(&[1.0, 2.0]).unwrap();
        let sum: f32 = output.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = single_layer_model("linear");
        let result = model.predict(&[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(HamusError::ShapeMismatch { expected: 2, got: 3 })));
    }

    #[test]
    fn test_two_layer_network() {
        let body = r#"{
            "layers": [
                {"weights": [[1.0, 1.0], [1.0, -1.0]], "bias": [0.0, 0.0], "activation": "relu"},
                {"weights": [[1.0, 1.0]], "bias": [0.0], "activation": "linear"}
            ]
        }"#;
        let model: DenseModel = serde_json::from_str(body).unwrap();
        assert!(model.validate().is_ok());
        assert_eq!(model.layer_count(), 2);

        // [2, 3] -> relu([5, -1]) = [5, 0] -> [5]
        let output = model.predict(&[2.0, 3.0]).unwrap();
        assert_eq!(output, vec![5.0]);
    }

    #[test]
    fn test_validate_rejects_ragged_weights() {
        let body = r#"{"layers":[{"weights":[[1.0,2.0],[3.0]],"bias":[0.0,0.0],"activation":"linear"}]}"#;
        let model: DenseModel = serde_json::from_str(body).unwrap();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bias_mismatch() {
        let body = r#"{"layers":[{"weights":[[1.0,2.0]],"bias":[0.0,0.0],"activation":"linear"}]}"#;
        let model: DenseModel = serde_json::from_str(body).unwrap();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let result = DenseModel::from_file("/nonexistent/model.json");
        assert!(matches!(result, Err(HamusError::ModelLoad { .. })));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"layers":[{{"weights":[[0.5,0.5]],"bias":[0.0],"activation":"sigmoid"}}]}}"#
        )
        .unwrap();

        let model = DenseModel::from_file(file.path()).unwrap();
        assert_eq!(model.input_width(), 2);
        let output = model.predict(&[1.0, 1.0]).unwrap();
        assert!(output[0] > 0.5);
    }

    #[test]
    fn test_from_file_rejects_invalid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let result = DenseModel::from_file(file.path());
        assert!(matches!(result, Err(HamusError::ModelLoad { .. })));
    }
}
