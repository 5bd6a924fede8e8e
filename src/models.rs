use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote classification service, as entered by the user. Only checked for
/// non-emptiness; anything else is left to the network layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    pub host: String,
    pub port: String,
}

impl Endpoint {
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty() && !self.port.trim().is_empty()
    }

    pub fn predict_url(&self) -> String {
        format!("http://{}:{}/predict/", self.host.trim(), self.port.trim())
    }
}

/// The single captured photo. Lives in a temp directory and is overwritten
/// by the next capture; never persisted beyond the process.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub local_uri: PathBuf,
    pub mime_type: &'static str,
    pub file_name: String,
}

impl CapturedImage {
    pub fn jpeg(local_uri: PathBuf) -> Self {
        Self {
            local_uri,
            mime_type: "image/jpeg",
            file_name: "foto.jpg".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f64,
}

/// Response body of `POST /predict/`. Parsed strictly at the network
/// boundary; a body that does not match this shape is a transport error.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<Prediction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_url_builds_from_host_and_port() {
        let endpoint = Endpoint {
            host: "192.168.1.10".into(),
            port: "8000".into(),
        };
        assert_eq!(endpoint.predict_url(), "http://192.168.1.10:8000/predict/");
    }

    #[test]
    fn endpoint_with_blank_field_is_incomplete() {
        let endpoint = Endpoint {
            host: "  ".into(),
            port: "8000".into(),
        };
        assert!(!endpoint.is_complete());
        assert!(!Endpoint::default().is_complete());
    }

    #[test]
    fn response_parses_ranked_predictions() {
        let body = r#"{"predictions":[{"class_name":"cat","probability":0.87},{"class_name":"dog","probability":0.1}]}"#;
        let parsed: PredictResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.predictions.len(), 2);
        assert_eq!(parsed.predictions[0].class_name, "cat");
        assert_eq!(parsed.predictions[0].probability, 0.87);
    }

    #[test]
    fn response_with_missing_fields_is_rejected() {
        let body = r#"{"predictions":[{"class_name":"cat"}]}"#;
        assert!(serde_json::from_str::<PredictResponse>(body).is_err());
        assert!(serde_json::from_str::<PredictResponse>(r#"{"results":[]}"#).is_err());
    }
}
