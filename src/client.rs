use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::AppError;
use crate::models::{CapturedImage, Endpoint, PredictResponse, Prediction};

/// HTTP client for the remote classification service. One multipart POST
/// per submission, no timeout override, no retries, no cancellation path.
pub struct ClassificationClient {
    http: reqwest::Client,
}

impl ClassificationClient {
    pub fn new() -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Uploads the image as the single `file` field of a multipart body and
    /// parses the ranked predictions out of the response. The response
    /// shape is validated here; anything malformed, including an
    /// out-of-range probability, is a transport error.
    pub async fn predict(
        &self,
        endpoint: &Endpoint,
        image: &CapturedImage,
    ) -> Result<Vec<Prediction>, AppError> {
        let bytes = tokio::fs::read(&image.local_uri)
            .await
            .map_err(|e| AppError::Transport(format!("could not read {}: {e}", image.local_uri.display())))?;

        let part = Part::bytes(bytes)
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type)
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = endpoint.predict_url();
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.trim();
            return Err(AppError::Transport(if body.is_empty() {
                format!("server returned {status}")
            } else {
                format!("server returned {status}: {body}")
            }));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("malformed response: {e}")))?;

        if let Some(bad) = parsed
            .predictions
            .iter()
            .find(|p| !(0.0..=1.0).contains(&p.probability))
        {
            return Err(AppError::Transport(format!(
                "probability out of range for {}: {}",
                bad.class_name, bad.probability
            )));
        }

        Ok(parsed.predictions)
    }
}
