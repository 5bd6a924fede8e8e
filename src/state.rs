use crate::error::AppError;
use crate::models::{CapturedImage, Endpoint, Prediction};

/// Session state: the endpoint, the single image slot and the currently
/// displayed predictions. Updates happen through discrete transitions and
/// always replace a slot wholesale; a failed action performs no transition,
/// so the state stays whatever it was before.
#[derive(Debug, Default)]
pub struct Session {
    pub endpoint: Endpoint,
    pub image: Option<CapturedImage>,
    pub predictions: Vec<Prediction>,
}

impl Session {
    pub fn set_host(&mut self, host: &str) {
        self.endpoint.host = host.trim().to_string();
    }

    pub fn set_port(&mut self, port: &str) {
        self.endpoint.port = port.trim().to_string();
    }

    /// Capture succeeded: the new photo replaces any previous one.
    pub fn capture_succeeded(&mut self, image: CapturedImage) {
        self.image = Some(image);
    }

    /// Submit succeeded: the displayed list is replaced as received,
    /// order preserved.
    pub fn submit_succeeded(&mut self, predictions: Vec<Prediction>) {
        self.predictions = predictions;
    }

    /// Preconditions for submit, checked before any request is built.
    pub fn check_ready(&self) -> Result<&CapturedImage, AppError> {
        if !self.endpoint.is_complete() {
            return Err(AppError::Validation(
                "Por favor ingresa la IP y el puerto del servidor.".to_string(),
            ));
        }
        self.image.as_ref().ok_or_else(|| {
            AppError::Validation("Por favor toma una foto antes de enviarla.".to_string())
        })
    }
}
