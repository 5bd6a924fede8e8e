use tracing::{info, warn};

use crate::capture::{Camera, CaptureOutcome};
use crate::client::ClassificationClient;
use crate::error::AppError;
use crate::present;
use crate::speech::Speaker;
use crate::state::Session;

/// Wires the session state to the camera, the classification service and
/// the speech engine. Each operation runs to completion before the next
/// user action; failures leave the session untouched.
pub struct App {
    pub session: Session,
    client: ClassificationClient,
    camera: Box<dyn Camera>,
    speaker: Box<dyn Speaker>,
}

impl App {
    pub fn new(camera: Box<dyn Camera>, speaker: Box<dyn Speaker>) -> Result<Self, AppError> {
        Ok(Self {
            session: Session::default(),
            client: ClassificationClient::new()?,
            camera,
            speaker,
        })
    }

    pub fn set_host(&mut self, host: &str) {
        self.session.set_host(host);
    }

    pub fn set_port(&mut self, port: &str) {
        self.session.set_port(port);
    }

    /// Takes one photo. Cancellation is logged and keeps the previous
    /// image; a device failure is surfaced and sets nothing.
    pub async fn capture(&mut self) -> Result<(), AppError> {
        match self.camera.capture().await? {
            CaptureOutcome::Captured(image) => {
                info!("foto capturada: {}", image.local_uri.display());
                self.session.capture_succeeded(image);
            }
            CaptureOutcome::Cancelled => {
                info!("el usuario canceló la cámara");
            }
        }
        Ok(())
    }

    /// Submits the current photo and, on success, replaces the displayed
    /// predictions and presents them. Validation rejects the call before
    /// any network activity; a failed submit keeps the prior predictions.
    pub async fn classify(&mut self) -> Result<(), AppError> {
        let image = self.session.check_ready()?;
        let predictions = self.client.predict(&self.session.endpoint, image).await?;
        self.session.submit_succeeded(predictions);
        self.present().await;
        Ok(())
    }

    async fn present(&self) {
        let rows = present::render_rows(&self.session.predictions);
        if !rows.is_empty() {
            println!("{rows}");
        }
        if let Some(text) = present::speech_text(&self.session.predictions) {
            if let Err(e) = self.speaker.speak(&text).await {
                warn!("speech synthesis failed: {e}");
            }
        }
    }
}
