use thiserror::Error;

/// Every failure is terminal for the user action that triggered it; there
/// are no retries anywhere. Validation and transport errors are shown to
/// the user, permission denial is logged only.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing endpoint or missing photo; raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The capture command failed or produced no usable image.
    #[error("Error en la cámara: {0}")]
    Capture(String),

    /// Network or server failure on submit, including malformed responses.
    #[error("No se pudo enviar la imagen: {0}")]
    Transport(String),

    /// The OS refused access to the camera device.
    #[error("permiso denegado: {0}")]
    PermissionDenied(String),
}
