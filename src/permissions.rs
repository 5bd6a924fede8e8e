use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use crate::error::AppError;

/// Probes the camera device for read access before the first capture. This
/// never triggers a capture; denial is logged by the caller and the app
/// keeps running, later captures simply fail at the OS level.
pub fn check_camera_access(device: &Path) -> Result<(), AppError> {
    match std::fs::File::open(device) {
        Ok(_) => {
            info!("camera device {} is accessible", device.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::PermissionDenied(
            format!("sin acceso a la cámara ({})", device.display()),
        )),
        Err(e) => Err(AppError::Capture(format!(
            "camera device {} unavailable: {e}",
            device.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_path_passes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(check_camera_access(file.path()).is_ok());
    }

    #[test]
    fn missing_device_is_reported() {
        let err = check_camera_access(Path::new("/dev/no-such-video9")).unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }
}
