use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use std::io::BufWriter;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::CapturedImage;

/// JPEG quality used when re-encoding a capture, to keep uploads small.
const CAPTURE_QUALITY: u8 = 50;

/// Conventional exit code of a process interrupted with SIGINT.
const SIGINT_EXIT: i32 = 130;

#[derive(Debug)]
pub enum CaptureOutcome {
    Captured(CapturedImage),
    Cancelled,
}

#[async_trait]
pub trait Camera: Send + Sync {
    async fn capture(&self) -> Result<CaptureOutcome, AppError>;
}

/// Camera backend that shells out to a capture command. The command string
/// is split on whitespace and `{output}` is replaced with the path of the
/// JPEG the command must write. Captures land in a per-process temp
/// directory that is removed when the camera is dropped.
pub struct CommandCamera {
    command: String,
    upload_dir: TempDir,
}

impl CommandCamera {
    pub fn new(command: impl Into<String>) -> Result<Self, AppError> {
        let upload_dir = tempfile::Builder::new()
            .prefix("reconocimiento")
            .tempdir()
            .map_err(|e| AppError::Capture(format!("could not create temp directory: {e}")))?;
        Ok(Self {
            command: command.into(),
            upload_dir,
        })
    }
}

#[async_trait]
impl Camera for CommandCamera {
    async fn capture(&self) -> Result<CaptureOutcome, AppError> {
        let filename = format!("{}.jpg", Uuid::new_v4());
        let output_path = self.upload_dir.path().join(filename);

        let rendered = self
            .command
            .replace("{output}", &output_path.to_string_lossy());
        let mut parts = rendered.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AppError::Capture("empty capture command".to_string()))?;

        debug!("running capture command: {rendered}");
        let output = tokio::process::Command::new(program)
            .args(parts)
            .output()
            .await
            .map_err(|e| AppError::Capture(format!("could not run capture command: {e}")))?;

        match output.status.code() {
            Some(0) => {}
            // Killed by a signal or interrupted by the user.
            None | Some(SIGINT_EXIT) => {
                debug!("capture command interrupted, treating as cancellation");
                return Ok(CaptureOutcome::Cancelled);
            }
            Some(code) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(AppError::Capture(format!(
                    "capture command exited with status {code}: {}",
                    stderr.trim()
                )));
            }
        }

        if !output_path.exists() {
            return Err(AppError::Capture(
                "capture command produced no image".to_string(),
            ));
        }

        reencode_jpeg(&output_path, CAPTURE_QUALITY)?;
        Ok(CaptureOutcome::Captured(CapturedImage::jpeg(output_path)))
    }
}

/// Rewrites the captured file as a reduced-quality JPEG, mirroring the
/// camera's reduced-quality photo option.
fn reencode_jpeg(path: &Path, quality: u8) -> Result<(), AppError> {
    let img = image::open(path)
        .map_err(|e| AppError::Capture(format!("captured file is not a valid image: {e}")))?
        .to_rgb8();
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::Capture(format!("could not rewrite capture: {e}")))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(&img)
        .map_err(|e| AppError::Capture(format!("could not encode capture: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn successful_capture_reencodes_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("fixture.jpg");
        image::RgbImage::new(8, 8).save(&fixture).unwrap();

        let camera = CommandCamera::new(format!("cp {} {{output}}", fixture.display())).unwrap();
        match camera.capture().await.unwrap() {
            CaptureOutcome::Captured(img) => {
                assert!(img.local_uri.exists());
                assert_eq!(img.mime_type, "image/jpeg");
                assert_eq!(img.file_name, "foto.jpg");
                // Still decodable after the quality rewrite.
                image::open(&img.local_uri).unwrap();
            }
            CaptureOutcome::Cancelled => panic!("expected a captured image"),
        }
    }

    #[tokio::test]
    async fn sigint_exit_code_is_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = script(dir.path(), "cancel.sh", "#!/bin/sh\nexit 130\n");

        let camera = CommandCamera::new(format!("{} {{output}}", cancel.display())).unwrap();
        assert!(matches!(
            camera.capture().await.unwrap(),
            CaptureOutcome::Cancelled
        ));
    }

    #[tokio::test]
    async fn failing_command_is_a_capture_error() {
        let dir = tempfile::tempdir().unwrap();
        let fail = script(dir.path(), "fail.sh", "#!/bin/sh\necho broken >&2\nexit 1\n");

        let camera = CommandCamera::new(format!("{} {{output}}", fail.display())).unwrap();
        let err = camera.capture().await.unwrap_err();
        assert!(matches!(err, AppError::Capture(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[tokio::test]
    async fn missing_output_file_is_a_capture_error() {
        let dir = tempfile::tempdir().unwrap();
        let noop = script(dir.path(), "noop.sh", "#!/bin/sh\nexit 0\n");

        let camera = CommandCamera::new(format!("{} {{output}}", noop.display())).unwrap();
        let err = camera.capture().await.unwrap_err();
        assert!(err.to_string().contains("produced no image"));
    }
}
