use super::error::ScreenshotError;
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use log::warn;
use std::{env::temp_dir, fs::remove_file, io::Cursor, process::Command};
use xcap::Monitor;

/// A full-frame capture of the primary display. The PNG bytes go into the
/// ticket upload, the decoded image stays around for the preview thumbnail
pub struct Screenshot {
    pub png: Vec<u8>,
    pub image: DynamicImage,
}

/// Capture the primary display. Tries the capture library first, then an
/// OS-level command. `None` means no screenshot is available and the ticket
/// proceeds without one, this path never aborts ticket creation
pub fn capture() -> Option<Screenshot> {
    let image = match primary_capture() {
        Ok(result) => result,
        Err(err) => {
            warn!("[screenshot] Primary capture failed: {err:?}. Trying OS fallback");
            match fallback_capture() {
                Ok(result) => result,
                Err(err) => {
                    warn!("[screenshot] Fallback capture failed: {err:?}. Proceeding without a screenshot");
                    return None;
                }
            }
        }
    };

    match encode_png(&image) {
        Ok(png) => Some(Screenshot { png, image }),
        Err(err) => {
            warn!("[screenshot] Could not encode capture: {err:?}. Proceeding without a screenshot");
            None
        }
    }
}

/// Shrink a capture for the form preview, preserving aspect ratio
pub fn thumbnail(image: &DynamicImage, max_height: u32) -> DynamicImage {
    if image.height() <= max_height || image.height() == 0 {
        return image.clone();
    }

    let width = (image.width() as u64 * max_height as u64 / image.height() as u64) as u32;
    image.resize_exact(width.max(1), max_height, FilterType::Lanczos3)
}

fn primary_capture() -> Result<DynamicImage, ScreenshotError> {
    let monitors = match Monitor::all() {
        Ok(result) => result,
        Err(err) => {
            warn!("[screenshot] Could not enumerate monitors: {err:?}");
            return Err(ScreenshotError::NoMonitor);
        }
    };

    let monitor = monitors
        .iter()
        .find(|monitor| monitor.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())
        .ok_or(ScreenshotError::NoMonitor)?;

    let image = match monitor.capture_image() {
        Ok(result) => result,
        Err(err) => {
            warn!("[screenshot] Monitor capture failed: {err:?}");
            return Err(ScreenshotError::Capture);
        }
    };

    Ok(DynamicImage::ImageRgba8(image))
}

/// Ask the OS to write a capture to a temp file and decode it back
fn fallback_capture() -> Result<DynamicImage, ScreenshotError> {
    let path = temp_dir().join("helpdesk-capture.png");
    let path_str = path.to_string_lossy().to_string();

    fallback_command(&path_str)?;

    let image = image::open(&path).map_err(|_| ScreenshotError::Decode)?;
    let _ = remove_file(&path);

    Ok(image)
}

#[cfg(target_os = "windows")]
fn fallback_command(path: &str) -> Result<(), ScreenshotError> {
    let script = format!(
        r#"Add-Type -AssemblyName System.Windows.Forms
Add-Type -AssemblyName System.Drawing
$bounds = [System.Windows.Forms.SystemInformation]::VirtualScreen
$bitmap = New-Object System.Drawing.Bitmap $bounds.Width, $bounds.Height
$graphics = [System.Drawing.Graphics]::FromImage($bitmap)
$graphics.CopyFromScreen($bounds.Location, [System.Drawing.Point]::Empty, $bounds.Size)
$bitmap.Save('{path}', [System.Drawing.Imaging.ImageFormat]::Png)"#
    );

    run_capture_command("powershell", &["-NoProfile", "-Command", &script])
}

#[cfg(target_os = "macos")]
fn fallback_command(path: &str) -> Result<(), ScreenshotError> {
    run_capture_command("screencapture", &["-x", path])
}

#[cfg(target_os = "linux")]
fn fallback_command(path: &str) -> Result<(), ScreenshotError> {
    run_capture_command("gnome-screenshot", &["-f", path])
}

fn run_capture_command(program: &str, args: &[&str]) -> Result<(), ScreenshotError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|_| ScreenshotError::CommandFailed)?;

    if !output.status.success() {
        return Err(ScreenshotError::CommandFailed);
    }

    Ok(())
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ScreenshotError> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|_| ScreenshotError::Encode)?;

    Ok(buffer)
}
