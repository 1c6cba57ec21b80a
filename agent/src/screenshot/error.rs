use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ScreenshotError {
    NoMonitor,
    Capture,
    CommandFailed,
    Decode,
    Encode,
}

impl std::error::Error for ScreenshotError {}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::NoMonitor => write!(f, "No monitor available for capture"),
            ScreenshotError::Capture => write!(f, "Failed to capture the display"),
            ScreenshotError::CommandFailed => write!(f, "OS capture command failed"),
            ScreenshotError::Decode => write!(f, "Failed to decode captured image"),
            ScreenshotError::Encode => write!(f, "Failed to encode screenshot as PNG"),
        }
    }
}
