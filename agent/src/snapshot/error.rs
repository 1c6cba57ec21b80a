use std::fmt;

#[derive(Debug, PartialEq)]
pub enum SnapshotError {
    Hostname,
    OsInfo,
    Username,
    LocalIp,
    PublicIp,
    MacAddress,
    Disk,
    Battery,
    ActiveWindow,
}

impl std::error::Error for SnapshotError {}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Hostname => write!(f, "Failed to get hostname"),
            SnapshotError::OsInfo => write!(f, "Failed to get OS info"),
            SnapshotError::Username => write!(f, "Failed to get logged in user"),
            SnapshotError::LocalIp => write!(f, "Failed to get local IP"),
            SnapshotError::PublicIp => write!(f, "Failed to get public IP"),
            SnapshotError::MacAddress => write!(f, "Failed to get MAC address"),
            SnapshotError::Disk => write!(f, "Failed to get disk usage"),
            SnapshotError::Battery => write!(f, "Failed to get battery status"),
            SnapshotError::ActiveWindow => write!(f, "Failed to get active window title"),
        }
    }
}
