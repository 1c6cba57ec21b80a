use serde::{Deserialize, Serialize};

/// Sentinel for string fields we could not collect
pub const NOT_AVAILABLE: &str = "N/A";
/// Sentinel for fields where a query succeeded but gave nothing useful
pub const UNKNOWN: &str = "Unknown";

/// Point-in-time view of the endpoint. Built fresh on every activation and
/// discarded when the ticket window closes. Every field holds either a real
/// measurement or a fixed sentinel, absence is never a missing field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SystemSnapshot {
    pub hostname: String,
    pub username: String,
    pub os_info: String,
    pub local_ip: String,
    pub public_ip: String,
    pub mac_address: String,
    /// Global CPU usage percentage
    pub cpu_usage: f32,
    /// Used memory percentage
    pub ram_usage: f32,
    /// Humanized total memory. Ex: "16.0 GB"
    pub total_ram: String,
    pub logical_processors: usize,
    /// Used space percentage on the largest disk
    pub disk_usage: f32,
    /// Humanized uptime. Ex: "3d 4h 12m"
    pub uptime: String,
    pub battery: String,
    pub active_window: String,
}

impl Default for SystemSnapshot {
    fn default() -> Self {
        SystemSnapshot {
            hostname: String::from(NOT_AVAILABLE),
            username: String::from(UNKNOWN),
            os_info: String::from(NOT_AVAILABLE),
            local_ip: String::from(NOT_AVAILABLE),
            public_ip: String::from(NOT_AVAILABLE),
            mac_address: String::from(NOT_AVAILABLE),
            cpu_usage: 0.0,
            ram_usage: 0.0,
            total_ram: String::from(NOT_AVAILABLE),
            logical_processors: 0,
            disk_usage: 0.0,
            uptime: String::from(NOT_AVAILABLE),
            battery: String::from(NOT_AVAILABLE),
            active_window: String::from(UNKNOWN),
        }
    }
}
