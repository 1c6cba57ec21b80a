use super::error::SnapshotError;
use crate::utils::{env::get_env_value, time::uptime_to_string};
use common::snapshot::{SystemSnapshot, NOT_AVAILABLE, UNKNOWN};
use log::warn;
use std::{net::UdpSocket, process::Command, thread::sleep, time::Duration};
use sysinfo::{Disks, Networks, System};

const PUBLIC_IP_URL: &str = "https://api.ipify.org";
const PUBLIC_IP_TIMEOUT: u64 = 3;

/// Gather a full `SystemSnapshot`. Every field is collected independently and
/// collapses its own failure to a sentinel, one bad query never blocks the rest
pub fn collect() -> SystemSnapshot {
    let mut system = System::new();
    system.refresh_memory();

    SystemSnapshot {
        hostname: string_or(hostname(), NOT_AVAILABLE, "hostname"),
        username: string_or(username(), UNKNOWN, "username"),
        os_info: string_or(os_info(), NOT_AVAILABLE, "os_info"),
        local_ip: string_or(local_ip(), NOT_AVAILABLE, "local_ip"),
        public_ip: string_or(public_ip(PUBLIC_IP_URL), NOT_AVAILABLE, "public_ip"),
        mac_address: string_or(mac_address(), NOT_AVAILABLE, "mac_address"),
        cpu_usage: cpu_usage(&mut system),
        ram_usage: ram_usage(&system),
        total_ram: bytes_to_gb(system.total_memory()),
        logical_processors: system.cpus().len(),
        disk_usage: match disk_usage() {
            Ok(result) => result,
            Err(err) => {
                warn!("[snapshot] Could not collect disk_usage: {err:?}");
                0.0
            }
        },
        uptime: uptime_to_string(System::uptime()),
        battery: string_or(battery(), NOT_AVAILABLE, "battery"),
        active_window: string_or(active_window(), UNKNOWN, "active_window"),
    }
}

/// Collapse a failed or empty string query to the field sentinel
fn string_or(value: Result<String, SnapshotError>, sentinel: &str, field: &str) -> String {
    match value {
        Ok(result) => {
            if result.is_empty() {
                return sentinel.to_string();
            }
            result
        }
        Err(err) => {
            warn!("[snapshot] Could not collect {field}: {err:?}");
            sentinel.to_string()
        }
    }
}

fn hostname() -> Result<String, SnapshotError> {
    System::host_name().ok_or(SnapshotError::Hostname)
}

/// System name plus OS version. Ex: "Windows 11 (26100)"
fn os_info() -> Result<String, SnapshotError> {
    let name = System::name().ok_or(SnapshotError::OsInfo)?;
    let version = System::os_version().ok_or(SnapshotError::OsInfo)?;

    Ok(format!("{name} {version}"))
}

fn username() -> Result<String, SnapshotError> {
    let user = get_env_value("USERNAME");
    if !user.is_empty() {
        return Ok(user);
    }

    let user = get_env_value("USER");
    if !user.is_empty() {
        return Ok(user);
    }

    Err(SnapshotError::Username)
}

/// Local IP via a bound UDP socket. No packets are sent, connect only picks the
/// interface the default route would use
fn local_ip() -> Result<String, SnapshotError> {
    let socket = UdpSocket::bind("0.0.0.0:0").map_err(|_| SnapshotError::LocalIp)?;
    socket
        .connect("8.8.8.8:80")
        .map_err(|_| SnapshotError::LocalIp)?;
    let addr = socket.local_addr().map_err(|_| SnapshotError::LocalIp)?;

    Ok(addr.ip().to_string())
}

/// Ask an external echo service for our public address
fn public_ip(url: &str) -> Result<String, SnapshotError> {
    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(PUBLIC_IP_TIMEOUT))
        .build()
    {
        Ok(result) => result,
        Err(err) => {
            warn!("[snapshot] Could not build public IP client: {err:?}");
            return Err(SnapshotError::PublicIp);
        }
    };

    let res = client
        .get(url)
        .send()
        .map_err(|_| SnapshotError::PublicIp)?;
    if res.status() != reqwest::StatusCode::OK {
        return Err(SnapshotError::PublicIp);
    }

    res.text().map_err(|_| SnapshotError::PublicIp)
}

/// MAC of the first non-loopback interface with a real address
fn mac_address() -> Result<String, SnapshotError> {
    let networks = Networks::new_with_refreshed_list();

    for (name, network) in &networks {
        if name.starts_with("lo") {
            continue;
        }
        let mac = network.mac_address();
        if mac.is_unspecified() {
            continue;
        }
        return Ok(mac.to_string());
    }

    Err(SnapshotError::MacAddress)
}

/// Global CPU usage percentage. sysinfo needs two refreshes a minimum interval
/// apart before the number means anything
fn cpu_usage(system: &mut System) -> f32 {
    system.refresh_cpu_usage();
    sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    system.refresh_cpu_usage();

    system.global_cpu_usage()
}

fn ram_usage(system: &System) -> f32 {
    let total = system.total_memory();
    if total == 0 {
        return 0.0;
    }

    (system.used_memory() as f64 / total as f64 * 100.0) as f32
}

/// Used space percentage on the largest disk
fn disk_usage() -> Result<f32, SnapshotError> {
    let disks = Disks::new_with_refreshed_list();

    let mut largest: Option<(u64, u64)> = None;
    for disk in &disks {
        let total = disk.total_space();
        if total == 0 {
            continue;
        }
        if largest.map_or(true, |(size, _)| total > size) {
            largest = Some((total, disk.available_space()));
        }
    }

    match largest {
        Some((total, available)) => {
            Ok(((total - available) as f64 / total as f64 * 100.0) as f32)
        }
        None => Err(SnapshotError::Disk),
    }
}

fn bytes_to_gb(bytes: u64) -> String {
    let gib = 1_073_741_824.0;
    format!("{:.1} GB", bytes as f64 / gib)
}

/// Battery capacity and status. Only Linux exposes this without extra help
#[cfg(target_os = "linux")]
fn battery() -> Result<String, SnapshotError> {
    use std::fs::{read_dir, read_to_string};

    let entries = read_dir("/sys/class/power_supply").map_err(|_| SnapshotError::Battery)?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with("BAT") {
            continue;
        }

        let base = entry.path();
        let capacity =
            read_to_string(base.join("capacity")).map_err(|_| SnapshotError::Battery)?;
        let status = read_to_string(base.join("status")).map_err(|_| SnapshotError::Battery)?;

        return Ok(format!("{}% ({})", capacity.trim(), status.trim()));
    }

    Err(SnapshotError::Battery)
}

#[cfg(not(target_os = "linux"))]
fn battery() -> Result<String, SnapshotError> {
    Err(SnapshotError::Battery)
}

#[cfg(target_os = "windows")]
fn active_window() -> Result<String, SnapshotError> {
    let script = r#"Add-Type @"
using System;
using System.Runtime.InteropServices;
using System.Text;
public class Win32 {
    [DllImport("user32.dll")] public static extern IntPtr GetForegroundWindow();
    [DllImport("user32.dll")] public static extern int GetWindowText(IntPtr hWnd, StringBuilder text, int count);
}
"@
$buf = New-Object System.Text.StringBuilder 256
[void][Win32]::GetWindowText([Win32]::GetForegroundWindow(), $buf, 256)
$buf.ToString()"#;

    run_command("powershell", &["-NoProfile", "-Command", script])
        .map_err(|_| SnapshotError::ActiveWindow)
}

#[cfg(target_os = "macos")]
fn active_window() -> Result<String, SnapshotError> {
    let script = r#"tell application "System Events" to get name of first application process whose frontmost is true"#;

    run_command("osascript", &["-e", script]).map_err(|_| SnapshotError::ActiveWindow)
}

#[cfg(target_os = "linux")]
fn active_window() -> Result<String, SnapshotError> {
    run_command("xdotool", &["getactivewindow", "getwindowname"])
        .map_err(|_| SnapshotError::ActiveWindow)
}

/// Run a command and return trimmed stdout. Empty output counts as a failure
fn run_command(program: &str, args: &[&str]) -> Result<String, SnapshotError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|_| SnapshotError::ActiveWindow)?;

    if !output.status.success() {
        return Err(SnapshotError::ActiveWindow);
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        return Err(SnapshotError::ActiveWindow);
    }

    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::{
        bytes_to_gb, cpu_usage, disk_usage, hostname, local_ip, os_info, public_ip, ram_usage,
        string_or, username,
    };
    use crate::snapshot::error::SnapshotError;
    use httpmock::{Method::GET, MockServer};
    use sysinfo::System;

    #[test]
    fn test_collect_never_leaves_fields_blank() {
        let snapshot = super::collect();
        assert!(!snapshot.hostname.is_empty());
        assert!(!snapshot.os_info.is_empty());
        assert!(!snapshot.uptime.is_empty());
        assert!(!snapshot.battery.is_empty());
        assert!(!snapshot.active_window.is_empty());
        assert!(snapshot.cpu_usage >= 0.0);
        assert!(snapshot.logical_processors >= 1);
    }

    #[test]
    fn test_string_or_collapses_failures() {
        let value: Result<String, SnapshotError> = Err(SnapshotError::Hostname);
        assert_eq!(string_or(value, "N/A", "hostname"), "N/A");

        let empty: Result<String, SnapshotError> = Ok(String::new());
        assert_eq!(string_or(empty, "Unknown", "active_window"), "Unknown");

        let real: Result<String, SnapshotError> = Ok(String::from("DESKTOP-01"));
        assert_eq!(string_or(real, "N/A", "hostname"), "DESKTOP-01");
    }

    #[test]
    fn test_hostname() {
        assert!(!hostname().unwrap().is_empty())
    }

    #[test]
    fn test_os_info() {
        assert!(!os_info().unwrap().is_empty())
    }

    #[test]
    fn test_username() {
        assert!(!username().unwrap().is_empty())
    }

    #[test]
    fn test_local_ip() {
        let ip = local_ip().unwrap();
        assert!(ip.parse::<std::net::IpAddr>().is_ok());
    }

    #[test]
    fn test_public_ip() {
        let mock_server = MockServer::start();

        let mock_me = mock_server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("203.0.113.9");
        });

        let ip = public_ip(&mock_server.url("/")).unwrap();
        mock_me.assert();

        assert_eq!(ip, "203.0.113.9");
    }

    #[test]
    #[should_panic(expected = "PublicIp")]
    fn test_public_ip_not_ok() {
        let mock_server = MockServer::start();

        let _mock_me = mock_server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500).body("nope");
        });

        let _ = public_ip(&mock_server.url("/")).unwrap();
    }

    #[test]
    fn test_cpu_usage() {
        let mut system = System::new();
        assert!(cpu_usage(&mut system) >= 0.0);
    }

    #[test]
    fn test_ram_usage() {
        let mut system = System::new();
        system.refresh_memory();

        let usage = ram_usage(&system);
        assert!(usage > 0.0);
        assert!(usage <= 100.0);
    }

    #[test]
    fn test_disk_usage() {
        // Hosts without mountable disks report the error, everything else a percentage
        if let Ok(usage) = disk_usage() {
            assert!(usage >= 0.0);
            assert!(usage <= 100.0);
        }
    }

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(17_179_869_184), "16.0 GB");
        assert_eq!(bytes_to_gb(0), "0.0 GB");
    }
}
