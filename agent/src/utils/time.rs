/// Humanize an uptime in seconds. Ex: "3d 4h 12m"
pub(crate) fn uptime_to_string(seconds: u64) -> String {
    let day = 86400;
    let hour = 3600;
    let minute = 60;

    let days = seconds / day;
    let hours = (seconds % day) / hour;
    let minutes = (seconds % hour) / minute;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
