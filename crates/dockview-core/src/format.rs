//! Formatting helpers shared by the list and the detail panes

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use dockview_provider::PortBinding;

/// Host address shown for a published port bound to every interface
const ANY_ADDRESS: &str = "0.0.0.0";

/// Display name of a container: its first name without the daemon's `/` prefix
pub fn primary_name(names: &[String]) -> String {
    names
        .first()
        .map(|n| n.strip_prefix('/').unwrap_or(n).to_string())
        .unwrap_or_default()
}

/// Render port bindings the way `docker ps` does, in the order given
pub fn format_ports(ports: &[PortBinding]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }

    ports
        .iter()
        .map(|p| {
            let protocol = p.protocol.to_lowercase();
            match p.public_port.filter(|&port| port > 0) {
                Some(public) => format!(
                    "{}:{}->{}/{}",
                    p.ip.as_deref().filter(|ip| !ip.is_empty()).unwrap_or(ANY_ADDRESS),
                    public,
                    p.private_port,
                    protocol
                ),
                None => format!("{}/{}", p.private_port, protocol),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a daemon timestamp.
///
/// Returns `None` for anything unparseable and for the daemon's zero time
/// (`0001-01-01T00:00:00Z`), which it reports for containers that never ran.
pub fn parse_started_at(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    let utc = parsed.with_timezone(&Utc);
    if utc.year() <= 1 {
        return None;
    }
    Some(utc)
}

/// Coarse "time ago" text. Each bucket truncates; negative input counts as zero.
pub fn humanize_since(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    if secs < 60 {
        format!("{} seconds", secs)
    } else if secs < 60 * 60 {
        format!("{} minutes", secs / 60)
    } else if secs < 24 * 60 * 60 {
        format!("{} hours", secs / (60 * 60))
    } else {
        format!("{} days", secs / (24 * 60 * 60))
    }
}

/// RFC 1123 layout with a zero-padded day, e.g. `Fri, 01 Mar 2024 10:00:00 UTC`
pub fn format_rfc1123<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%a, %d %b %Y %H:%M:%S %Z").to_string()
}

/// `<local RFC 1123 time> (<N unit> ago)`
pub fn format_started(started: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!(
        "{} ({} ago)",
        format_rfc1123(&started.with_timezone(&Local)),
        humanize_since(now - started)
    )
}

/// Strip carriage returns and surrounding whitespace from raw log output
pub fn clean_logs(raw: &str) -> String {
    raw.replace('\r', "").trim().to_string()
}

/// Wall-clock prefix for the status line (24-hour, local zone)
pub fn status_clock(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}
