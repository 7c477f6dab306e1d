use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::lookup::{PassList, PassWindow};

/// One line per pass; records without `risetime`/`duration` fall back to their JSON
pub fn describe(pass: &PassWindow) -> String {
    let rise = pass
        .risetime()
        .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0));
    match (rise, pass.duration()) {
        (Some(rise), Some(secs)) => format!(
            "Next pass at {} for {}!",
            rise.format("%a %b %d %Y %H:%M:%S UTC"),
            humantime::format_duration(Duration::from_secs(secs))
        ),
        _ => pass.0.to_string(),
    }
}

pub fn render(passes: &PassList, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(passes);
    }
    if passes.is_empty() {
        return Ok("No upcoming passes".to_string());
    }
    Ok(passes.iter().map(describe).collect::<Vec<_>>().join("\n"))
}
