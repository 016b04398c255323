/// Renders an ISO 8601 time duration ("PT1H30M") as "1 hr 30 min".
///
/// Only the hour and minute components are shown; seconds are ignored. Returns
/// `None` for missing input, input without the `PT` prefix, or a duration with
/// no non-zero hours or minutes.
pub fn format_iso8601(iso8601: Option<&str>) -> Option<String> {
    let body = iso8601?.strip_prefix("PT")?;

    let mut hours: u32 = 0;
    let mut minutes: u32 = 0;
    let mut current = String::new();

    for ch in body.chars() {
        match ch {
            'H' => {
                hours = current.parse().unwrap_or(0);
                current.clear();
            }
            'M' => {
                minutes = current.parse().unwrap_or(0);
                current.clear();
            }
            'S' => current.clear(),
            other => current.push(other),
        }
    }

    let mut parts: Vec<String> = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hr{}", hours, if hours > 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!("{} min", minutes));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
