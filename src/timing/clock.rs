// "M:SS" clock labels shared by timeline segments and feedback items

/// Format whole seconds as `M:SS` (minutes unpadded, seconds zero-padded)
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format an inclusive range as `M:SS-M:SS`
pub fn format_clock_range(start: u64, end: u64) -> String {
    format!("{}-{}", format_clock(start), format_clock(end))
}

/// Parse a `minutes:seconds` token or bare integer seconds.
/// The seconds field is not range-checked, so `1:75` is 135.
/// Returns `None` for anything else, or when the total overflows.
pub fn parse_clock(token: &str) -> Option<u64> {
    let token = token.trim();
    match token.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.trim().parse().ok()?;
            let seconds: u64 = seconds.trim().parse().ok()?;
            minutes.checked_mul(60)?.checked_add(seconds)
        }
        None => token.parse().ok(),
    }
}

/// Parse the leading clock token of a label such as `0:15` or `0:15-0:23`
pub fn parse_clock_label(label: &str) -> Option<u64> {
    let leading = label.split('-').next().unwrap_or(label);
    parse_clock(leading)
}
