//! Duration parsing
//!
//! Converts the compact runtime encoding used by catalog metadata
//! (e.g. "PT15M30S") into total seconds. This is a total function: malformed
//! input degrades to zero so a single bad field cannot abort the pipeline.

/// Parse a compact duration encoding into total seconds.
///
/// The encoding carries optional hour, minute, and second components, each an
/// integer magnitude followed by `H`, `M`, or `S`. Absent components
/// contribute zero. Anything unrecognizable yields 0. Values beyond typical
/// runtimes are accepted as-is; arithmetic saturates rather than wrapping.
///
/// ```
/// use catalytics::duration::parse_duration;
///
/// assert_eq!(parse_duration("PT15M30S"), 930);
/// assert_eq!(parse_duration("PT1H"), 3600);
/// assert_eq!(parse_duration("PT45S"), 45);
/// assert_eq!(parse_duration(""), 0);
/// ```
pub fn parse_duration(duration: &str) -> u64 {
    let mut total: u64 = 0;
    let mut magnitude: u64 = 0;
    let mut in_number = false;

    for c in duration.chars() {
        if let Some(d) = c.to_digit(10) {
            magnitude = magnitude.saturating_mul(10).saturating_add(u64::from(d));
            in_number = true;
            continue;
        }
        if in_number {
            match c {
                'H' => total = total.saturating_add(magnitude.saturating_mul(3600)),
                'M' => total = total.saturating_add(magnitude.saturating_mul(60)),
                'S' => total = total.saturating_add(magnitude),
                _ => {}
            }
        }
        magnitude = 0;
        in_number = false;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_encoding() {
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("PT15M30S"), 930);
    }

    #[test]
    fn test_single_components() {
        assert_eq!(parse_duration("PT1H"), 3600);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT10M"), 600);
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(parse_duration("PT0S"), 0);
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("not a duration"), 0);
        assert_eq!(parse_duration("PT"), 0);
        // Digits without a trailing unit marker contribute nothing
        assert_eq!(parse_duration("PT90"), 0);
    }

    #[test]
    fn test_no_upper_clamp() {
        assert_eq!(parse_duration("PT100H"), 360_000);
    }

    #[test]
    fn test_lowercase_markers_are_not_units() {
        assert_eq!(parse_duration("pt15m30s"), 0);
    }
}
