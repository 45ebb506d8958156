use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "45m 7s" style. Anchored on both ends so an hours component in front
    // ("1h 23m 45s") falls through to the hour/minute pattern instead.
    static ref MINUTES_SECONDS: Regex =
        Regex::new(r"(?i)^\s*(\d+)\s*m(?:in(?:ute)?s?)?\s+(\d+)\s*s(?:ec(?:ond)?s?)?\s*$")
            .unwrap();
    // Optional hours then optional minutes, verbose words allowed. Anchored at
    // the start only, so a trailing seconds component is ignored. Both groups
    // are optional, the caller checks that at least one captured.
    static ref HOURS_MINUTES: Regex =
        Regex::new(r"(?i)^\s*(?:(\d+)\s*h(?:(?:ou)?rs?)?)?[\s,]*(?:(\d+)\s*m(?:in(?:ute)?s?)?)?")
            .unwrap();
    static ref TRAILING_MINUTES: Regex =
        Regex::new(r"(?i)(\d+)\s*m(?:in(?:ute)?s?)?\s*$").unwrap();
    static ref DECIMAL_HOURS: Regex =
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*h(?:(?:ou)?rs?)?").unwrap();
    static ref ANY_NUMBER: Regex = Regex::new(r"(\d+(?:\.\d+)?)").unwrap();
    static ref CLOCK: Regex = Regex::new(r"^\s*(\d+):(\d{1,2})(?::(\d{1,2}))?\s*$").unwrap();
}

/// Parses free-form duration text ("45m 7s", "1h 23m", "1.5 hours",
/// "90 minutes") into whole minutes. Patterns are tried in a fixed order and
/// the first match wins. Returns None when nothing in the text looks like a
/// duration.
pub fn parse_duration_to_minutes(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = MINUTES_SECONDS.captures(text) {
        let minutes: i64 = caps[1].parse().ok()?;
        let seconds: i64 = caps[2].parse().ok()?;
        return Some(minutes + round_seconds(seconds));
    }

    if let Some(caps) = HOURS_MINUTES.captures(text) {
        let hours = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok());
        let minutes = caps.get(2).and_then(|m| m.as_str().parse::<i64>().ok());
        if hours.is_some() || minutes.is_some() {
            return Some(hours.unwrap_or(0) * 60 + minutes.unwrap_or(0));
        }
    }

    if let Some(caps) = TRAILING_MINUTES.captures(text) {
        return caps[1].parse::<i64>().ok();
    }

    if let Some(caps) = DECIMAL_HOURS.captures(text) {
        let hours: f64 = caps[1].parse().ok()?;
        return Some((hours * 60.0).round() as i64);
    }

    if let Some(caps) = ANY_NUMBER.captures(text) {
        let value: f64 = caps[1].parse().ok()?;
        // A bare number above 10 reads as minutes, smaller ones as hours.
        if value > 10.0 {
            return Some(value.round() as i64);
        }
        return Some((value * 60.0).round() as i64);
    }

    None
}

/// Parses clock-style durations, `H:MM:SS` or `MM:SS`. Trailing seconds of 30
/// or more round the minute up, same half-up rounding as the text parser.
pub fn parse_clock_duration(raw: &str) -> Option<i64> {
    let caps = CLOCK.captures(raw)?;
    let first: i64 = caps[1].parse().ok()?;
    let second: i64 = caps[2].parse().ok()?;
    match caps.get(3) {
        Some(seconds) => {
            let seconds: i64 = seconds.as_str().parse().ok()?;
            Some(first * 60 + second + if seconds >= 30 { 1 } else { 0 })
        }
        None => Some(first + if second >= 30 { 1 } else { 0 }),
    }
}

fn round_seconds(seconds: i64) -> i64 {
    (seconds + 30) / 60
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minutes_and_seconds_round_half_up() {
        assert_eq!(parse_duration_to_minutes("45m 7s"), Some(45));
        assert_eq!(parse_duration_to_minutes("45m 31s"), Some(46));
        assert_eq!(parse_duration_to_minutes("45m 30s"), Some(46));
        assert_eq!(parse_duration_to_minutes("45m 29s"), Some(45));
    }

    #[test]
    fn hours_and_minutes_combinations() {
        assert_eq!(parse_duration_to_minutes("1h 23m"), Some(83));
        assert_eq!(parse_duration_to_minutes("2 hours 5 minutes"), Some(125));
        assert_eq!(parse_duration_to_minutes("1h"), Some(60));
        assert_eq!(parse_duration_to_minutes("45m"), Some(45));
    }

    #[test]
    fn hours_component_takes_precedence_over_minute_second_form() {
        // "23m 45s" after an hours component must not be misread as m+s
        assert_eq!(parse_duration_to_minutes("1h 23m 45s"), Some(83));
    }

    #[test]
    fn trailing_minutes_with_leading_text() {
        assert_eq!(parse_duration_to_minutes("90 minutes"), Some(90));
        assert_eq!(parse_duration_to_minutes("about 45 min"), Some(45));
    }

    #[test]
    fn decimal_hours() {
        assert_eq!(parse_duration_to_minutes("1.5 hours"), Some(90));
        assert_eq!(parse_duration_to_minutes("0.5h"), Some(30));
    }

    #[test]
    fn bare_number_fallback() {
        assert_eq!(parse_duration_to_minutes("45"), Some(45));
        assert_eq!(parse_duration_to_minutes("2"), Some(120));
        assert_eq!(parse_duration_to_minutes("10"), Some(600));
    }

    #[test]
    fn unparseable_returns_none() {
        assert_eq!(parse_duration_to_minutes(""), None);
        assert_eq!(parse_duration_to_minutes("   "), None);
        assert_eq!(parse_duration_to_minutes("no numbers here"), None);
    }

    #[test]
    fn clock_duration_hours_minutes_seconds() {
        assert_eq!(parse_clock_duration("1:15:45"), Some(76));
        assert_eq!(parse_clock_duration("1:15:29"), Some(75));
        assert_eq!(parse_clock_duration("0:45:00"), Some(45));
    }

    #[test]
    fn clock_duration_minutes_seconds() {
        assert_eq!(parse_clock_duration("15:45"), Some(16));
        assert_eq!(parse_clock_duration("15:29"), Some(15));
    }

    #[test]
    fn clock_duration_rejects_plain_text() {
        assert_eq!(parse_clock_duration("45m 7s"), None);
        assert_eq!(parse_clock_duration(""), None);
    }
}
