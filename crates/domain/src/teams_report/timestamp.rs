use chrono::{NaiveDate, NaiveDateTime};

const KNOWN_FORMATS: &[&str] = &[
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y, %H:%M:%S",
    "%m/%d/%y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses the locale-formatted timestamps Teams exports use, like
/// `5/15/2023, 10:00:00 AM`. Known chrono formats are tried first, then a
/// manual split that disambiguates day-first dates: a first component above
/// 12 has to be a day. Ambiguous dates stay month-first. Returns 0 instead
/// of failing, participant rows survive a bad cell that way.
pub fn parse_report_timestamp(raw: &str) -> i64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0;
    }

    for format in KNOWN_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return parsed.and_utc().timestamp_millis();
        }
    }

    parse_locale_parts(text).unwrap_or(0)
}

fn parse_locale_parts(text: &str) -> Option<i64> {
    let (date_part, time_part) = match text.split_once(',') {
        Some((date, time)) => (date.trim(), time.trim()),
        None => text.split_once(' ').map(|(d, t)| (d.trim(), t.trim()))?,
    };

    let date_numbers: Vec<i64> = date_part
        .split(['/', '-', '.'])
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if date_numbers.len() != 3 {
        return None;
    }
    let (first, second, mut year) = (date_numbers[0], date_numbers[1], date_numbers[2]);
    if year < 100 {
        year += 2000;
    }
    let (month, day) = if first > 12 { (second, first) } else { (first, second) };

    let mut time_fields = time_part.split_whitespace();
    let clock = time_fields.next()?;
    let meridiem = time_fields.next().map(|m| m.to_ascii_uppercase());

    let clock_numbers: Vec<u32> = clock
        .split(':')
        .map(|part| part.parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;
    let (mut hour, minute, second_of_minute) = match clock_numbers.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [h, m] => (*h, *m, 0),
        _ => return None,
    };
    match meridiem.as_deref() {
        Some("PM") if hour != 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        _ => {}
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?;
    let datetime = date.and_hms_opt(hour, minute, second_of_minute)?;
    Some(datetime.and_utc().timestamp_millis())
}
