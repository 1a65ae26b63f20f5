//! Cookie date handling.
//!
//! `Expires` values in the wild come in every historical HTTP date format
//! (RFC 1123, RFC 850, asctime, and assorted mangled variants). Parsing
//! follows the token-based algorithm of RFC 6265 §5.1.1, which accepts all
//! of them without knowing which one it is looking at.

use time::{Date, Month, OffsetDateTime, Time, UtcOffset, Weekday};

/// RFC 6265 `delimiter` octets.
fn is_delimiter(b: u8) -> bool {
    b == 0x09
        || (0x20..=0x2F).contains(&b)
        || (0x3B..=0x40).contains(&b)
        || (0x5B..=0x60).contains(&b)
        || (0x7B..=0x7E).contains(&b)
}

/// Leading `min..=max` digits, optionally followed by a non-digit tail.
fn parse_digits(token: &[u8], min: usize, max: usize) -> Option<u32> {
    let count = token.iter().take_while(|b| b.is_ascii_digit()).count();
    if count < min || count > max {
        return None;
    }
    token[..count]
        .iter()
        .try_fold(0u32, |acc, b| Some(acc * 10 + u32::from(b - b'0')))
}

/// `hms-time ( non-digit *OCTET )`
fn parse_time(token: &[u8]) -> Option<(u8, u8, u8)> {
    let mut parts = token.splitn(3, |b| *b == b':');
    let hour = parts.next()?;
    let minute = parts.next()?;
    let second = parts.next()?;

    // The first two fields must be pure digits; only the last may trail.
    let strict = |field: &[u8]| -> Option<u32> {
        if field.is_empty() || field.len() > 2 || !field.iter().all(u8::is_ascii_digit) {
            return None;
        }
        parse_digits(field, 1, 2)
    };

    let h = strict(hour)?;
    let m = strict(minute)?;
    let s = parse_digits(second, 1, 2)?;
    Some((h as u8, m as u8, s as u8))
}

fn parse_month(token: &[u8]) -> Option<Month> {
    if token.len() < 3 {
        return None;
    }
    let prefix = [
        token[0].to_ascii_lowercase(),
        token[1].to_ascii_lowercase(),
        token[2].to_ascii_lowercase(),
    ];
    let month = match &prefix {
        b"jan" => Month::January,
        b"feb" => Month::February,
        b"mar" => Month::March,
        b"apr" => Month::April,
        b"may" => Month::May,
        b"jun" => Month::June,
        b"jul" => Month::July,
        b"aug" => Month::August,
        b"sep" => Month::September,
        b"oct" => Month::October,
        b"nov" => Month::November,
        b"dec" => Month::December,
        _ => return None,
    };
    Some(month)
}

/// Parse a cookie date per RFC 6265 §5.1.1.
///
/// Returns `None` when any of time, day, month or year is missing or out of
/// range, in which case the caller drops the `Expires` attribute.
pub fn parse_cookie_date(input: &str) -> Option<OffsetDateTime> {
    let mut found_time: Option<(u8, u8, u8)> = None;
    let mut day: Option<u32> = None;
    let mut month: Option<Month> = None;
    let mut year: Option<u32> = None;

    for token in input
        .as_bytes()
        .split(|b| is_delimiter(*b))
        .filter(|t| !t.is_empty())
    {
        if found_time.is_none() {
            if let Some(t) = parse_time(token) {
                found_time = Some(t);
                continue;
            }
        }
        if day.is_none() {
            if let Some(d) = parse_digits(token, 1, 2) {
                day = Some(d);
                continue;
            }
        }
        if month.is_none() {
            if let Some(m) = parse_month(token) {
                month = Some(m);
                continue;
            }
        }
        if year.is_none() {
            if let Some(y) = parse_digits(token, 2, 4) {
                year = Some(y);
                continue;
            }
        }
    }

    let (hour, minute, second) = found_time?;
    let day = day?;
    let month = month?;
    let mut year = year?;

    if (70..=99).contains(&year) {
        year += 1900;
    } else if year <= 69 {
        year += 2000;
    }

    if !(1..=31).contains(&day) || year < 1601 || hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    // Rejects impossible days such as Feb 30.
    let date = Date::from_calendar_date(year as i32, month, day as u8).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;
    Some(date.with_time(time).assume_utc())
}

fn weekday_abbr(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn month_abbr(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn format_http_date(t: OffsetDateTime) -> String {
    let t = t.to_offset(UtcOffset::UTC);
    format!(
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
        weekday_abbr(t.weekday()),
        t.day(),
        month_abbr(t.month()),
        t.year(),
        t.hour(),
        t.minute(),
        t.second()
    )
}
