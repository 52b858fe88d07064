use lazy_static::lazy_static;
pub use time::Date;
use time::{macros::format_description, UtcOffset};

pub type StaticDateFormat<'a> =
    &'static [time::format_description::BorrowedFormatItem<'a>];

// Tried in order. Numeric forms are day-first, except when the year leads.
const LENIENT_DATE_FORMATS: &[StaticDateFormat] = &[
    // 01-Jan-2020, 1-January-2020
    format_description!(
        "[day padding:none]-[month repr:short case_sensitive:false]-[year]"
    ),
    format_description!(
        "[day padding:none]-[month repr:long case_sensitive:false]-[year]"
    ),
    // 01 Jan 2020
    format_description!(
        "[day padding:none] [month repr:short case_sensitive:false] [year]"
    ),
    format_description!(
        "[day padding:none] [month repr:long case_sensitive:false] [year]"
    ),
    // 01/01/2020, 01.01.2020, 01-01-2020
    format_description!("[day padding:none]/[month padding:none]/[year]"),
    format_description!("[day padding:none].[month padding:none].[year]"),
    format_description!("[day padding:none]-[month padding:none]-[year]"),
    // 2020-01-31, 2020/01/31
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[year]/[month padding:none]/[day padding:none]"),
    // January 5, 2020
    format_description!(
        "[month repr:long case_sensitive:false] [day padding:none], [year]"
    ),
    format_description!(
        "[month repr:short case_sensitive:false] [day padding:none], [year]"
    ),
];

lazy_static! {
    static ref SHORT_YEAR_DATE_RE: regex::Regex =
        regex::Regex::new(r"^(\d{1,2}\W+\w+\W+)(\d{2})$").unwrap();
}

fn parse_with_lenient_formats(date_str: &str) -> Result<Date, String> {
    let mut range_err: Option<time::error::Parse> = None;
    for fmt in LENIENT_DATE_FORMATS {
        match Date::parse(date_str, *fmt) {
            Ok(d) => return Ok(d),
            // The layout matched, but the values do not make a date
            Err(e @ time::error::Parse::TryFromParsed(_)) => {
                range_err.get_or_insert(e);
            }
            Err(_) => (),
        }
    }
    Err(match range_err {
        Some(e) => format!("Invalid date \"{}\": {}", date_str, e),
        None => format!("Unrecognized date \"{}\"", date_str),
    })
}

/// Parses the calendar dates found in statements, without being picky about
/// layout. Handles:
///   01-Jan-2020, 1-January-2020, 01 Jan 2020, 01/01/2020, 01.01.20,
///   2020-01-31, January 5, 2020
/// Month names are case-insensitive.
///
/// time will not build a Date from [year repr:last_two], so day-first dates
/// ending in a two-digit year are expanded to 20yy first.
pub fn parse_lenient_date(date_str: &str) -> Result<Date, String> {
    let trimmed = date_str.trim();
    match SHORT_YEAR_DATE_RE.captures(trimmed) {
        Some(m) => parse_with_lenient_formats(&format!("{}20{}", &m[1], &m[2])),
        None => parse_with_lenient_formats(trimmed),
    }
}

pub fn to_pretty_string(d: &Date) -> String {
    format!("{} {}, {}", d.month(), d.day(), d.year())
}

// This is a (possibly unsafe, but no worse than chrono's Local::now) way
// to get the current system UtcOffset of local timezone.
// Using UtcOffset::current_local_offset is apparently unsafe on Linux,
// and will return an error if used without enabling some "unsafe" feature.
pub fn local_utc_offset() -> Result<UtcOffset, time::error::ComponentRange> {
    let now = chrono::offset::Local::now();
    let offset = now.offset();
    UtcOffset::from_whole_seconds(-1 * offset.utc_minus_local())
}

#[cfg(test)]
mod tests {
    use time::{Date, Month};

    use super::{parse_lenient_date, to_pretty_string};

    fn ymd(y: i32, m: Month, d: u8) -> Date {
        Date::from_calendar_date(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_lenient_date() {
        let exp = ymd(2020, Month::January, 1);
        assert_eq!(parse_lenient_date("01-Jan-2020").unwrap(), exp);
        assert_eq!(parse_lenient_date("01-JAN-2020").unwrap(), exp);
        assert_eq!(parse_lenient_date("1-January-2020").unwrap(), exp);
        assert_eq!(parse_lenient_date("01 Jan 2020").unwrap(), exp);
        assert_eq!(parse_lenient_date("01/01/2020").unwrap(), exp);
        assert_eq!(parse_lenient_date("01.01.20").unwrap(), exp);
        assert_eq!(parse_lenient_date("2020-01-01").unwrap(), exp);
        assert_eq!(parse_lenient_date("January 1, 2020").unwrap(), exp);
        assert_eq!(parse_lenient_date(" 31-Mar-2021 ").unwrap(), ymd(2021, Month::March, 31));
        // Day first for numeric dates
        assert_eq!(parse_lenient_date("05/04/2021").unwrap(), ymd(2021, Month::April, 5));
    }

    #[test]
    fn test_parse_lenient_date_errors() {
        assert!(parse_lenient_date("").is_err());
        assert!(parse_lenient_date("01-Jan").is_err());
        assert!(parse_lenient_date("31-Feb-2020").is_err());
        assert!(parse_lenient_date("01-Foo-2020").is_err());
        assert!(parse_lenient_date("01-13-2020").is_err());
        assert!(parse_lenient_date("01-Jan-120").is_err());
    }

    #[test]
    fn test_parse_lenient_date_more_layouts() {
        assert_eq!(parse_lenient_date("5 Apr 21").unwrap(), ymd(2021, Month::April, 5));
        assert_eq!(parse_lenient_date("2021/04/05").unwrap(), ymd(2021, Month::April, 5));
        assert_eq!(parse_lenient_date("Apr 5, 2021").unwrap(), ymd(2021, Month::April, 5));
        assert_eq!(parse_lenient_date("5-4-2021").unwrap(), ymd(2021, Month::April, 5));
    }

    #[test]
    fn test_parse_lenient_date_error_text() {
        let err = parse_lenient_date("31-Feb-2020").unwrap_err();
        assert!(err.starts_with("Invalid date \"31-Feb-2020\""), "{}", err);
        assert_eq!(
            parse_lenient_date("sometime").unwrap_err(),
            "Unrecognized date \"sometime\""
        );
    }

    #[test]
    fn test_to_pretty_string() {
        assert_eq!(
            to_pretty_string(&ymd(2024, Month::March, 1)),
            "March 1, 2024"
        );
    }
}
