use super::error::{CasParseError, CasResult};
use super::patterns::HEADER_RE;

/// The statement header is always within this many characters of the start.
pub const HEADER_SCAN_CHARS: usize = 1000;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct HeaderData {
    pub from: String,
    pub to: String,
}

/// The leading HEADER_SCAN_CHARS characters (not bytes) of the text.
pub fn header_region(text: &str) -> &str {
    match text.char_indices().nth(HEADER_SCAN_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Finds the statement period in the opening region of the statement.
/// The dates are returned as written; callers decide how to interpret them.
pub fn parse_header(text: &str) -> CasResult<HeaderData> {
    let region = header_region(text);
    match HEADER_RE.captures(region) {
        Some(m) => Ok(HeaderData {
            from: m["from"].to_string(),
            to: m["to"].to_string(),
        }),
        None => Err(CasParseError::HeaderParse(
            "No statement period found in header".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{header_region, parse_header, HeaderData, HEADER_SCAN_CHARS};
    use crate::cas::error::CasParseError;

    #[test]
    fn test_parse_header() {
        let hdr = parse_header(
            "Consolidated Account Statement\u{2029}01-Apr-2020 To 31-Mar-2021\u{2029}\
             Email Id: someone@example.com",
        )
        .unwrap();
        assert_eq!(
            hdr,
            HeaderData {
                from: "01-Apr-2020".to_string(),
                to: "31-Mar-2021".to_string(),
            }
        );

        // Line breaks between the dates are fine
        let hdr = parse_header("01-jan-2021\nto\n30-jun-2021").unwrap();
        assert_eq!(hdr.from, "01-jan-2021");
        assert_eq!(hdr.to, "30-jun-2021");
    }

    #[test]
    fn test_parse_header_missing() {
        let err = parse_header("Consolidated Account Statement\nNothing here").unwrap_err();
        assert_eq!(
            err,
            CasParseError::HeaderParse("No statement period found in header".to_string())
        );
        assert!(parse_header("").is_err());
    }

    #[test]
    fn test_header_only_looks_at_prefix() {
        let padding = "x".repeat(HEADER_SCAN_CHARS);
        let text = format!("{}01-Apr-2020 To 31-Mar-2021", padding);
        assert!(parse_header(&text).is_err());

        // Multi-byte characters count as one each
        let padding = "₹".repeat(HEADER_SCAN_CHARS - 30);
        let text = format!("{}01-Apr-2020 To 31-Mar-2021{}", padding, "₹".repeat(10));
        assert_eq!(header_region(&text).chars().count(), HEADER_SCAN_CHARS);
        assert!(parse_header(&text).is_ok());
    }
}
