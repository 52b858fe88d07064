// Line recognition patterns for CAS text.
//
// The extracted text separates table cells with a double tab, and logical
// lines with U+2029. Patterns that span physical lines use (?s).

use lazy_static::lazy_static;
use regex::Regex;

// 01-Jan-2020
const DATE: &str = r"\d{1,2}-[A-Za-z]{3}-\d{4}";
// 1,234.50  (1,234.50)  -1,234.50
const SIGNED_AMT: &str = r"\(?-?[\d,]*\d(?:\.\d+)?\)?";
const UNSIGNED_AMT: &str = r"[\d,]*\d(?:\.\d+)?";

lazy_static! {
    pub static ref HEADER_RE: Regex = Regex::new(&format!(
        r"(?is)(?P<from>{DATE})\s+to\s+(?P<to>{DATE})"
    ))
    .unwrap();

    // Free text that wrapped onto a following physical line, up to the next
    // cell break.
    pub static ref DESCRIPTION_TAIL_RE: Regex =
        Regex::new(r"(?is)(\n.+?)(?:\t\t|$)").unwrap();

    // "HDFC Mutual Fund", "Axis MF"
    pub static ref AMC_RE: Regex =
        Regex::new(r"(?is)^\s*(?P<amc>.+?\s+(?:MF|Mutual\s+Fund))\s*$").unwrap();

    // Folio No: 1234567 / 89  PAN: ABCDE1234F  KYC: OK  PAN: OK
    pub static ref FOLIO_RE: Regex = Regex::new(concat!(
        r"(?i)Folio\s+No\s*:\s*(?P<folio>[\d/\s]*\d)\s+",
        r"(?:.*?PAN\s*:\s*(?P<pan>[A-Z]{5}\d{4}[A-Z])\b)?",
        r".*?KYC\s*:\s*(?P<kyc>OK|NOT\s+OK)\s*PAN\s*:\s*(?P<pankyc>OK|NOT\s+OK)",
    ))
    .unwrap();

    // B205RG-Axis Long Term Equity Fund - Growth - ISIN: INF846K01131(Advisor: ARN-0000) Registrar : KFINTECH
    pub static ref SCHEME_RE: Regex = Regex::new(concat!(
        r"(?ism)^\s*(?P<code>[a-z0-9]+)\s*-\s*(?P<name>.+?)",
        r"(?:\s*-\s*ISIN\s*:\s*(?P<isin>[a-z]{2}[a-z0-9]{9}\d))?",
        r"\s*(?:\(\s*Advisor\s*:\s*(?P<advisor>.+?)\s*\))?",
        r"\s+Registrar\s*:\s*(?P<rta>.+?)\s*$",
    ))
    .unwrap();

    pub static ref FORMERLY_RE: Regex = Regex::new(r"(?is)\(formerly.+?\)").unwrap();

    pub static ref OPEN_UNITS_RE: Regex = Regex::new(&format!(
        r"(?i)Opening\s+Unit\s+Balance\s*:?\s*(?P<units>{UNSIGNED_AMT})"
    ))
    .unwrap();

    pub static ref CLOSE_UNITS_RE: Regex = Regex::new(&format!(
        r"(?i)Closing\s+Unit\s+Balance\s*:?\s*(?P<units>{UNSIGNED_AMT})"
    ))
    .unwrap();

    pub static ref VALUATION_RE: Regex = Regex::new(&format!(
        r"(?i)Valuation\s+on\s+(?P<date>{DATE})\s*:\s*INR\s*(?P<value>{UNSIGNED_AMT})"
    ))
    .unwrap();

    pub static ref NAV_RE: Regex = Regex::new(&format!(
        r"(?i)\bNAV\s+on\s+(?P<date>{DATE})\s*:\s*INR\s*(?P<nav>{UNSIGNED_AMT})"
    ))
    .unwrap();

    // date \t\t description \t\t amount [\t\t units \t\t nav \t\t balance]
    pub static ref TRANSACTION_RE: Regex = Regex::new(&format!(
        concat!(
            r"(?s)(?P<date>{date})\t\t(?P<desc>[^0-9\t].*?)\t\t(?P<amount>{samt})",
            r"(?:\t\t(?P<units>{samt})\t\t(?P<nav>{uamt})\t\t(?P<balance>{samt}))?",
        ),
        date = DATE,
        samt = SIGNED_AMT,
        uamt = UNSIGNED_AMT,
    ))
    .unwrap();

    // "Dividend Reinvestment @ Rs. 2.50 per unit", "IDCW Payout @ Rs.0.10"
    pub static ref DIVIDEND_RE: Regex = Regex::new(concat!(
        r"(?is)(?:div\.|dividend|idcw)",
        r"(?:.*?(?P<reinvest>reinv))?",
        r"(?:.*?@\s*Rs\.?\s*(?P<rate>\d+(?:\.\d+)?))?",
    ))
    .unwrap();

    // A dividend word alone may just name the plan ("Purchase - IDCW Plan")
    pub static ref DIVIDEND_PAYOUT_RE: Regex =
        Regex::new(r"(?i)\b(?:payout|paid)\b").unwrap();
}
