use rust_decimal::Decimal;

use super::error::{CasParseError, CasResult};
use super::patterns::{DIVIDEND_PAYOUT_RE, DIVIDEND_RE};
use crate::util::decimal::parse_cas_decimal;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct DividendInfo {
    pub is_payout: bool,
    pub is_reinvestment: bool,
    pub rate: Option<Decimal>,
}

/// Classifies a transaction description as a dividend payout, a dividend
/// reinvestment, or neither (all fields cleared).
/// A dividend without a reinvestment marker is treated as a payout. A dividend
/// word with no rate, reinvestment or payout marker is only a plan name.
pub fn classify_dividend(description: &str) -> CasResult<DividendInfo> {
    let m = match DIVIDEND_RE.captures(description) {
        Some(m) => m,
        None => return Ok(DividendInfo::default()),
    };

    let is_reinvestment = m.name("reinvest").is_some();
    if !is_reinvestment && m.name("rate").is_none() && !DIVIDEND_PAYOUT_RE.is_match(description) {
        return Ok(DividendInfo::default());
    }
    let rate = match m.name("rate") {
        Some(r) => Some(parse_cas_decimal(r.as_str()).map_err(|e| {
            CasParseError::InvalidValue {
                field: "dividend rate",
                value: r.as_str().to_string(),
                reason: e,
            }
        })?),
        None => None,
    };

    Ok(DividendInfo {
        is_payout: !is_reinvestment,
        is_reinvestment,
        rate,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{classify_dividend, DividendInfo};

    #[test]
    fn test_reinvestment() {
        assert_eq!(
            classify_dividend("Dividend Reinvestment @ Rs. 2.50 per unit").unwrap(),
            DividendInfo {
                is_payout: false,
                is_reinvestment: true,
                rate: Some(dec!(2.50)),
            }
        );
        assert_eq!(
            classify_dividend("IDCW REINVESTED @ Rs.0.0450 per unit").unwrap(),
            DividendInfo {
                is_payout: false,
                is_reinvestment: true,
                rate: Some(dec!(0.0450)),
            }
        );
    }

    #[test]
    fn test_payout() {
        assert_eq!(
            classify_dividend("Div. Paid @ Rs. 1.25 per unit").unwrap(),
            DividendInfo {
                is_payout: true,
                is_reinvestment: false,
                rate: Some(dec!(1.25)),
            }
        );
        assert_eq!(
            classify_dividend("Dividend Payout").unwrap(),
            DividendInfo {
                is_payout: true,
                is_reinvestment: false,
                rate: None,
            }
        );
    }

    #[test]
    fn test_not_dividend() {
        for desc in [
            "Purchase - SIP",
            "Redemption",
            "*** Stamp Duty ***",
            "",
            "Purchase - IDCW Plan",
            "Systematic Investment - Dividend Option",
        ] {
            let info = classify_dividend(desc).unwrap();
            assert_eq!(info, DividendInfo::default());
            assert!(!info.is_payout && !info.is_reinvestment);
            assert_eq!(info.rate, None);
        }
    }
}
