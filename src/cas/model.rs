use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct StatementPeriod {
    pub from: Date,
    pub to: Date,
}

/// A fully parsed statement. Folios are in the order they were first seen.
#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct Statement {
    pub statement_period: StatementPeriod,
    pub folios: Vec<Folio>,
}

impl Statement {
    /// Sum of the latest valuation of every scheme in the statement.
    pub fn total_valuation(&self) -> Decimal {
        self.folios
            .iter()
            .flat_map(|f| f.schemes.iter())
            .map(|s| s.valuation.value)
            .sum()
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct Folio {
    #[serde(rename = "folio")]
    pub id: String,
    pub amc: Option<String>,
    #[serde(rename = "PAN")]
    pub pan: Option<String>,
    #[serde(rename = "KYC")]
    pub kyc_status: String,
    #[serde(rename = "PANKYC")]
    pub pan_kyc_status: String,
    pub schemes: Vec<Scheme>,
}

impl Folio {
    pub fn scheme_names(&self) -> Vec<&str> {
        self.schemes.iter().map(|s| s.name.as_str()).collect()
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct Scheme {
    #[serde(rename = "scheme")]
    pub name: String,
    pub advisor: Option<String>,
    pub rta_code: String,
    pub rta: String,
    pub isin: Option<String>,
    #[serde(rename = "open")]
    pub open_balance: Decimal,
    #[serde(rename = "close")]
    pub close_balance: Decimal,
    pub valuation: Valuation,
    pub transactions: Vec<Transaction>,
}

/// Most recent valuation seen for a scheme. Starts zeroed, with no date.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize)]
pub struct Valuation {
    pub date: Option<Date>,
    pub value: Decimal,
    pub nav: Decimal,
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct Transaction {
    pub date: Date,
    pub description: String,
    pub amount: Decimal,
    // units, nav and balance are only present on unit-bearing rows.
    // Pure charges (stamp duty, STT, etc.) carry just an amount.
    pub units: Option<Decimal>,
    pub nav: Option<Decimal>,
    pub balance: Option<Decimal>,
    pub is_dividend_payout: bool,
    pub is_dividend_reinvestment: bool,
    pub dividend_rate: Option<Decimal>,
}
