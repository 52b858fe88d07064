use std::collections::HashMap;

use rust_decimal::Decimal;
use time::Date;

use super::dividend::classify_dividend;
use super::error::{CasParseError, CasResult};
use super::header::parse_header;
use super::model::{Folio, Scheme, Statement, StatementPeriod, Transaction, Valuation};
use super::patterns::{
    AMC_RE, CLOSE_UNITS_RE, DESCRIPTION_TAIL_RE, FOLIO_RE, FORMERLY_RE, NAV_RE,
    OPEN_UNITS_RE, SCHEME_RE, TRANSACTION_RE, VALUATION_RE,
};
use crate::util::{date::parse_lenient_date, decimal::parse_cas_decimal};

/// Logical lines in extracted CAS text are delimited by the unicode
/// paragraph separator. A logical line may span several physical lines.
pub const LINE_SEPARATOR: char = '\u{2029}';

pub fn segment_lines(text: &str) -> std::str::Split<'_, char> {
    text.split(LINE_SEPARATOR)
}

fn dec_field(field: &'static str, s: &str) -> CasResult<Decimal> {
    parse_cas_decimal(s).map_err(|reason| CasParseError::InvalidValue {
        field,
        value: s.to_string(),
        reason,
    })
}

fn opt_dec_field(field: &'static str, s: Option<&str>) -> CasResult<Option<Decimal>> {
    s.map(|s| dec_field(field, s)).transpose()
}

fn date_field(field: &'static str, s: &str) -> CasResult<Date> {
    parse_lenient_date(s).map_err(|reason| CasParseError::InvalidValue {
        field,
        value: s.to_string(),
        reason,
    })
}

fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

// MARK: line-level classification

/// A line with any wrapped description tail pulled out of it.
struct SplitLine<'a> {
    body: std::borrow::Cow<'a, str>,
    description_tail: Option<String>,
}

fn split_description_tail(line: &str) -> SplitLine<'_> {
    if let Some(m) = DESCRIPTION_TAIL_RE.captures(line) {
        let raw_tail = m.get(1).map(|t| t.as_str().trim_end()).unwrap_or_default();
        let tail = raw_tail.trim();
        if !tail.is_empty() {
            return SplitLine {
                body: std::borrow::Cow::Owned(line.replace(raw_tail, "")),
                description_tail: Some(tail.to_string()),
            };
        }
    }
    SplitLine {
        body: std::borrow::Cow::Borrowed(line),
        description_tail: None,
    }
}

#[derive(PartialEq, Eq, Debug)]
struct FolioLine {
    id: String,
    pan: Option<String>,
    kyc_status: String,
    pan_kyc_status: String,
}

#[derive(PartialEq, Eq, Debug)]
struct SchemeHeader {
    rta_code: String,
    name: String,
    advisor: Option<String>,
    rta: String,
    isin: Option<String>,
}

/// Lines which change which folio or scheme we are in. At most one of these
/// is recognized per line, in this order.
#[derive(PartialEq, Eq, Debug)]
enum StructuralLine {
    Amc(String),
    Folio(FolioLine),
    Scheme(SchemeHeader),
    Other,
}

fn classify_structural(line: &str) -> StructuralLine {
    if let Some(m) = AMC_RE.captures(line) {
        StructuralLine::Amc(m["amc"].trim().to_string())
    } else if let Some(m) = FOLIO_RE.captures(line) {
        StructuralLine::Folio(FolioLine {
            id: m["folio"].trim().to_string(),
            pan: m.name("pan").map(|p| p.as_str().trim().to_string()),
            kyc_status: squash_whitespace(&m["kyc"]),
            pan_kyc_status: squash_whitespace(&m["pankyc"]),
        })
    } else if let Some(m) = SCHEME_RE.captures(line) {
        let name = squash_whitespace(&FORMERLY_RE.replace_all(&m["name"], ""));
        StructuralLine::Scheme(SchemeHeader {
            rta_code: m["code"].trim().to_string(),
            name,
            advisor: m.name("advisor").map(|a| a.as_str().trim().to_string()),
            rta: m["rta"].trim().to_string(),
            isin: m.name("isin").map(|i| i.as_str().to_uppercase()),
        })
    } else {
        StructuralLine::Other
    }
}

/// Lines which contribute data to the open scheme.
#[derive(PartialEq, Eq, Debug)]
enum SchemeLine {
    OpenUnits(Decimal),
    CloseUnits(Decimal),
    Valuation { date: Date, value: Decimal },
    Nav { date: Date, nav: Decimal },
    Transaction(Transaction),
}

impl SchemeLine {
    /// Whether later classifiers are skipped for the rest of the line.
    /// Closing balances share a line with the valuation and NAV, so those
    /// still need to be looked at.
    fn ends_line(&self) -> bool {
        matches!(self, SchemeLine::OpenUnits(_) | SchemeLine::Nav { .. })
    }
}

type SchemeLineClassifier = fn(&str, Option<&str>) -> CasResult<Option<SchemeLine>>;

fn classify_open_units(line: &str, _: Option<&str>) -> CasResult<Option<SchemeLine>> {
    match OPEN_UNITS_RE.captures(line) {
        Some(m) => Ok(Some(SchemeLine::OpenUnits(dec_field("opening units", &m["units"])?))),
        None => Ok(None),
    }
}

fn classify_close_units(line: &str, _: Option<&str>) -> CasResult<Option<SchemeLine>> {
    match CLOSE_UNITS_RE.captures(line) {
        Some(m) => Ok(Some(SchemeLine::CloseUnits(dec_field("closing units", &m["units"])?))),
        None => Ok(None),
    }
}

fn classify_valuation(line: &str, _: Option<&str>) -> CasResult<Option<SchemeLine>> {
    match VALUATION_RE.captures(line) {
        Some(m) => Ok(Some(SchemeLine::Valuation {
            date: date_field("valuation date", &m["date"])?,
            value: dec_field("valuation", &m["value"])?,
        })),
        None => Ok(None),
    }
}

fn classify_nav(line: &str, _: Option<&str>) -> CasResult<Option<SchemeLine>> {
    match NAV_RE.captures(line) {
        Some(m) => Ok(Some(SchemeLine::Nav {
            date: date_field("NAV date", &m["date"])?,
            nav: dec_field("NAV", &m["nav"])?,
        })),
        None => Ok(None),
    }
}

fn classify_transaction(
    line: &str,
    description_tail: Option<&str>,
) -> CasResult<Option<SchemeLine>> {
    let m = match TRANSACTION_RE.captures(line) {
        Some(m) => m,
        None => return Ok(None),
    };

    let description = match description_tail {
        Some(tail) => format!("{} {}", m["desc"].trim(), tail),
        None => m["desc"].trim().to_string(),
    };
    let dividend = classify_dividend(&description)?;

    Ok(Some(SchemeLine::Transaction(Transaction {
        date: date_field("transaction date", &m["date"])?,
        amount: dec_field("amount", &m["amount"])?,
        units: opt_dec_field("units", m.name("units").map(|u| u.as_str()))?,
        nav: opt_dec_field("NAV", m.name("nav").map(|n| n.as_str()))?,
        balance: opt_dec_field("balance", m.name("balance").map(|b| b.as_str()))?,
        description,
        is_dividend_payout: dividend.is_payout,
        is_dividend_reinvestment: dividend.is_reinvestment,
        dividend_rate: dividend.rate,
    })))
}

const SCHEME_LINE_CLASSIFIERS: [SchemeLineClassifier; 5] = [
    classify_open_units,
    classify_close_units,
    classify_valuation,
    classify_nav,
    classify_transaction,
];

// MARK: state machine

struct OpenScheme {
    folio_idx: usize,
    scheme: Scheme,
}

/// All mutable state of a single parse.
///
/// Invariant: an open scheme always belongs to the current folio.
struct ParserState {
    current_amc: Option<String>,
    folios: Vec<Folio>,
    folio_indices: HashMap<String, usize>,
    current_folio: Option<usize>,
    open_scheme: Option<OpenScheme>,
    // Last reported unit balance of the open scheme
    running_balance: Decimal,
}

impl ParserState {
    fn new() -> Self {
        ParserState {
            current_amc: None,
            folios: Vec::new(),
            folio_indices: HashMap::new(),
            current_folio: None,
            open_scheme: None,
            running_balance: Decimal::ZERO,
        }
    }

    /// Moves the open scheme (if any) into its folio.
    fn flush_scheme(&mut self) {
        if let Some(open) = self.open_scheme.take() {
            let folio = &mut self.folios[open.folio_idx];
            tracing::debug!(
                "Closing scheme \"{}\" in folio {} with {} transactions",
                open.scheme.name,
                folio.id,
                open.scheme.transactions.len()
            );
            folio.schemes.push(open.scheme);
        }
    }

    fn enter_folio(&mut self, fl: FolioLine) {
        if let Some(idx) = self.current_folio {
            if self.folios[idx].id == fl.id {
                return;
            }
        }
        self.flush_scheme();

        let idx = match self.folio_indices.get(&fl.id) {
            Some(idx) => {
                tracing::debug!("Returning to folio {}", fl.id);
                *idx
            }
            None => {
                tracing::debug!("Opening folio {} ({:?})", fl.id, self.current_amc);
                self.folios.push(Folio {
                    id: fl.id.clone(),
                    amc: self.current_amc.clone(),
                    pan: fl.pan,
                    kyc_status: fl.kyc_status,
                    pan_kyc_status: fl.pan_kyc_status,
                    schemes: Vec::new(),
                });
                let idx = self.folios.len() - 1;
                self.folio_indices.insert(fl.id, idx);
                idx
            }
        };
        self.current_folio = Some(idx);
    }

    fn enter_scheme(&mut self, hdr: SchemeHeader) -> CasResult<()> {
        let folio_idx = self.current_folio.ok_or_else(|| {
            CasParseError::LayoutOrder(format!(
                "Scheme \"{}\" found before folio entry",
                hdr.name
            ))
        })?;

        if let Some(open) = &self.open_scheme {
            if open.scheme.name == hdr.name {
                return Ok(());
            }
        }
        self.flush_scheme();

        tracing::debug!("Opening scheme \"{}\" ({})", hdr.name, hdr.rta_code);
        self.open_scheme = Some(OpenScheme {
            folio_idx,
            scheme: Scheme {
                name: hdr.name,
                advisor: hdr.advisor,
                rta_code: hdr.rta_code,
                rta: hdr.rta,
                isin: hdr.isin,
                open_balance: Decimal::ZERO,
                close_balance: Decimal::ZERO,
                valuation: Valuation::default(),
                transactions: Vec::new(),
            },
        });
        self.running_balance = Decimal::ZERO;
        Ok(())
    }

    fn apply_scheme_line(&mut self, sl: SchemeLine) {
        let scheme = match &mut self.open_scheme {
            Some(open) => &mut open.scheme,
            None => return,
        };
        match sl {
            SchemeLine::OpenUnits(units) => scheme.open_balance = units,
            SchemeLine::CloseUnits(units) => scheme.close_balance = units,
            SchemeLine::Valuation { date, value } => {
                scheme.valuation.date = Some(date);
                scheme.valuation.value = value;
            }
            SchemeLine::Nav { date, nav } => {
                scheme.valuation.date = Some(date);
                scheme.valuation.nav = nav;
            }
            SchemeLine::Transaction(tx) => {
                match tx.balance {
                    Some(bal) => self.running_balance = bal,
                    None => tracing::trace!(
                        "Amount-only transaction \"{}\" (unit balance stays {})",
                        tx.description,
                        self.running_balance
                    ),
                }
                scheme.transactions.push(tx);
            }
        }
    }

    fn process_line(&mut self, line: &str) -> CasResult<()> {
        let SplitLine { body, description_tail } = split_description_tail(line);
        let body: &str = body.as_ref();

        match classify_structural(body) {
            StructuralLine::Amc(amc) => {
                tracing::trace!("AMC line: {}", amc);
                self.current_amc = Some(amc);
            }
            StructuralLine::Folio(fl) => self.enter_folio(fl),
            StructuralLine::Scheme(hdr) => self.enter_scheme(hdr)?,
            StructuralLine::Other => (),
        }

        if self.open_scheme.is_none() {
            return Ok(());
        }

        for classify in SCHEME_LINE_CLASSIFIERS {
            if let Some(sl) = classify(body, description_tail.as_deref())? {
                tracing::trace!("Scheme line: {:?}", sl);
                let ends_line = sl.ends_line();
                self.apply_scheme_line(sl);
                if ends_line {
                    break;
                }
            }
        }
        Ok(())
    }

    fn finish(mut self, statement_period: StatementPeriod) -> Statement {
        self.flush_scheme();
        Statement {
            statement_period,
            folios: self.folios,
        }
    }
}

fn parse_statement_period(text: &str) -> CasResult<StatementPeriod> {
    let hdr = parse_header(text)?;
    let as_header_err = |what: &str, s: &str, e: String| {
        CasParseError::HeaderParse(format!("Invalid {} date \"{}\": {}", what, s, e))
    };
    Ok(StatementPeriod {
        from: parse_lenient_date(&hdr.from).map_err(|e| as_header_err("from", &hdr.from, e))?,
        to: parse_lenient_date(&hdr.to).map_err(|e| as_header_err("to", &hdr.to, e))?,
    })
}

/// Parses the extracted text of a CAS into folios, schemes and transactions.
///
/// The text must use U+2029 between logical lines, and double tabs between
/// table cells. Unrecognized lines are ignored. Either the whole statement is
/// produced, or an error is returned.
///
/// Descriptions are whitespace-normalized: the part of a description that
/// wrapped onto the next physical line is trimmed and joined on with a single
/// space.
pub fn parse_cas_text(text: &str) -> CasResult<Statement> {
    let statement_period = parse_statement_period(text)?;
    tracing::debug!(
        "Statement period {} to {}",
        statement_period.from,
        statement_period.to
    );

    let mut state = ParserState::new();
    for line in segment_lines(text) {
        state.process_line(line)?;
    }
    Ok(state.finish(statement_period))
}

// MARK: tests
