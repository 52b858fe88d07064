use rust_decimal::Decimal;

use crate::cas::Statement;
use crate::util::date::to_pretty_string;
use crate::util::decimal::dollar_precision_str;

#[derive(Default, PartialEq, Eq, Debug)]
pub struct RenderTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<String>,
    pub notes: Vec<String>,
}

fn opt_dec_str(d: &Option<Decimal>) -> String {
    d.map(|d| d.to_string()).unwrap_or_default()
}

fn s(st: &str) -> String {
    st.to_string()
}

/// One row per scheme, with its closing position and latest valuation.
///
/// Folio | AMC | Scheme | Open | Close | NAV date | NAV | Value
/// ...
///                                                Total | 12345.67
pub fn render_summary_table(statement: &Statement) -> RenderTable {
    let mut table = RenderTable::default();
    table.header.extend(
        ["Folio", "AMC", "Scheme", "Open", "Close", "NAV date", "NAV", "Value"]
            .into_iter()
            .map(String::from),
    );

    for folio in &statement.folios {
        for scheme in &folio.schemes {
            table.rows.push(vec![
                folio.id.clone(),
                folio.amc.clone().unwrap_or_default(),
                scheme.name.clone(),
                scheme.open_balance.to_string(),
                scheme.close_balance.to_string(),
                scheme
                    .valuation
                    .date
                    .map(|d| to_pretty_string(&d))
                    .unwrap_or_else(|| s("-")),
                scheme.valuation.nav.to_string(),
                dollar_precision_str(&scheme.valuation.value),
            ]);
        }
    }

    let mut footer = vec![String::new(); table.header.len() - 2];
    footer.push(s("Total"));
    footer.push(dollar_precision_str(&statement.total_valuation()));
    table.footer = footer;

    table.notes.push(format!(
        "Statement period: {} to {}",
        to_pretty_string(&statement.statement_period.from),
        to_pretty_string(&statement.statement_period.to)
    ));
    table
}

/// Flattens every transaction in the statement into a row, carrying the
/// folio and scheme it belongs to.
pub fn render_transactions_table(statement: &Statement) -> RenderTable {
    let mut table = RenderTable::default();
    table.header.extend(
        [
            "folio",
            "amc",
            "scheme",
            "rta_code",
            "isin",
            "date",
            "description",
            "amount",
            "units",
            "nav",
            "balance",
            "is_dividend_payout",
            "is_dividend_reinvestment",
            "dividend_rate",
        ]
        .into_iter()
        .map(String::from),
    );

    for folio in &statement.folios {
        for scheme in &folio.schemes {
            for tx in &scheme.transactions {
                table.rows.push(vec![
                    folio.id.clone(),
                    folio.amc.clone().unwrap_or_default(),
                    scheme.name.clone(),
                    scheme.rta_code.clone(),
                    scheme.isin.clone().unwrap_or_default(),
                    tx.date.to_string(),
                    tx.description.clone(),
                    tx.amount.to_string(),
                    opt_dec_str(&tx.units),
                    opt_dec_str(&tx.nav),
                    opt_dec_str(&tx.balance),
                    tx.is_dividend_payout.to_string(),
                    tx.is_dividend_reinvestment.to_string(),
                    opt_dec_str(&tx.dividend_rate),
                ]);
            }
        }
    }
    table
}
