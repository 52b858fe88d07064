pub mod dividend;
pub mod error;
pub mod header;
pub mod model;
pub mod parser;
pub mod patterns;

pub use error::{CasParseError, CasResult};
pub use model::{Folio, Scheme, Statement, StatementPeriod, Transaction, Valuation};
pub use parser::parse_cas_text;
