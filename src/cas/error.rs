use thiserror::Error;

#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum CasParseError {
    /// The opening text does not carry a recognizable statement period.
    #[error("Error parsing CAS header: {0}")]
    HeaderParse(String),

    /// The document structure is out of order (eg. a scheme with no folio).
    #[error("Layout error: {0}")]
    LayoutOrder(String),

    /// A line matched, but one of its captured values could not be converted.
    #[error("Invalid {field} \"{value}\": {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

pub type CasResult<T> = Result<T, CasParseError>;
