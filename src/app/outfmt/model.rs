use crate::cas::Statement;

#[derive(PartialEq, Eq, Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// The full statement tree
    Json,
    /// One row per transaction
    Csv,
    /// A table of scheme balances and valuations
    Summary,
}

pub type Error = String;

pub trait CasWriter {
    fn print_statement(&mut self, statement: &Statement) -> Result<(), Error>;
}
