use crate::{app::render::render_transactions_table, cas::Statement, util::rw::WriteHandle};

use super::model::{CasWriter, Error};

/// Writes every transaction as a csv row.
pub struct CsvWriter {
    w: WriteHandle,
}

impl CsvWriter {
    pub fn new_to_writer(w: WriteHandle) -> CsvWriter {
        CsvWriter { w }
    }
}

impl CasWriter for CsvWriter {
    fn print_statement(&mut self, statement: &Statement) -> Result<(), Error> {
        let table_model = render_transactions_table(statement);

        let mut csv_w = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(self.w.clone());

        csv_w
            .write_record(&table_model.header)
            .map_err(|e| e.to_string())?;
        for row in &table_model.rows {
            csv_w.write_record(row).map_err(|e| e.to_string())?;
        }

        csv_w.flush().map_err(|e| e.to_string())?;

        Ok(())
    }
}
