use std::io::Write;

use crate::{cas::Statement, util::rw::WriteHandle};

use super::model::{CasWriter, Error};

pub struct JsonWriter {
    w: WriteHandle,
}

impl JsonWriter {
    pub fn new(w: WriteHandle) -> JsonWriter {
        JsonWriter { w }
    }
}

impl CasWriter for JsonWriter {
    fn print_statement(&mut self, statement: &Statement) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut self.w, statement)
            .map_err(|e| format!("Failed to write JSON: {e}"))?;
        writeln!(self.w).map_err(|e| e.to_string())?;
        Ok(())
    }
}
