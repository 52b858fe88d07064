use std::io::Write;

use tabled::settings::{
    object::{Columns, Rows},
    Alignment, Border,
};

use crate::{
    app::render::{render_summary_table, RenderTable},
    cas::Statement,
    util::rw::WriteHandle,
};

use super::model::{CasWriter, Error};

pub struct TextWriter {
    w: WriteHandle,
}

impl TextWriter {
    pub fn new(w: WriteHandle) -> TextWriter {
        TextWriter { w }
    }

    fn print_render_table(&mut self, title: &str, table_model: &RenderTable) -> Result<(), Error> {
        let map_write_err = |e| format!("{e}");

        writeln!(self.w, "{}", title).map_err(map_write_err)?;

        let mut table_bldr = tabled::builder::Builder::default();
        table_bldr.push_record(
            table_model
                .header
                .iter()
                .map(|h| h.to_uppercase())
                .collect::<Vec<String>>(),
        );
        let n_rows = table_model.rows.len();
        for row in &table_model.rows {
            table_bldr.push_record(row);
        }
        if !table_model.footer.is_empty() {
            table_bldr.push_record(table_model.footer.clone());
        }

        let mut table = table_bldr.build();
        table.with(tabled::settings::Style::ascii());
        // Center the header
        table.modify(Rows::first(), Alignment::center());
        // Numbers read better right-aligned
        table.modify(Columns::new(3..), Alignment::right());
        if !table_model.footer.is_empty() {
            // Footer sits after the header and all rows. Mark it off with
            // a double line.
            table.modify(
                Rows::single(n_rows + 1),
                Border::new().set_top('='),
            );
        }

        writeln!(self.w, "{table}").map_err(map_write_err)?;

        for note in &table_model.notes {
            writeln!(self.w, "{note}").map_err(map_write_err)?;
        }

        writeln!(self.w, "").map_err(map_write_err)?;
        Ok(())
    }
}

impl CasWriter for TextWriter {
    fn print_statement(&mut self, statement: &Statement) -> Result<(), Error> {
        let table_model = render_summary_table(statement);
        self.print_render_table("Scheme Summary", &table_model)
    }
}
