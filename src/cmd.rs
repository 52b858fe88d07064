use std::{io::Write, path::PathBuf};

use clap::Parser;

use crate::app::outfmt::{
    csv::CsvWriter,
    json::JsonWriter,
    model::{CasWriter, OutputFormat},
    text::TextWriter,
};
use crate::util::rw::WriteHandle;

const ABOUT: &str = "Mutual fund Consolidated Account Statement (CAS) parser";

fn get_long_about() -> String {
    format!(
        "\
Parses the text of a mutual fund Consolidated Account Statement (CAS) into
folios, schemes and their transactions.

The input is the text already extracted from the statement document, with
logical lines separated by U+2029 (paragraph separator) and table cells by
two tabs.

All amounts, units and NAVs are reported exactly as written in the statement.

Set {}=casparse=debug (or use --debug) to see how lines are classified.",
        crate::tracing::TRACE_ENV_VAR
    )
}

#[derive(Parser, Debug)]
#[command(version = crate::app::CASPARSE_APP_VERSION,
          about = ABOUT, long_about = get_long_about())]
pub struct Args {
    /// Extracted CAS text file
    #[arg(required = true)]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Log parser decisions to stderr
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

pub fn run_with_args(args: Args, out_w: WriteHandle, mut err_w: WriteHandle) -> Result<(), ()> {
    tracing::info!("Parsing {}...", args.file.to_string_lossy());

    let text = std::fs::read_to_string(&args.file).map_err(|e| {
        let _ = writeln!(err_w, "Error reading {}: {}", args.file.to_string_lossy(), e);
    })?;

    let statement = crate::cas::parse_cas_text(&text).map_err(|e| {
        let _ = writeln!(err_w, "Error parsing {}: {}", args.file.to_string_lossy(), e);
    })?;
    tracing::info!(
        "Parsed {} folios from {}",
        statement.folios.len(),
        args.file.to_string_lossy()
    );

    let mut printer: Box<dyn CasWriter> = match args.output {
        OutputFormat::Json => Box::new(JsonWriter::new(out_w)),
        OutputFormat::Csv => Box::new(CsvWriter::new_to_writer(out_w)),
        OutputFormat::Summary => Box::new(TextWriter::new(out_w)),
    };
    printer.print_statement(&statement).map_err(|e| {
        let _ = writeln!(err_w, "Error writing output: {}", e);
    })
}

pub fn command_main() -> Result<(), ()> {
    let args = Args::parse();

    if args.debug || crate::util::sys::env_var_non_empty("CASPARSE_DEBUG") {
        crate::tracing::enable_trace_env("casparse=debug");
    }
    crate::tracing::setup_tracing();

    run_with_args(
        args,
        WriteHandle::stdout_write_handle(),
        WriteHandle::stderr_write_handle(),
    )
}
