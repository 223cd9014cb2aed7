//! # sidcop-label
//!
//! Reads an invoice as JSON and writes its ZPL label.
//!
//! ## Usage
//! ```bash
//! # stdin to stdout
//! sidcop-label < factura.json > factura.zpl
//!
//! # files, with a frozen clock for reproducible output
//! sidcop-label --input factura.json --output factura.zpl --now 2026-03-14T15:45:00
//!
//! # check the legal wording of an amount
//! sidcop-label --words 1234.56
//! ```
//!
//! ## Log Levels
//! Logs go to stderr so stdout carries only markup.
//! - `RUST_LOG=debug` - per-section layout events and audit findings
//! - Default: INFO level

mod config;
mod error;

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDateTime;
use sidcop_core::format::{local_now, parse_timestamp};
use sidcop_core::{to_words, InvoiceDocument, LabelBuilder, Money};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

const USAGE: &str = "\
Usage: sidcop-label [OPTIONS]

Options:
  -i, --input <FILE>      Invoice JSON (default: stdin, or '-')
  -o, --output <FILE>     Write the label here (default: stdout)
  -c, --config <FILE>     label.toml to use instead of the platform default
      --now <TIMESTAMP>   Clock used when the invoice has no usable date
      --words <AMOUNT>    Print the amount in words and exit
  -h, --help              Show this help message";

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    now: Option<String>,
    words: Option<String>,
    help: bool,
}

impl Args {
    /// Parses arguments, program name excluded.
    fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => {
                    let value = required_value(&arg, args.next())?;
                    parsed.input = (value != "-").then(|| PathBuf::from(value));
                }
                "--output" | "-o" => parsed.output = Some(required_value(&arg, args.next())?.into()),
                "--config" | "-c" => parsed.config = Some(required_value(&arg, args.next())?.into()),
                "--now" => parsed.now = Some(required_value(&arg, args.next())?),
                "--words" => parsed.words = Some(required_value(&arg, args.next())?),
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(CliError::InvalidArgument(format!(
                        "unknown option '{}'",
                        other
                    )))
                }
            }
        }

        Ok(parsed)
    }
}

fn required_value(flag: &str, value: Option<String>) -> CliResult<String> {
    value.ok_or_else(|| CliError::InvalidArgument(format!("{} requires a value", flag)))
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> ExitCode {
    init_tracing();

    let result = Args::parse(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sidcop-label: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> CliResult<()> {
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if let Some(amount) = &args.words {
        let amount: Money = amount.parse()?;
        println!("{}", to_words(amount));
        return Ok(());
    }

    let config = CliConfig::load(args.config.clone())?;
    let offset = config.label.utc_offset_minutes;

    let now = match &args.now {
        Some(raw) => parse_now(raw, offset)?,
        None => local_now(offset),
    };

    let json = read_input(args.input.as_ref())?;
    let invoice = InvoiceDocument::from_json(&json)?;

    let label = LabelBuilder::new(config.label).build(&invoice, now);
    write_output(args.output.as_ref(), &label.markup)?;

    info!(
        output = ?args.output,
        height = label.height,
        items = label.item_count,
        "Label written"
    );
    Ok(())
}

fn parse_now(raw: &str, utc_offset_minutes: i32) -> CliResult<NaiveDateTime> {
    parse_timestamp(raw, utc_offset_minutes)
        .ok_or_else(|| CliError::InvalidArgument(format!("--now: unrecognized timestamp '{}'", raw)))
}

fn read_input(path: Option<&PathBuf>) -> CliResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("{}: {}", path.display(), e))),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&PathBuf>, markup: &str) -> CliResult<()> {
    match path {
        Some(path) => std::fs::write(path, markup)
            .map_err(|e| CliError::Io(format!("{}: {}", path.display(), e))),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(markup.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> CliResult<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_all_flags() {
        let parsed = args(&[
            "--input", "factura.json", "-o", "factura.zpl", "--config", "label.toml", "--now",
            "2026-03-14T15:45:00",
        ])
        .unwrap();
        assert_eq!(parsed.input, Some(PathBuf::from("factura.json")));
        assert_eq!(parsed.output, Some(PathBuf::from("factura.zpl")));
        assert_eq!(parsed.config, Some(PathBuf::from("label.toml")));
        assert_eq!(parsed.now.as_deref(), Some("2026-03-14T15:45:00"));
    }

    #[test]
    fn test_dash_means_stdin() {
        assert_eq!(args(&["-i", "-"]).unwrap().input, None);
    }

    #[test]
    fn test_unknown_flag() {
        let err = args(&["--printer", "usb"]).unwrap_err();
        assert!(err.to_string().contains("unknown option '--printer'"));
    }

    #[test]
    fn test_missing_value() {
        assert!(matches!(args(&["--output"]), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_bad_now() {
        assert!(matches!(parse_now("mañana", -360), Err(CliError::InvalidArgument(_))));
        assert!(parse_now("2026-03-14", -360).is_ok());
    }

    #[test]
    fn test_bad_words_amount() {
        let result = run(Args {
            words: Some("mil".to_string()),
            ..Args::default()
        });
        assert!(matches!(result, Err(CliError::Core(_))));
    }

    #[test]
    fn test_run_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("factura.json");
        let output = dir.path().join("factura.zpl");
        let config = dir.path().join("label.toml");
        std::fs::write(
            &input,
            r#"{"number": "000-001-01-00000042", "items": [{"description": "Pan Blanco", "quantity": 1, "unitPrice": 35}], "totals": {"total": 35}}"#,
        )
        .unwrap();
        std::fs::write(&config, "[label]\npromo_message = \"Vuelva pronto\"\n").unwrap();

        run(Args {
            input: Some(input),
            output: Some(output.clone()),
            config: Some(config),
            now: Some("2026-03-14T15:45:00".to_string()),
            ..Args::default()
        })
        .unwrap();

        let markup = std::fs::read_to_string(output).unwrap();
        assert!(markup.starts_with("^XA\n^LL"));
        assert!(markup.contains("Total: L35.00"));
        assert!(markup.contains("Son: treinta y cinco Lempiras"));
        assert!(markup.contains("Vuelva pronto"));
        assert!(markup.contains("Fecha: 14/03/2026"));
    }

    #[test]
    fn test_run_rejects_broken_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("factura.json");
        let config = dir.path().join("label.toml");
        std::fs::write(&input, "{ \"number\": ").unwrap();
        std::fs::write(&config, "").unwrap();

        let result = run(Args {
            input: Some(input),
            output: Some(dir.path().join("out.zpl")),
            config: Some(config),
            ..Args::default()
        });
        assert!(matches!(result, Err(CliError::Json(_))));
    }
}
