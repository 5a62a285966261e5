mod commands;
mod output;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use calquery_core::store_config::StoreConfig;
use calquery_core::{CalQueryError, DirectoryStore};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use output::JsonStyle;

const USAGE: &str = "Usage: calquery <calendar_name> <start_offset> <end_offset>";

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "calquery", version)]
#[command(about = "Print events from a local caldir calendar as JSON")]
struct Cli {
    /// Calendar title or identifier
    #[arg(required_unless_present = "list_calendars", allow_hyphen_values = true)]
    calendar: Option<String>,

    /// First day of the range, in days from today (0 = today)
    #[arg(allow_negative_numbers = true, required_unless_present = "list_calendars")]
    start_offset: Option<i64>,

    /// Day after the last day of the range, in days from today (1 = tomorrow)
    #[arg(allow_negative_numbers = true, required_unless_present = "list_calendars")]
    end_offset: Option<i64>,

    /// Read calendars from this directory instead of the configured one
    #[arg(long)]
    calendar_dir: Option<PathBuf>,

    /// List available calendars instead of querying events
    #[arg(long, conflicts_with_all = ["calendar", "start_offset", "end_offset"])]
    list_calendars: bool,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();

    let code = match Cli::try_parse() {
        Ok(cli) => {
            init_logging(cli.verbose);
            run(cli, &mut stdout)?
        }
        Err(e) => parse_failure(e, &mut stdout)?,
    };

    Ok(ExitCode::from(code))
}

/// Dispatch a parsed command line, writing its output to `out`.
///
/// Returns the process exit status. Errors other than an unknown calendar
/// are left to `main`, which reports them on stderr.
fn run(cli: Cli, out: &mut impl Write) -> Result<u8> {
    let store = open_store(cli.calendar_dir.clone())?;
    let style = JsonStyle::from_compact(cli.compact);

    if cli.list_calendars {
        writeln!(out, "{}", commands::calendars::run(&store, style)?)?;
        return Ok(EXIT_SUCCESS);
    }

    let (Some(calendar), Some(start), Some(end)) = (cli.calendar, cli.start_offset, cli.end_offset)
    else {
        writeln!(out, "{USAGE}")?;
        return Ok(EXIT_FAILURE);
    };

    match commands::query::run(&store, &calendar, start, end, style) {
        Ok(json) => {
            writeln!(out, "{json}")?;
            Ok(EXIT_SUCCESS)
        }
        Err(e @ CalQueryError::CalendarNotFound(_)) => {
            writeln!(out, "{}", output::error_json(&e.to_string()))?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Help and version exit normally. A malformed offset is reported as is;
/// any other mistake prints the usage line. Both exit with status 1.
fn parse_failure(e: clap::Error, out: &mut impl Write) -> std::io::Result<u8> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => {
            eprint!("{e}");
        }
        _ => {
            writeln!(out, "{USAGE}")?;
        }
    }
    Ok(EXIT_FAILURE)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(calendar_dir: Option<PathBuf>) -> Result<DirectoryStore> {
    let config = match calendar_dir {
        Some(calendar_dir) => StoreConfig { calendar_dir },
        None => StoreConfig::load()?,
    };
    let store = DirectoryStore::from_config(&config);

    tracing::debug!(root = %store.root().display(), "using calendar store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_query() {
        let cli = Cli::try_parse_from(["calquery", "Work", "0", "1"]).unwrap();

        assert_eq!(cli.calendar.as_deref(), Some("Work"));
        assert_eq!(cli.start_offset, Some(0));
        assert_eq!(cli.end_offset, Some(1));
        assert!(!cli.list_calendars);
    }

    #[test]
    fn accepts_negative_offsets() {
        let cli = Cli::try_parse_from(["calquery", "Work", "-7", "-1"]).unwrap();

        assert_eq!(cli.start_offset, Some(-7));
        assert_eq!(cli.end_offset, Some(-1));
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        assert!(Cli::try_parse_from(["calquery", "Work", "0"]).is_err());
        assert!(Cli::try_parse_from(["calquery", "Work", "0", "1", "2"]).is_err());
        assert!(Cli::try_parse_from(["calquery"]).is_err());
    }

    #[test]
    fn non_numeric_offset_is_invalid_value() {
        let err = Cli::try_parse_from(["calquery", "Work", "today", "1"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidValue | ErrorKind::ValueValidation
        ));
    }

    #[test]
    fn list_calendars_needs_no_positionals() {
        let cli = Cli::try_parse_from(["calquery", "--list-calendars"]).unwrap();
        assert!(cli.list_calendars);
        assert!(cli.calendar.is_none());
    }

    #[test]
    fn calendar_title_may_start_with_hyphen() {
        let cli = Cli::try_parse_from(["calquery", "-Team", "0", "1"]).unwrap();

        assert_eq!(cli.calendar.as_deref(), Some("-Team"));
        assert_eq!(cli.start_offset, Some(0));
        assert_eq!(cli.end_offset, Some(1));
    }

    #[test]
    fn flags_before_positionals_still_parse() {
        let cli = Cli::try_parse_from(["calquery", "-v", "Work", "0", "1"]).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.calendar.as_deref(), Some("Work"));
    }

    fn store_with_empty_calendar() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("work/.caldir")).unwrap();
        std::fs::write(tmp.path().join("work/.caldir/config.toml"), "name = \"Work\"\n").unwrap();
        tmp
    }

    fn run_with(args: &[&str]) -> (u8, String) {
        let mut out = Vec::new();
        let code = match Cli::try_parse_from(args) {
            Ok(cli) => run(cli, &mut out).unwrap(),
            Err(e) => parse_failure(e, &mut out).unwrap(),
        };
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn wrong_argument_count_prints_usage_and_fails() {
        let (code, out) = run_with(&["calquery", "Work", "0"]);

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out, format!("{USAGE}\n"));
    }

    #[test]
    fn unknown_calendar_prints_error_object_and_fails() {
        let tmp = store_with_empty_calendar();
        let dir = tmp.path().to_str().unwrap();

        let (code, out) = run_with(&["calquery", "--calendar-dir", dir, "Holidays", "0", "1"]);

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out, "{\"error\": \"Calendar not found: Holidays\"}\n");
    }

    #[test]
    fn successful_query_prints_json_and_succeeds() {
        let tmp = store_with_empty_calendar();
        let dir = tmp.path().to_str().unwrap();

        let (code, out) = run_with(&["calquery", "--calendar-dir", dir, "Work", "0", "1"]);

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "[]\n");
    }

    #[test]
    fn list_calendars_prints_titles_and_succeeds() {
        let tmp = store_with_empty_calendar();
        let dir = tmp.path().to_str().unwrap();

        let (code, out) = run_with(&["calquery", "--calendar-dir", dir, "--list-calendars"]);

        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.contains("\"Work\""));
    }
}
