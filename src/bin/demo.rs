//! Demo binary for clidisplay E2E testing.
//!
//! This binary drives clidisplay's [`Ui`] for PTY-based integration tests.
//! Each subcommand exercises one output operation. The locale is read from
//! the environment (`CLI_LOCALE`, `LC_ALL`, `LANG`); color is always on.

use chrono::DateTime;
use clidisplay::{
    ColorSetting, DisplayError, LogKind, LogRecord, ParamMap, Settings, TimezoneLocation,
    TraceSink, Ui, UiError, Value, params, set_trace_sink,
};
use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;

/// Trace sink writing to stderr so traces never mix with primary output.
struct StderrSink;

impl TraceSink for StderrSink {
    fn emit(&self, message: &str) {
        eprint!("{}", message);
    }

    fn emit_line(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Demo error carrying a free-form message.
#[derive(Debug)]
struct DemoError(String);

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DemoError {}

fn usage() {
    eprintln!("Usage: clidisplay-demo <command> [args...]");
    eprintln!("Commands:");
    eprintln!("  text <template> [key=value...]");
    eprintln!("  emphasis <template> [key=value...]");
    eprintln!("  pair <key> <value>");
    eprintln!("  header <text>");
    eprintln!("  warning <text>");
    eprintln!("  ok");
    eprintln!("  failed <message>");
    eprintln!("  table [padding]");
    eprintln!("  wrapped-table [width]");
    eprintln!("  log <OUT|ERR> <message> [offset_hours]");
    eprintln!("  log-stdin");
    eprintln!("  prompt [default] [app]");
}

/// Parse trailing `key=value` arguments into one parameter map.
fn parse_params(args: &[String]) -> ParamMap {
    let mut map = ParamMap::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            map.insert(key.to_string(), Value::from(value));
        }
    }
    map
}

fn demo_record(kind: LogKind, message: &str) -> LogRecord {
    LogRecord {
        message: message.to_string(),
        kind,
        timestamp: DateTime::from_timestamp(1468969692, 0).unwrap_or_default(),
        application_id: "demo-app".to_string(),
        source_type: "APP/PROC/WEB".to_string(),
        source_instance: "0".to_string(),
    }
}

fn run(mut ui: Ui, args: &[String]) -> clidisplay::Result<()> {
    let arg = |i: usize, default: &'static str| -> String {
        args.get(i).cloned().unwrap_or_else(|| default.to_string())
    };

    match args[1].as_str() {
        "text" => {
            let template = arg(2, "Hello {{.Name}}");
            ui.text(&template, &[parse_params(args.get(3..).unwrap_or_default())])?;
        }

        "emphasis" => {
            let template = arg(2, "App {{.AppName}} does not exist.");
            ui.text_with_emphasis(&template, &[parse_params(args.get(3..).unwrap_or_default())])?;
        }

        "pair" => {
            ui.pair(&arg(2, "name"), &arg(3, "value"), &[])?;
        }

        "header" => {
            ui.header(&arg(2, "FEATURE FLAGS"))?;
        }

        "warning" => {
            ui.warning(&arg(2, "Also delete any mapped routes"), &[])?;
        }

        "ok" => {
            ui.ok()?;
        }

        "failed" => {
            let err = DemoError(arg(2, "Something went wrong"));
            ui.error(DisplayError::plain(&err))?;
        }

        "table" => {
            let padding: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3);
            let rows = vec![
                vec!["name", "state", "instances"],
                vec!["dora", "started", "1/1"],
                vec!["some-longer-app", "stopped", "0/2"],
            ];
            ui.table("", &rows, padding)?;
        }

        "wrapped-table" => {
            let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
            let rows = vec![
                vec!["wut1:".to_string(), "hi hi".to_string()],
                vec![
                    "wut4:".to_string(),
                    format!("{} {}", "a".repeat(15), "b".repeat(15)),
                ],
            ];
            ui.wrapped_table(" ", &rows, 2, width)?;
        }

        "log" => {
            let kind = arg(2, "OUT")
                .parse::<LogKind>()
                .map_err(|e| UiError::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
            let hours: i32 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(-7);
            let timezone = TimezoneLocation::from_offset_hours(hours).unwrap_or(TimezoneLocation::Utc);
            let record = demo_record(kind, &arg(3, "This is a log message"));

            ui.with_timezone(timezone).log_message(&record, true)?;
        }

        "log-stdin" => {
            // One JSON record per line
            for line in io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<LogRecord>(&line) {
                    Ok(record) => ui.log_message(&record, true)?,
                    Err(e) => ui.warning(
                        "Skipping malformed record: {{.Error}}",
                        &[params! { "Error" => e.to_string() }],
                    )?,
                }
            }
        }

        "prompt" => {
            let default = args.get(2).is_some_and(|s| s == "yes" || s == "true");
            let app = arg(3, "dora");
            let answer = ui.bool_prompt(
                default,
                "Really delete the app {{.AppName}}?",
                &[params! { "AppName" => app }],
                None,
            )?;
            ui.text("answer: {{.Answer}}", &[params! { "Answer" => answer }])?;
        }

        other => {
            eprintln!("Unknown command: {}", other);
            usage();
            return Err(UiError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown command '{other}'"),
            )));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
        return ExitCode::FAILURE;
    }

    // Force color output even in non-TTY (for test capture)
    let settings = Settings::from_env().with_color(ColorSetting::Enabled);
    if settings.trace {
        set_trace_sink(Arc::new(StderrSink));
    }
    let ui = Ui::new(&settings);

    match run(ui, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
