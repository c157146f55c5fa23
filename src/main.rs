//! Cellpad - a small grid editor with range formulas

mod config;
mod tui;

use anyhow::Context;
use cellpad_core::{BUILTINS, Document, Outcome};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `CELLPAD_LOG=debug`).
const LOG_ENV: &str = "CELLPAD_LOG";

fn print_usage() {
    eprintln!("Usage: cellpad [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <CMD>       Run a command non-interactively (can be repeated)");
    eprintln!("      --rows <N>            Initial number of rows");
    eprintln!("      --cols <N>            Initial number of columns");
    eprintln!("      --config <FILE>       Load settings from a TOML file");
    eprintln!("      --log <FILE>          Write logs to FILE (filter from {})", LOG_ENV);
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  set ADDR TEXT, =FN(START:END), fx FORMULA, addrow, addcol,");
    eprintln!("  insrow N, inscol COL, delrow N, delcol COL, dedupe,");
    eprintln!("  replace FIND REPLACE, bold|italic|upper|lower|trim ADDR, show");
    eprintln!();
    eprintln!("Formulas (=FN(START:END)):");
    for builtin in BUILTINS {
        eprintln!("  {}  {}", builtin.code, builtin.description);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    help: bool,
    commands: Vec<String>,
    rows: Option<usize>,
    cols: Option<usize>,
    config_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut i = 1;

    let value = |i: usize, flag: &str| -> Result<String, String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| format!("{} requires a value", flag))
    };
    let number = |i: usize, flag: &str| -> Result<usize, String> {
        let raw = value(i, flag)?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("{} expects a positive number, got '{}'", flag, raw)),
        }
    };

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => opts.help = true,
            "-c" | "--command" => {
                i += 1;
                opts.commands.push(value(i, "--command")?);
            }
            "--rows" => {
                i += 1;
                opts.rows = Some(number(i, "--rows")?);
            }
            "--cols" => {
                i += 1;
                opts.cols = Some(number(i, "--cols")?);
            }
            "--config" => {
                i += 1;
                opts.config_file = Some(PathBuf::from(value(i, "--config")?));
            }
            "--log" => {
                i += 1;
                opts.log_file = Some(PathBuf::from(value(i, "--log")?));
            }
            arg => return Err(format!("Unknown option: {}", arg)),
        }
        i += 1;
    }
    Ok(opts)
}

/// Install the tracing subscriber. The TUI owns the terminal, so without a
/// log file it only logs in command mode, to stderr.
fn init_logging(log_file: Option<&Path>, command_mode: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if command_mode => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Run commands in order, printing any output. Stops at the first error,
/// printing `#ERR <message>` and returning exit code 1.
fn run_commands(doc: &mut Document, commands: &[String]) -> i32 {
    for command in commands {
        match doc.execute(command) {
            Ok(Outcome::Text(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Ok(Outcome::None | Outcome::Goto(_)) => {}
            Err(e) => {
                println!("#ERR {}", e);
                return 1;
            }
        }
    }
    0
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };
    if opts.help {
        print_usage();
        return;
    }

    let command_mode = !opts.commands.is_empty();
    if let Err(e) = init_logging(opts.log_file.as_deref(), command_mode) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    let (config, warnings) = config::load_config(opts.config_file.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let rows = opts.rows.unwrap_or(config.rows);
    let cols = opts.cols.unwrap_or(config.cols);
    let mut doc = match Document::new(rows, cols) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if command_mode {
        std::process::exit(run_commands(&mut doc, &opts.commands));
    }

    let mut app = tui::App::new(doc, config.column_width);
    if let Err(e) = tui::run(&mut app) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("cellpad")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_commands_in_order() {
        let opts = parse_args(&args(&["-c", "set A1 1", "--command", "show"])).unwrap();
        assert_eq!(opts.commands, vec!["set A1 1", "show"]);
        assert!(!opts.help);
    }

    #[test]
    fn test_parse_args_dimensions() {
        let opts = parse_args(&args(&["--rows", "4", "--cols", "2"])).unwrap();
        assert_eq!((opts.rows, opts.cols), (Some(4), Some(2)));
        assert!(parse_args(&args(&["--rows", "0"])).is_err());
        assert!(parse_args(&args(&["--cols"])).is_err());
    }

    #[test]
    fn test_parse_args_rejects_unknown() {
        assert_eq!(
            parse_args(&args(&["--frobnicate"])),
            Err("Unknown option: --frobnicate".to_string())
        );
    }

    #[test]
    fn test_run_commands_exit_codes() {
        let mut doc = Document::new(2, 2).unwrap();
        let ok = vec!["set A1 5".to_string(), "=SUM(A1:A1)".to_string()];
        assert_eq!(run_commands(&mut doc, &ok), 0);
        let bad = vec!["=FOO(A1:A1)".to_string(), "set A1 9".to_string()];
        assert_eq!(run_commands(&mut doc, &bad), 1);
        assert_eq!(doc.text("A1").unwrap(), "5");
    }
}
