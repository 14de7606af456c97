use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zcalc::Config;
use zcalc::calculator::{
    Calculator, Snapshot, copy_to_clipboard, format_number, group_digits, tokenize,
};

/// Keystroke calculator.
///
/// Tokens: digits, `.`, `+ - * / ^`, `=`, `sin cos tan log ln sqrt sqr inv
/// fact ! pi e`, `mc mr ms m+ m-`, `c`, `ac`, `back`, `@N` (recall history).
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (defaults to $XDG_CONFIG_HOME/zcalc/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Also print the history log
    #[arg(long)]
    history: bool,

    /// Input tokens; starts an interactive session when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let mut calc = Calculator::with_settings(config.engine_settings());

    if cli.tokens.is_empty() {
        interactive(&mut calc, &config)?;
    } else {
        let inputs = tokenize(&cli.tokens.join(" "))?;
        calc.press_all(inputs);

        let snapshot = calc.snapshot();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("{}", render_display(&snapshot, config.group_digits));
            if cli.history {
                print_history(&snapshot);
            }
        }
    }

    if cli.copy {
        copy_to_clipboard(calc.display())?;
    }

    Ok(())
}

/// Read token lines from stdin until EOF or `quit`.
///
/// A line with an unknown token is rejected as a whole.
fn interactive(calc: &mut Calculator, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("history") {
            print_history(&calc.snapshot());
            continue;
        }

        match tokenize(line) {
            Ok(inputs) => {
                calc.press_all(inputs);
                writeln!(stdout, "{}", render_line(&calc.snapshot(), config.group_digits))?;
            }
            Err(err) => eprintln!("zcalc: {err}"),
        }
        stdout.flush()?;
    }

    Ok(())
}

fn render_display(snapshot: &Snapshot, grouped: bool) -> String {
    if grouped && !snapshot.error {
        group_digits(&snapshot.display)
    } else {
        snapshot.display.clone()
    }
}

/// Display plus the pending operation and a memory marker.
fn render_line(snapshot: &Snapshot, grouped: bool) -> String {
    let mut line = render_display(snapshot, grouped);
    if let Some(pending) = snapshot.pending {
        line = format!("{} {} | {line}", format_number(pending.operand), pending.operator);
    }
    if snapshot.memory != 0.0 {
        line.push_str("  [M]");
    }
    line
}

fn print_history(snapshot: &Snapshot) {
    for (index, entry) in snapshot.history.iter().enumerate() {
        println!("@{index}  {} = {}", entry.expression, entry.result);
    }
}
