// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words conin smkx rmkx terminfo

//! Interactive probe: press keys to see how the console decodes them. Escape quits.
//! With `--line`, reads whole lines instead, until an empty line.

use clap::Parser;
use r3bl_console::{CapabilitySource, ConsoleIn, ConsoleInConfig, ConsoleOut, ConsoleResult,
                   DEFAULT_LOG_FILE, InputDevice, KeyCode, LineEditor, ReadDeadline,
                   TerminalAttributes, TerminfoCapabilities, TracingConfig};
use std::{io::Stdout, time::Duration};
use tracing_core::LevelFilter;

#[derive(Debug, Parser)]
#[command(bin_name = "conin_probe")]
#[command(about = "Show how the console decodes key presses and lines")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    #[arg(
        long,
        short = 'l',
        help = "Read whole lines instead of single keys, until an empty line"
    )]
    pub line: bool,

    #[arg(
        long,
        short = 't',
        default_value_t = 5_000,
        help = "Milliseconds to wait for each key, 0 waits forever"
    )]
    pub timeout_ms: u64,

    #[arg(
        long,
        default_value_t = 1_000,
        help = "Milliseconds to wait for the rest of a key sequence"
    )]
    pub escape_timeout_ms: u64,

    #[arg(long, default_value = DEFAULT_LOG_FILE, help = "Log file to write to")]
    pub log_file: String,

    #[arg(long, short = 'q', help = "Don't write a log file")]
    pub no_log: bool,
}

type Output = ConsoleOut<Stdout, TerminfoCapabilities>;

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if !cli_arg.no_log {
        TracingConfig::new_file(Some(cli_arg.log_file.clone()))
            .with_level_filter(LevelFilter::TRACE)
            .install_global()?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let config = ConsoleInConfig::default()
        .with_escape_sequence_timeout(Duration::from_millis(cli_arg.escape_timeout_ms))
        .with_prompt("> ");
    let mut console = ConsoleIn::open_stdin(config)?;
    let mut out = ConsoleOut::open_stdout()?;

    if let Ok(lines) = out.query_vertical_lines() {
        tracing::debug!(lines, "terminal size from terminfo");
    }

    if cli_arg.line {
        run_line_loop(&mut console, &mut out)?;
    } else {
        // Keypad transmit mode, so the keys send the sequences terminfo describes.
        out.write_capability("smkx").ok();
        let result = run_key_loop(&mut console, &mut out, &cli_arg);
        out.write_capability("rmkx").ok();
        console.close()?;
        result?;
    }

    tracing::debug!(message = "Stop logging...");
    Ok(())
}

fn run_key_loop<T, C, L>(
    console: &mut ConsoleIn<T, C, L>,
    out: &mut Output,
    cli_arg: &CLIArg,
) -> ConsoleResult<()>
where
    T: InputDevice + TerminalAttributes,
    C: CapabilitySource,
    L: LineEditor,
{
    out.write_str("Press keys to see how they decode. Escape quits.\r\n")?;

    loop {
        let deadline = match cli_arg.timeout_ms {
            0 => ReadDeadline::Forever,
            ms => ReadDeadline::after(Duration::from_millis(ms)),
        };

        match console.read_char(deadline) {
            Ok(key) if key.code == KeyCode::Escape => return Ok(()),
            Ok(key) => {
                out.write_str(&format!("{key}\r\n"))?;
            }
            Err(err) if err.is_timeout() => {
                out.write_str("(no key yet)\r\n")?;
            }
            Err(err) => return Err(err),
        }
    }
}

fn run_line_loop<T, C, L>(
    console: &mut ConsoleIn<T, C, L>,
    out: &mut Output,
) -> ConsoleResult<()>
where
    T: InputDevice + TerminalAttributes,
    C: CapabilitySource,
    L: LineEditor,
{
    out.write_line("Type lines. An empty line quits.")?;

    loop {
        let line = console.read_line(256)?;
        if line.trim_end_matches('\n').is_empty() {
            return Ok(());
        }
        out.write_line(&format!("{line:?} ({} recalled)", console.history().len()))?;
    }
}
