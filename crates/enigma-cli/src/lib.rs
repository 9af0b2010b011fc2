// enigma-cli: message stream processing shared by the `enigma` binary.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use enigma_machine::config::{MachineConfig, Setup};
use enigma_machine::machine::Machine;

/// Default number of symbols per output group.
pub const DEFAULT_GROUP: usize = 5;

/// Log filter directive for the `-d`/`-v` flags, or `None` to defer to
/// `RUST_LOG`.
pub fn log_directive(debug: bool, verbose: bool) -> Option<&'static str> {
    if debug {
        Some("debug")
    } else if verbose {
        Some("info")
    } else {
        None
    }
}

/// Read and parse a machine configuration file.
pub fn load_config(path: &Path) -> Result<MachineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    let config = MachineConfig::parse(&text)
        .with_context(|| format!("invalid configuration {}", path.display()))?;
    info!(
        path = %path.display(),
        rotors = config.rotors.len(),
        slots = config.num_slots,
        pawls = config.num_pawls,
        "configuration loaded"
    );
    Ok(config)
}

/// Split `msg` into space-separated groups of `width` symbols. The last
/// group may be shorter. A `width` of 0 disables grouping.
pub fn format_groups(msg: &str, width: usize) -> String {
    if width == 0 {
        return msg.to_string();
    }
    let mut out = String::with_capacity(msg.len() + msg.len() / width);
    for (i, c) in msg.chars().enumerate() {
        if i > 0 && i % width == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Run every line of `input` through a machine built from `config`.
///
/// Lines starting with `*` (after leading whitespace) re-initialize the
/// machine. Other lines are messages: whitespace is removed, the rest is
/// converted and written in groups of `group` symbols. Empty lines before
/// the first setup are skipped; afterwards they produce empty output lines.
pub fn process<R: BufRead, W: Write>(
    config: &MachineConfig,
    input: R,
    mut output: W,
    group: usize,
) -> Result<()> {
    let mut machine = Machine::new(config)?;
    let mut configured = false;

    for (lineno, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let lineno = lineno + 1;

        if Setup::is_setup_line(&line) {
            let setup = Setup::parse(&line, config)
                .with_context(|| format!("line {lineno}: bad setup"))?;
            machine
                .apply_setup(&setup)
                .with_context(|| format!("line {lineno}: bad setup"))?;
            debug!(line = lineno, settings = %machine.settings(), "machine configured");
            configured = true;
            continue;
        }

        let message: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if !configured {
            if message.is_empty() {
                continue;
            }
            bail!("no setup line before message");
        }

        let converted = machine
            .convert(&message)
            .with_context(|| format!("line {lineno}: cannot convert message"))?;
        writeln!(output, "{}", format_groups(&converted, group))
            .context("failed to write output")?;
    }

    output.flush().context("failed to flush output")?;
    Ok(())
}
