//! `sanitize` command: run text through the redaction pipeline.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Read, Write};

use dependabot_errors::ErrorMessageSanitizer;

use crate::cli::SanitizeCommand;

/// Which pipeline to apply to each chunk of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    Message,
    Source,
}

impl SanitizeMode {
    pub fn apply(self, sanitizer: &ErrorMessageSanitizer, text: &str) -> String {
        match self {
            SanitizeMode::Message => sanitizer.sanitize(text).into_string(),
            SanitizeMode::Source => sanitizer.sanitize_source(text).into_string(),
        }
    }
}

/// Sanitizes a whole document at once.
pub fn sanitize_text(sanitizer: &ErrorMessageSanitizer, mode: SanitizeMode, input: &str) -> String {
    mode.apply(sanitizer, input)
}

/// Sanitizes each line independently, writing as it goes.
pub fn sanitize_lines<R: BufRead, W: Write>(
    sanitizer: &ErrorMessageSanitizer,
    mode: SanitizeMode,
    reader: R,
    writer: &mut W,
) -> Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        writeln!(writer, "{}", mode.apply(sanitizer, &line))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

pub fn run_sanitize(cmd: &SanitizeCommand) -> Result<()> {
    info!("Starting sanitize operation.");
    let sanitizer = ErrorMessageSanitizer::new(cmd.sanitizer_config())
        .context("Invalid temp-path configuration")?;
    let mode = if cmd.source { SanitizeMode::Source } else { SanitizeMode::Message };
    debug!("Sanitize mode: {:?}, config: {:?}", mode, sanitizer.config());

    let mut writer: Box<dyn Write> = match &cmd.output {
        Some(path) => {
            info!("Writing sanitized content to file: {}", path.display());
            Box::new(
                fs::File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            )
        }
        None => Box::new(io::stdout().lock()),
    };

    if cmd.line_buffered {
        let lines = match &cmd.input_file {
            Some(path) => {
                let file = fs::File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                sanitize_lines(&sanitizer, mode, io::BufReader::new(file), &mut writer)?
            }
            None => {
                ensure_stdin_is_piped()?;
                sanitize_lines(&sanitizer, mode, io::stdin().lock(), &mut writer)?
            }
        };
        info!("Sanitized {} line(s).", lines);
        return Ok(());
    }

    let input = read_input(cmd)?;
    let sanitized = sanitize_text(&sanitizer, mode, &input);
    debug!(
        "Content sanitized. Original length: {}, Sanitized length: {}",
        input.len(),
        sanitized.len()
    );
    writeln!(writer, "{}", sanitized)?;
    writer.flush()?;
    info!("Sanitize operation completed.");
    Ok(())
}

fn read_input(cmd: &SanitizeCommand) -> Result<String> {
    match &cmd.input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            ensure_stdin_is_piped()?;
            info!("Reading input from stdin...");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn ensure_stdin_is_piped() -> Result<()> {
    if io::stdin().is_terminal() {
        bail!("No input provided. Pipe text into the command or pass --input-file.");
    }
    Ok(())
}
