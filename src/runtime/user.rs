//! User interaction operations (confirmation and choice prompts).

use anyhow::Result;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

/// Core, testable implementation that reads from any BufRead and writes to any Write.
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let response = ask_with_io(&format!("{} [y/N]", prompt), input, output)?;
    let response = response.to_lowercase();
    Ok(response == "y" || response == "yes")
}

pub(crate) fn ask_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    write!(output, "{} ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().to_string())
}

impl RealRuntime {
    pub(crate) fn confirm_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        confirm_with_io(prompt, &mut stdin_lock, &mut stdout)
    }

    pub(crate) fn ask_impl(&self, prompt: &str) -> Result<String> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        ask_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}
