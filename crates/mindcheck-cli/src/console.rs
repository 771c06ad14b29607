//! Terminal console over stdin/stdout.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use mindcheck_core::traits::Console;

/// Reads answers from stdin and prints to stdout.
pub struct StdConsole {
    stdin: io::StdinLock<'static>,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
            stdout: io::stdout(),
        }
    }
}

impl Console for StdConsole {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.stdout, "{message}").context("failed to write prompt")?;
        self.stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let read = self
            .stdin
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            // Keep the next output off the prompt line.
            writeln!(self.stdout)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn print_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.stdout, "{line}").context("failed to write to stdout")
    }
}
