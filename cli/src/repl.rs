use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line reader over stdin that prints a prompt before each line
pub struct Repl {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub fn prompt(&self) -> Result<(), String> {
        write!(std::io::stdout(), "$ ").map_err(|e| e.to_string())?;
        std::io::stdout().flush().map_err(|e| e.to_string())
    }

    /// Next input line; `None` at end of input. Cancel-safe.
    pub async fn next_line(&mut self) -> Result<Option<String>, String> {
        self.lines.next_line().await.map_err(|e| e.to_string())
    }
}
