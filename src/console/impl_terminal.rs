use crate::console::interface::Console;
use std::error::Error;
use std::io::{BufRead, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub struct ConsoleTerminal {
    stdin: std::io::Stdin,
    stdout: std::io::Stdout,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
        }
    }
}

impl Console for ConsoleTerminal {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut stdout = self.stdout.lock();
        write!(stdout, "{}", CLEAR_SCREEN)?;
        stdout.flush()?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.stdout.lock(), "{}", text)?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut stdout = self.stdout.lock();
        write!(stdout, "{}", text)?;
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let mut bytes = Vec::new();
        if self.stdin.lock().read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        // Invalid UTF-8 is replaced rather than rejected.
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
