use crate::console::interface::Console;
use std::collections::VecDeque;
use std::error::Error;

pub const CLEAR_MARKER: &str = "<clear>";

/// Feeds scripted input lines and records everything written.
/// Prompts are recorded as-is, cleared screens as [`CLEAR_MARKER`].
#[derive(Debug, Default)]
pub struct ConsoleFake {
    inputs: VecDeque<FakeInput>,
    transcript: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeInput {
    Line(String),
    /// Fails the read the way stdin does on bytes that are not UTF-8.
    Unreadable,
}

impl ConsoleFake {
    pub fn new(inputs: &[&str]) -> Self {
        Self::with_inputs(inputs.iter().map(|s| FakeInput::Line(s.to_string())).collect())
    }

    pub fn with_inputs(inputs: Vec<FakeInput>) -> Self {
        Self {
            inputs: inputs.into(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}

impl Console for ConsoleFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.transcript.push(CLEAR_MARKER.to_string());
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        match self.inputs.pop_front() {
            Some(FakeInput::Line(line)) => Ok(Some(line)),
            Some(FakeInput::Unreadable) => Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ))),
            None => Ok(None),
        }
    }
}
