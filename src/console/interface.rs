use std::error::Error;

/// Line-oriented terminal used by the interactive shell.
pub trait Console: Send + Sync {
    /// Wipe the screen and move the cursor to the top-left corner
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn write_line(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text without a newline and flush, leaving the cursor after it
    fn prompt(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Read one line without its line terminator. Returns `None` once input is closed.
    fn read_line(&mut self) -> Result<Option<String>, Box<dyn Error + Send + Sync>>;
}
