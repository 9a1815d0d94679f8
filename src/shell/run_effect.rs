use super::main::Shell;
use crate::console::interface::Console;
use crate::shell::core::{Effect, Event, ResultView};
use crate::shell::render;
use std::sync::MutexGuard;

type ConsoleGuard<'a> = MutexGuard<'a, dyn Console + Send + Sync + 'static>;

impl Shell {
    pub fn run_effect(
        &self,
        effect: Effect,
    ) -> Result<Option<Event>, Box<dyn std::error::Error + Send + Sync>> {
        match effect {
            Effect::ClearScreen => {
                self.console()?.clear()?;
                Ok(None)
            }
            Effect::Print(line) => {
                self.console()?.write_line(&line)?;
                Ok(None)
            }
            Effect::Prompt(text) => {
                self.console()?.prompt(&text)?;
                Ok(None)
            }
            Effect::ReadLine => match self.console()?.read_line() {
                Ok(Some(line)) => Ok(Some(Event::LineRead(line))),
                Ok(None) => Ok(Some(Event::InputClosed)),
                Err(err) if is_invalid_data(err.as_ref()) => {
                    let _ = self.logger.error(&format!("Unreadable input: {}", err));
                    Ok(Some(Event::InputRejected(err.to_string())))
                }
                Err(err) => Err(err),
            },
            Effect::Classify(request) => {
                let _ = self.logger.info(&format!("Dispatching {:?}", request));
                let result = self.image_classifier.classify(&request);
                if let Err(err) = &result {
                    let _ = self.logger.error(&format!("Classification failed: {}", err));
                }
                Ok(Some(Event::ClassifyDone(result)))
            }
            Effect::ShowResult(view) => {
                if let ResultView::Verdict(verdict) = &view {
                    let _ = self.logger.info(&format!("Verdict: {:?}", verdict));
                }
                let mut console = self.console()?;
                for line in render::result_lines(&view) {
                    console.write_line(&line)?;
                }
                Ok(Some(Event::ResultShown))
            }
            Effect::Exit => {
                let _ = self.logger.info("Exiting");
                Ok(None)
            }
        }
    }

    fn console(&self) -> Result<ConsoleGuard<'_>, Box<dyn std::error::Error + Send + Sync>> {
        self.console.lock().map_err(|e| e.to_string().into())
    }
}

fn is_invalid_data(err: &(dyn std::error::Error + Send + Sync + 'static)) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::InvalidData)
}
