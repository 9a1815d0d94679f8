use crate::config::Config;
use crate::console::interface::Console;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::shell::core::{init, transition, Effect, State};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Shell {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub console: Arc<Mutex<dyn Console + Send + Sync>>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

impl Shell {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        console: Arc<Mutex<dyn Console + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("shell"),
            console,
            image_classifier,
        }
    }

    /// Runs effects one at a time, so at most one classification request is
    /// ever in flight. Returns once the user exits or input is closed.
    pub fn run(&self) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        let (mut state, effects) = init();
        let mut pending: VecDeque<Effect> = effects.into();

        while let Some(effect) = pending.pop_front() {
            let Some(event) = self.run_effect(effect)? else {
                continue;
            };

            let _ = self
                .logger
                .info(&format!("state: {:?}, event: {:?}", state, event));

            let (new_state, effects) = transition(&self.config, state, event);

            let _ = self
                .logger
                .info(&format!("new state: {:?}, effects: {}", new_state, effects.len()));

            state = new_state;
            pending.extend(effects);
        }

        Ok(state)
    }
}
