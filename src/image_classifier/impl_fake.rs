use crate::image_classifier::interface::{ClassifyError, ImageClassifier, Label, Prediction};
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Url(String),
    Image(Vec<u8>),
}

/// Replays queued responses in order. Once the queue runs dry every call
/// returns no predictions.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    responses: Mutex<VecDeque<Result<Vec<Prediction>, ClassifyError>>>,
    calls: Mutex<Vec<FakeCall>>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_response(&self, response: Result<Vec<Prediction>, ClassifyError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_scores(&self, scores: &[(&str, f64)]) {
        self.push_response(Ok(scores
            .iter()
            .map(|(tag_name, probability)| Prediction {
                label: Label::from_tag_name(tag_name),
                probability: *probability,
            })
            .collect()));
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: FakeCall) -> Result<Vec<Prediction>, ClassifyError> {
        let _ = self.logger.info(&format!("{:?}", call));
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify_url(&self, image_url: &str) -> Result<Vec<Prediction>, ClassifyError> {
        self.respond(FakeCall::Url(image_url.to_string()))
    }

    fn classify_image(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifyError> {
        self.respond(FakeCall::Image(image.to_vec()))
    }
}
