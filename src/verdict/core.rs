use crate::config::Thresholds;
use crate::image_classifier::interface::{Label, Prediction};

pub const NO_PREDICTIONS_MESSAGE: &str = "No predictions were made.";
pub const TIE_MESSAGE: &str = "The result is very close to 50/50. It could be either or neither.";
pub const UNCERTAIN_MESSAGE: &str = "The result is uncertain and might not be correct.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoPredictions,
    Tie,
    Uncertain,
    Cat,
    Dog,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub cat_probability: f64,
    pub dog_probability: f64,
    pub outcome: Outcome,
}

/// Cat and dog scores pulled out of a prediction set. A label the service
/// did not return scores 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelScores {
    pub cat: f64,
    pub dog: f64,
}

impl LabelScores {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let first = |label: Label| {
            predictions
                .iter()
                .find(|p| p.label == label)
                .map(|p| p.probability)
                .unwrap_or(0.0)
        };

        Self {
            cat: first(Label::Cat),
            dog: first(Label::Dog),
        }
    }
}

/// Checks run in order: empty set, tie band, confidence floor, then the
/// larger score wins. A difference equal to the tie band is a tie, and a
/// score equal to the confidence floor is confident.
pub fn interpret(thresholds: &Thresholds, predictions: &[Prediction]) -> Verdict {
    if predictions.is_empty() {
        return Verdict {
            cat_probability: 0.0,
            dog_probability: 0.0,
            outcome: Outcome::NoPredictions,
        };
    }

    let scores = LabelScores::from_predictions(predictions);

    let outcome = if (scores.cat - scores.dog).abs() <= thresholds.tie_band {
        Outcome::Tie
    } else if scores.cat.max(scores.dog) < thresholds.confidence_floor {
        Outcome::Uncertain
    } else if scores.cat > scores.dog {
        Outcome::Cat
    } else {
        Outcome::Dog
    };

    Verdict {
        cat_probability: scores.cat,
        dog_probability: scores.dog,
        outcome,
    }
}

impl Verdict {
    pub fn message(&self) -> String {
        match self.outcome {
            Outcome::NoPredictions => NO_PREDICTIONS_MESSAGE.to_string(),
            Outcome::Tie => TIE_MESSAGE.to_string(),
            Outcome::Uncertain => UNCERTAIN_MESSAGE.to_string(),
            Outcome::Cat => "The image is classified as a cat.".to_string(),
            Outcome::Dog => "The image is classified as a dog.".to_string(),
        }
    }

    pub fn display_lines(&self) -> Vec<String> {
        if self.outcome == Outcome::NoPredictions {
            return vec![self.message()];
        }

        vec![
            format!("Cat Probability: {}", format_percent(self.cat_probability)),
            format!("Dog Probability: {}", format_percent(self.dog_probability)),
            self.message(),
        ]
    }
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
