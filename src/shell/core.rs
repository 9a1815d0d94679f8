use crate::config::Config;
use crate::image_classifier::interface::{ClassifyError, ImageRequest, Prediction};
use crate::shell::render;
use crate::verdict::core::{interpret, Verdict};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Url,
    File,
}

impl InputKind {
    fn prompt(&self) -> &'static str {
        match self {
            InputKind::Url => render::URL_PROMPT,
            InputKind::File => render::FILE_PROMPT,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            InputKind::Url => "Image URL",
            InputKind::File => "Local file path",
        }
    }

    fn request(&self, input: &str) -> ImageRequest {
        match self {
            InputKind::Url => ImageRequest::Url(input.to_string()),
            // Terminals quote dragged-in paths.
            InputKind::File => ImageRequest::File(PathBuf::from(input.trim_matches('"'))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Url,
    File,
    Exit,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "1" => Some(MenuChoice::Url),
            "2" => Some(MenuChoice::File),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Verdict(Verdict),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    MenuDisplayed,
    AwaitingInput(InputKind),
    Dispatching(ImageRequest),
    ShowingResult(ResultView),
    AwaitingAck,
    Exited,
}

#[derive(Debug)]
pub enum Event {
    LineRead(String),
    InputClosed,
    /// A line arrived but could not be decoded.
    InputRejected(String),
    ClassifyDone(Result<Vec<Prediction>, ClassifyError>),
    ResultShown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearScreen,
    Print(String),
    Prompt(String),
    ReadLine,
    Classify(ImageRequest),
    ShowResult(ResultView),
    Exit,
}

pub fn init() -> (State, Vec<Effect>) {
    (State::MenuDisplayed, show_menu(None))
}

fn show_menu(warning: Option<&str>) -> Vec<Effect> {
    let mut effects = vec![Effect::ClearScreen];
    if let Some(warning) = warning {
        effects.push(Effect::Print(warning.to_string()));
    }
    effects.extend(render::menu_lines().into_iter().map(Effect::Print));
    effects.push(Effect::Prompt(render::CHOOSE_PROMPT.to_string()));
    effects.push(Effect::ReadLine);
    effects
}

fn show_result(view: ResultView) -> (State, Vec<Effect>) {
    (
        State::ShowingResult(view.clone()),
        vec![Effect::ShowResult(view)],
    )
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::Exited, _) => (State::Exited, vec![]),

        (_, Event::InputClosed) => (State::Exited, vec![Effect::Exit]),

        (
            State::MenuDisplayed | State::AwaitingInput(_) | State::AwaitingAck,
            Event::InputRejected(reason),
        ) => show_result(ResultView::Error(format!(
            "Input could not be read: {}",
            reason
        ))),

        (State::MenuDisplayed, Event::LineRead(line)) => match MenuChoice::parse(&line) {
            Some(MenuChoice::Url) => awaiting_input(InputKind::Url),
            Some(MenuChoice::File) => awaiting_input(InputKind::File),
            Some(MenuChoice::Exit) => (State::Exited, vec![Effect::Exit]),
            None => (
                State::MenuDisplayed,
                show_menu(Some(render::INVALID_CHOICE)),
            ),
        },

        (State::AwaitingInput(kind), Event::LineRead(line)) => {
            let input = line.trim();
            if input.is_empty() {
                return show_result(ResultView::Error(format!(
                    "{} must not be empty.",
                    kind.name()
                )));
            }
            let request = kind.request(input);
            (
                State::Dispatching(request.clone()),
                vec![Effect::Classify(request)],
            )
        }

        (State::Dispatching(_), Event::ClassifyDone(result)) => {
            let view = match result {
                Ok(predictions) => {
                    ResultView::Verdict(interpret(&config.thresholds, &predictions))
                }
                Err(err) => ResultView::Error(err.to_string()),
            };
            show_result(view)
        }

        (State::ShowingResult(_), Event::ResultShown) => (
            State::AwaitingAck,
            vec![
                Effect::Prompt(render::ACK_PROMPT.to_string()),
                Effect::ReadLine,
            ],
        ),

        (State::AwaitingAck, Event::LineRead(_)) => init(),

        // Events that do not belong to the current state are dropped.
        (state, _) => (state, vec![]),
    }
}

fn awaiting_input(kind: InputKind) -> (State, Vec<Effect>) {
    (
        State::AwaitingInput(kind),
        vec![Effect::Prompt(kind.prompt().to_string()), Effect::ReadLine],
    )
}
