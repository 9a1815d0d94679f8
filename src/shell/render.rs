use crate::shell::core::ResultView;

pub const TITLE: &str = "=== Cat or Dog Image Classifier ===";
pub const MENU_OPTIONS: [&str; 3] = [
    "1. Input Image URL",
    "2. Input Local File Path",
    "3. Exit",
];
pub const CHOOSE_PROMPT: &str = "Choose an option: ";
pub const URL_PROMPT: &str = "Enter Image URL: ";
pub const FILE_PROMPT: &str = "Enter Local File Path: ";
pub const ACK_PROMPT: &str = "Press Enter to continue...";
pub const INVALID_CHOICE: &str = "Invalid choice, please try again.";

pub fn menu_lines() -> Vec<String> {
    std::iter::once(TITLE)
        .chain(MENU_OPTIONS)
        .map(str::to_string)
        .collect()
}

pub fn result_lines(view: &ResultView) -> Vec<String> {
    match view {
        ResultView::Verdict(verdict) => verdict.display_lines(),
        ResultView::Error(message) => vec![format!("Error: {}", message)],
    }
}
