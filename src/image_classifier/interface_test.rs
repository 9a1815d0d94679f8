use crate::image_classifier::impl_fake::{FakeCall, ImageClassifierFake};
use crate::image_classifier::interface::{
    read_image_file, ClassifyError, ImageClassifier, ImageRequest, Label,
};
use crate::library::logger::impl_fake::LoggerFake;
use std::io::Write;
use std::sync::Arc;

#[test]
fn test_labels_match_case_insensitively() {
    assert_eq!(Label::from_tag_name("cat"), Label::Cat);
    assert_eq!(Label::from_tag_name("CAT"), Label::Cat);
    assert_eq!(Label::from_tag_name("Dog"), Label::Dog);
    assert_eq!(
        Label::from_tag_name("cats"),
        Label::Other("cats".to_string())
    );
}

#[test]
fn test_classify_file_sends_file_contents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new()));

    let result = classifier.classify(&ImageRequest::File(file.path().to_path_buf()));

    assert!(result.unwrap().is_empty());
    assert_eq!(
        classifier.calls(),
        vec![FakeCall::Image(vec![0xFF, 0xD8, 0xFF, 0xE0])]
    );
}

#[test]
fn test_missing_file_is_reported_without_a_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.jpg");
    let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new()));

    let result = classifier.classify_file(&path);

    match result {
        Err(err @ ClassifyError::FileRead { .. }) => {
            assert!(err.to_string().starts_with("Could not read "));
            assert!(err.to_string().contains("missing.jpg"));
        }
        other => panic!("Unexpected result: {:?}", other),
    }
    assert!(classifier.calls().is_empty());
}

#[test]
fn test_empty_file_is_an_input_error() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let result = read_image_file(file.path());

    assert!(matches!(result, Err(ClassifyError::InvalidInput(_))));
}

#[test]
fn test_url_request_dispatch() {
    let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new()));
    classifier.push_scores(&[("cat", 0.9), ("dog", 0.1)]);

    let predictions = classifier
        .classify(&ImageRequest::Url("https://example.com/cat.jpg".to_string()))
        .unwrap();

    assert_eq!(predictions.len(), 2);
    assert_eq!(
        classifier.calls(),
        vec![FakeCall::Url("https://example.com/cat.jpg".to_string())]
    );
}
