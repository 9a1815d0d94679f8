use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Tag names are resolved once at the service boundary so nothing past it
/// compares free-form strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Cat,
    Dog,
    Other(String),
}

impl Label {
    pub fn from_tag_name(tag_name: &str) -> Self {
        if tag_name.eq_ignore_ascii_case("cat") {
            Label::Cat
        } else if tag_name.eq_ignore_ascii_case("dog") {
            Label::Dog
        } else {
            Label::Other(tag_name.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRequest {
    Url(String),
    File(PathBuf),
}

#[derive(Debug)]
pub enum ClassifyError {
    /// Rejected before anything was sent.
    InvalidInput(String),
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    Network(String),
    Unauthorized(String),
    Service {
        status: u16,
        message: String,
    },
    Decode(String),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "{msg}"),
            Self::FileRead { path, source } => {
                write!(f, "Could not read {}: {source}", path.display())
            }
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Unauthorized(msg) => {
                write!(f, "Access denied by the prediction service: {msg}")
            }
            Self::Service { status, message } => {
                write!(f, "Prediction service returned {status}: {message}")
            }
            Self::Decode(msg) => {
                write!(f, "Unexpected response from the prediction service: {msg}")
            }
        }
    }
}

impl std::error::Error for ClassifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ClassifyError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Timeout(_) => Self::Network("request timed out".to_string()),
            ureq::Error::Io(io_err) => Self::Network(io_err.to_string()),
            ureq::Error::StatusCode(status @ (401 | 403)) => {
                Self::Unauthorized(format!("status {status}"))
            }
            ureq::Error::StatusCode(status) => Self::Service {
                status,
                message: "request failed".to_string(),
            },
            other => Self::Network(other.to_string()),
        }
    }
}

pub trait ImageClassifier: Send + Sync {
    fn classify_url(&self, image_url: &str) -> Result<Vec<Prediction>, ClassifyError>;

    fn classify_image(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifyError>;

    fn classify_file(&self, path: &Path) -> Result<Vec<Prediction>, ClassifyError> {
        let image = read_image_file(path)?;
        self.classify_image(&image)
    }

    fn classify(&self, request: &ImageRequest) -> Result<Vec<Prediction>, ClassifyError> {
        match request {
            ImageRequest::Url(url) => self.classify_url(url),
            ImageRequest::File(path) => self.classify_file(path),
        }
    }
}

/// The file handle is closed before this returns, whatever happens to the
/// request that follows.
pub fn read_image_file(path: &Path) -> Result<Vec<u8>, ClassifyError> {
    let read_error = |source| ClassifyError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_error)?;
    let mut image = Vec::new();
    file.read_to_end(&mut image).map_err(read_error)?;

    if image.is_empty() {
        return Err(ClassifyError::InvalidInput(format!(
            "{} is empty",
            path.display()
        )));
    }

    Ok(image)
}
