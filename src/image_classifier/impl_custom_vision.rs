use crate::config::PredictionServiceConfig;
use crate::image_classifier::interface::{ClassifyError, ImageClassifier, Label, Prediction};
use crate::library::logger::interface::Logger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const API_PATH: &str = "customvision/v3.0/Prediction";
const PREDICTION_KEY_HEADER: &str = "Prediction-Key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagePrediction {
    #[serde(default)]
    predictions: Vec<PredictionModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionModel {
    probability: f64,
    #[serde(default)]
    tag_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceError {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyTarget {
    Url,
    Image,
}

impl ClassifyTarget {
    fn path_segment(&self) -> &'static str {
        match self {
            ClassifyTarget::Url => "url",
            ClassifyTarget::Image => "image",
        }
    }
}

/// Client for the Custom Vision prediction REST API.
pub struct ImageClassifierCustomVision {
    config: PredictionServiceConfig,
    agent: ureq::Agent,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierCustomVision {
    pub fn new(config: PredictionServiceConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        // Non-2xx responses are read so the service's own message can be shown.
        let agent_config = ureq::Agent::config_builder()
            .timeout_connect(Some(config.connect_timeout))
            .timeout_recv_response(Some(config.receive_timeout))
            .timeout_recv_body(Some(config.receive_timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            logger: logger.with_namespace("image_classifier").with_namespace("custom_vision"),
            config,
        }
    }

    fn read_predictions(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<Vec<Prediction>, ClassifyError> {
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        let _ = self.logger.info(&format!("Response status {}", status));

        let predictions = decode_response(status, &body)?;
        let _ = self
            .logger
            .info(&format!("Received {} predictions", predictions.len()));

        Ok(predictions)
    }
}

impl ImageClassifier for ImageClassifierCustomVision {
    fn classify_url(&self, image_url: &str) -> Result<Vec<Prediction>, ClassifyError> {
        let url = prediction_url(&self.config, ClassifyTarget::Url);
        let body = serde_json::to_string(&ImageUrl { url: image_url })
            .map_err(|e| ClassifyError::InvalidInput(e.to_string()))?;

        let _ = self.logger.info(&format!("Classifying image url {}", image_url));

        let response = self
            .agent
            .post(&url)
            .header(PREDICTION_KEY_HEADER, self.config.prediction_key.as_str())
            .header("Content-Type", "application/json")
            .send(body)?;

        self.read_predictions(response)
    }

    fn classify_image(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifyError> {
        let url = prediction_url(&self.config, ClassifyTarget::Image);

        let _ = self
            .logger
            .info(&format!("Classifying uploaded image ({} bytes)", image.len()));

        let response = self
            .agent
            .post(&url)
            .header(PREDICTION_KEY_HEADER, self.config.prediction_key.as_str())
            .header("Content-Type", "application/octet-stream")
            .send(image)?;

        self.read_predictions(response)
    }
}

pub fn prediction_url(config: &PredictionServiceConfig, target: ClassifyTarget) -> String {
    format!(
        "{}/{}/{}/classify/iterations/{}/{}",
        config.endpoint,
        API_PATH,
        config.project_id,
        urlencoding::encode(&config.published_model_name),
        target.path_segment(),
    )
}

/// Maps an HTTP status and body to predictions or to the error taxonomy.
pub fn decode_response(status: u16, body: &str) -> Result<Vec<Prediction>, ClassifyError> {
    if (200..300).contains(&status) {
        let image_prediction: ImagePrediction =
            serde_json::from_str(body).map_err(|e| ClassifyError::Decode(e.to_string()))?;

        return Ok(image_prediction
            .predictions
            .into_iter()
            .map(|p| Prediction {
                label: Label::from_tag_name(&p.tag_name),
                probability: p.probability,
            })
            .collect());
    }

    let message = match serde_json::from_str::<ServiceError>(body) {
        Ok(ServiceError {
            code: Some(code),
            message: Some(message),
        }) => format!("{} ({})", message, code),
        Ok(ServiceError {
            message: Some(message),
            ..
        }) => message,
        _ if body.trim().is_empty() => "no details".to_string(),
        _ => body.trim().to_string(),
    };

    match status {
        401 | 403 => Err(ClassifyError::Unauthorized(message)),
        _ => Err(ClassifyError::Service { status, message }),
    }
}
