use crate::config::ClientConfig;
use crate::error::ClassifyError;
use crate::intake::SelectedImage;
use crate::result::ClassificationResult;
use reqwest::blocking::{Client, multipart};

const MAX_ERROR_BODY: usize = 200;

/// Something that turns an image into a waste verdict.
pub trait ClassifyService: Send + Sync {
    fn classify(&self, image: &SelectedImage) -> Result<ClassificationResult, ClassifyError>;
}

/// Posts images to the remote classification endpoint as `multipart/form-data`.
pub struct HttpClassifier {
    client: Client,
    endpoint: String,
    field_name: String,
}

impl HttpClassifier {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClassifyError> {
        cfg.validate()?;
        // reqwest's blocking client defaults to a 30s timeout; clear it unless configured.
        let client = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            field_name: cfg.field_name.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ClassifyService for HttpClassifier {
    fn classify(&self, image: &SelectedImage) -> Result<ClassificationResult, ClassifyError> {
        let part = multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime())?;
        let form = multipart::Form::new().part(self.field_name.clone(), part);

        tracing::info!("Submitting {} to {}", image.file_name(), self.endpoint);
        let resp = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = resp.status();
        let body = resp.bytes()?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY).collect(),
            });
        }
        ClassificationResult::from_json(&body)
    }
}
