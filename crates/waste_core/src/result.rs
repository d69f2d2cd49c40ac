use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown in place of a caption the service did not provide.
pub const CAPTION_PLACEHOLDER: &str = "No caption available";

/// Verdict returned by the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Human readable waste category, e.g. "Plastic Waste".
    pub waste_type: String,
    /// Disposal guidance for the category.
    pub disposal: String,
    /// Scene caption, `None` when missing or blank.
    pub caption: Option<String>,
    /// Objects the service recognised in the image, possibly empty.
    #[serde(default)]
    pub detected_objects: Vec<String>,
}

impl ClassificationResult {
    /// Parse and validate a response body.
    ///
    /// The service contract is loose: failures may come back with a success
    /// status as `{"error": "..."}`, and nothing guarantees the verdict
    /// fields are present. Both cases are errors here rather than blank UI.
    pub fn from_json(body: &[u8]) -> Result<Self, ClassifyError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ClassifyError::MalformedBody(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ClassifyError::MalformedBody(
                "expected a JSON object".to_string(),
            ));
        };

        if let Some(message) = map.get("error").and_then(Value::as_str) {
            return Err(ClassifyError::Service(message.to_string()));
        }

        let waste_type = required_text(&map, "waste_type")?;
        let disposal = required_text(&map, "disposal")?;
        let caption = map
            .get("caption")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let detected_objects = map
            .get("detected_objects")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            waste_type,
            disposal,
            caption,
            detected_objects,
        })
    }

    pub fn caption_or_placeholder(&self) -> &str {
        self.caption.as_deref().unwrap_or(CAPTION_PLACEHOLDER)
    }
}

fn required_text(map: &Map<String, Value>, key: &'static str) -> Result<String, ClassifyError> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ClassifyError::MissingField(key))
}
