use std::path::PathBuf;

/// Failure of a single classification request.
///
/// Every variant ends up as the same user-visible outcome (the uploader goes
/// back to the ready screen with a message), but they are kept apart so the
/// log says what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("request to classification service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classification service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("classification service returned an unreadable body: {0}")]
    MalformedBody(String),
    #[error("classification service reported an error: {0}")]
    Service(String),
    #[error("classification response is missing `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not start submission worker: {0}")]
    Worker(#[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is not a readable image: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("endpoint `{0}` is not an absolute http(s) URL")]
    InvalidEndpoint(String),
    #[error("multipart field name must not be empty")]
    EmptyFieldName,
}
