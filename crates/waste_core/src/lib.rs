//! Core of the waste classification client: image intake, the remote
//! classifier, and the uploader state machine the GUI renders.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod intake;
pub mod result;
pub mod state;

pub use client::{ClassifyService, HttpClassifier};
pub use config::ClientConfig;
pub use dispatch::{Completion, Dispatcher};
pub use error::{ClassifyError, ConfigError, IntakeError};
pub use intake::{IMAGE_EXTENSIONS, Preview, SelectedImage};
pub use result::{CAPTION_PLACEHOLDER, ClassificationResult};
pub use state::{RequestToken, Screen, SubmissionTicket, Uploader, UploaderState};
