//! Uploader state machine.
//!
//! One tagged value replaces the loose bundle of "file / preview / result /
//! loading" flags, so a result without an image (or a loading flag outside
//! the ready screen) cannot be represented. Every submission carries a
//! [`RequestToken`]; a reset, a new file or a new submission moves the
//! generation forward, and completions carrying an older token are dropped.

use crate::error::ClassifyError;
use crate::intake::{Preview, SelectedImage};
use crate::result::ClassificationResult;

/// Generation counter value identifying one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Default)]
pub enum UploaderState {
    #[default]
    Idle,
    Ready {
        image: SelectedImage,
        preview: Preview,
        in_flight: Option<RequestToken>,
        /// Message from the last failed submission.
        error: Option<String>,
    },
    Result {
        image: SelectedImage,
        preview: Preview,
        result: ClassificationResult,
    },
}

/// What the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Idle,
    Ready {
        loading: bool,
        error: Option<&'a str>,
    },
    Result(&'a ClassificationResult),
}

/// Work handed to whoever performs the request.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub token: RequestToken,
    pub image: SelectedImage,
}

#[derive(Debug, Default)]
pub struct Uploader {
    state: UploaderState,
    generation: u64,
}

impl Uploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploaderState {
        &self.state
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.state {
            UploaderState::Idle => Screen::Idle,
            UploaderState::Ready {
                in_flight, error, ..
            } => Screen::Ready {
                loading: in_flight.is_some(),
                error: error.as_deref(),
            },
            UploaderState::Result { result, .. } => Screen::Result(result),
        }
    }

    pub fn preview(&self) -> Option<&Preview> {
        match &self.state {
            UploaderState::Idle => None,
            UploaderState::Ready { preview, .. } | UploaderState::Result { preview, .. } => {
                Some(preview)
            }
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        match &self.state {
            UploaderState::Idle => None,
            UploaderState::Ready { image, .. } | UploaderState::Result { image, .. } => {
                Some(image)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            UploaderState::Ready {
                in_flight: Some(_),
                ..
            }
        )
    }

    pub fn submit_enabled(&self) -> bool {
        matches!(
            self.state,
            UploaderState::Ready {
                in_flight: None,
                ..
            }
        )
    }

    /// Stage a new image, replacing whatever was there before.
    pub fn select(&mut self, image: SelectedImage, preview: Preview) {
        self.bump_generation();
        tracing::info!("Selected {}", image.file_name());
        self.state = UploaderState::Ready {
            image,
            preview,
            in_flight: None,
            error: None,
        };
    }

    /// Start a submission for the staged image.
    ///
    /// Returns `None` when there is nothing to submit or a request is
    /// already in flight.
    pub fn begin_submission(&mut self) -> Option<SubmissionTicket> {
        if !self.submit_enabled() {
            tracing::debug!("Submission ignored in current state");
            return None;
        }
        let token = self.bump_generation();
        let UploaderState::Ready {
            image,
            in_flight,
            error,
            ..
        } = &mut self.state
        else {
            return None;
        };
        *in_flight = Some(token);
        *error = None;
        Some(SubmissionTicket {
            token,
            image: image.clone(),
        })
    }

    /// Apply the outcome of a submission. Returns false for stale tokens.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<ClassificationResult, ClassifyError>,
    ) -> bool {
        let current = match &self.state {
            UploaderState::Ready { in_flight, .. } => *in_flight,
            _ => None,
        };
        if current != Some(token) {
            tracing::warn!("Discarding stale classification response {:?}", token);
            return false;
        }

        let state = std::mem::take(&mut self.state);
        let UploaderState::Ready { image, preview, .. } = state else {
            self.state = state;
            return false;
        };
        self.state = match outcome {
            Ok(result) => {
                tracing::info!(
                    "Classified {} as {} ({})",
                    image.file_name(),
                    result.waste_type,
                    result.disposal
                );
                UploaderState::Result {
                    image,
                    preview,
                    result,
                }
            }
            Err(e) => {
                tracing::warn!("Classification of {} failed: {e}", image.file_name());
                UploaderState::Ready {
                    image,
                    preview,
                    in_flight: None,
                    error: Some(e.to_string()),
                }
            }
        };
        true
    }

    /// Drop everything and return to the upload screen.
    pub fn reset(&mut self) {
        self.bump_generation();
        self.state = UploaderState::Idle;
    }

    fn bump_generation(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::tests::png_bytes;

    fn staged(name: &str) -> (SelectedImage, Preview) {
        let image = SelectedImage::from_bytes(name, png_bytes(8, 8));
        let preview = Preview::derive(&image).unwrap();
        (image, preview)
    }

    fn verdict(caption: Option<&str>) -> ClassificationResult {
        ClassificationResult {
            waste_type: "plastic".into(),
            disposal: "recycle".into(),
            caption: caption.map(str::to_string),
            detected_objects: Vec::new(),
        }
    }

    fn ready_uploader() -> Uploader {
        let mut up = Uploader::new();
        let (image, preview) = staged("bottle.png");
        up.select(image, preview);
        up
    }

    #[test]
    fn selecting_moves_idle_to_ready_with_preview() {
        let mut up = Uploader::new();
        assert_eq!(up.screen(), Screen::Idle);
        assert!(up.preview().is_none());

        let (image, preview) = staged("bottle.png");
        up.select(image, preview);

        assert_eq!(
            up.screen(),
            Screen::Ready {
                loading: false,
                error: None
            }
        );
        assert!(!up.preview().unwrap().is_empty());
        assert_eq!(up.selected().unwrap().file_name(), "bottle.png");
        assert!(up.submit_enabled());
    }

    #[test]
    fn submitting_without_file_is_a_no_op() {
        let mut up = Uploader::new();
        assert!(up.begin_submission().is_none());
        assert_eq!(up.screen(), Screen::Idle);
        assert!(!up.is_loading());
    }

    #[test]
    fn successful_response_shows_result_and_clears_loading() {
        let mut up = ready_uploader();
        let ticket = up.begin_submission().unwrap();
        assert!(up.is_loading());
        assert!(!up.submit_enabled());

        assert!(up.complete(ticket.token, Ok(verdict(Some("a bottle")))));

        assert!(!up.is_loading());
        let Screen::Result(result) = up.screen() else {
            panic!("expected result screen");
        };
        assert_eq!(result.waste_type, "plastic");
        assert_eq!(result.disposal, "recycle");
        assert_eq!(result.caption_or_placeholder(), "a bottle");
        assert!(up.preview().is_some());
    }

    #[test]
    fn failure_returns_to_ready_with_error() {
        let mut up = ready_uploader();
        let ticket = up.begin_submission().unwrap();

        let applied = up.complete(
            ticket.token,
            Err(ClassifyError::MalformedBody("expected value".into())),
        );

        assert!(applied);
        assert!(!up.is_loading());
        let Screen::Ready { loading, error } = up.screen() else {
            panic!("expected ready screen");
        };
        assert!(!loading);
        assert!(error.unwrap().contains("unreadable body"));

        // A retry clears the old message.
        up.begin_submission().unwrap();
        assert_eq!(
            up.screen(),
            Screen::Ready {
                loading: true,
                error: None
            }
        );
    }

    #[test]
    fn second_submission_while_loading_is_refused() {
        let mut up = ready_uploader();
        let first = up.begin_submission();
        let second = up.begin_submission();
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn reset_from_result_returns_to_idle() {
        let mut up = ready_uploader();
        let ticket = up.begin_submission().unwrap();
        up.complete(ticket.token, Ok(verdict(None)));

        up.reset();

        assert_eq!(up.screen(), Screen::Idle);
        assert!(up.preview().is_none());
        assert!(up.selected().is_none());
        assert!(matches!(up.state(), UploaderState::Idle));
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let mut up = ready_uploader();
        let ticket = up.begin_submission().unwrap();
        up.reset();

        assert!(!up.complete(ticket.token, Ok(verdict(None))));
        assert_eq!(up.screen(), Screen::Idle);
    }

    #[test]
    fn response_for_replaced_image_is_discarded() {
        let mut up = ready_uploader();
        let ticket = up.begin_submission().unwrap();
        let (image, preview) = staged("can.png");
        up.select(image, preview);

        assert!(!up.complete(ticket.token, Ok(verdict(None))));
        assert_eq!(
            up.screen(),
            Screen::Ready {
                loading: false,
                error: None
            }
        );
        assert_eq!(up.selected().unwrap().file_name(), "can.png");
    }

    #[test]
    fn only_latest_token_is_applied() {
        let mut up = ready_uploader();
        let first = up.begin_submission().unwrap();
        up.complete(first.token, Err(ClassifyError::Service("busy".into())));
        let second = up.begin_submission().unwrap();
        assert!(second.token > first.token);

        assert!(!up.complete(first.token, Ok(verdict(None))));
        assert!(up.is_loading());
        assert!(up.complete(second.token, Ok(verdict(None))));
        assert!(matches!(up.screen(), Screen::Result(_)));
    }

    #[test]
    fn nothing_to_submit_from_result_screen() {
        let mut up = ready_uploader();
        let ticket = up.begin_submission().unwrap();
        up.complete(ticket.token, Ok(verdict(None)));
        assert!(up.begin_submission().is_none());
        assert!(!up.submit_enabled());
    }
}
