use crate::client::ClassifyService;
use crate::error::ClassifyError;
use crate::result::ClassificationResult;
use crate::state::{RequestToken, SubmissionTicket};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Outcome of one background submission.
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: Result<ClassificationResult, ClassifyError>,
}

/// Runs submissions off the UI thread and queues their outcomes.
///
/// Requests are never cancelled; the uploader drops outcomes whose token is
/// no longer current.
pub struct Dispatcher {
    service: Arc<dyn ClassifyService>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn ClassifyService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { service, tx, rx }
    }

    /// Start the request on a worker thread. `notify` runs after the
    /// completion has been queued.
    pub fn submit<F>(&self, ticket: SubmissionTicket, notify: F) -> Result<(), ClassifyError>
    where
        F: FnOnce() + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        thread::Builder::new()
            .name("classify-request".to_string())
            .spawn(move || {
                let SubmissionTicket { token, image } = ticket;
                let outcome = service.classify(&image);
                if tx.send(Completion { token, outcome }).is_err() {
                    tracing::debug!("Receiver gone, dropping completion {:?}", token);
                    return;
                }
                notify();
            })
            .map_err(ClassifyError::Worker)?;
        Ok(())
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(c) => Some(c),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
