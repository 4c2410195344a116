use super::{CancelToken, EncodedImage, ExportRequest, write_gif_file_guarded};
use crate::error::ExportError;
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

/// Pending result of a background export.
#[derive(Debug)]
pub struct ExportHandle {
    receiver: oneshot::Receiver<Result<EncodedImage, ExportError>>,
    token: CancelToken,
}

impl ExportHandle {
    /// Ask the job to stop at the next frame boundary. Once the file has been
    /// moved into place the job is done and this has no effect.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Block the current thread until the job ends.
    pub fn wait(self) -> Result<EncodedImage, ExportError> {
        futures::executor::block_on(self)
    }
}

impl Future for ExportHandle {
    type Output = Result<EncodedImage, ExportError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(ExportError::Interrupted)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Runs exports on a background thread, one at a time. Starting a new
/// export cancels the one in flight.
#[derive(Debug, Default)]
pub struct Exporter {
    active: Arc<Mutex<Option<CancelToken>>>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `request` and starts it. Policy rejections such as
    /// [`ExportError::TooManyFrames`] come back here, before any work is done.
    pub fn start(&self, request: ExportRequest) -> Result<ExportHandle, ExportError> {
        request.options.check(request.frames.len())?;

        let token = CancelToken::new();
        {
            // Cancelling under the lock orders this against the previous
            // job's final rename.
            let mut active = self.active.lock();
            if let Some(previous) = active.replace(token.clone()) {
                log::info!("cancelling previous export");
                previous.cancel();
            }
        }

        let (sender, receiver) = oneshot::channel();
        let active = Arc::clone(&self.active);
        let worker_token = token.clone();
        log::info!(
            "starting export of {} frames to {}",
            request.frames.len(),
            request.destination.display()
        );

        let spawned = thread::Builder::new()
            .name("frameflow-export".to_owned())
            .spawn(move || {
                let result = write_gif_file_guarded(&request, &worker_token, || active.lock());
                {
                    let mut slot = active.lock();
                    if slot.as_ref().is_some_and(|t| t.same_job(&worker_token)) {
                        *slot = None;
                    }
                }
                // The caller may have dropped the handle; the file is still in place.
                let _ = sender.send(result);
            });

        if let Err(err) = spawned {
            let mut slot = self.active.lock();
            if slot.as_ref().is_some_and(|t| t.same_job(&token)) {
                *slot = None;
            }
            return Err(ExportError::Io(err));
        }

        Ok(ExportHandle { receiver, token })
    }

    /// Cancels the running export, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        match self.active.lock().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.lock().is_some()
    }
}
