use super::CallbackSender;
use crate::types::{ProgressFraction, ProgressSink};
use std::sync::Arc;

/// Progress sink that re-posts every report onto the callback queue.
pub struct QueuedProgress<F> {
    sender: CallbackSender,
    on_progress: Arc<F>,
}

impl<F> QueuedProgress<F>
where
    F: Fn(ProgressFraction) + Send + Sync + 'static,
{
    pub fn new(sender: CallbackSender, on_progress: F) -> Self {
        Self {
            sender,
            on_progress: Arc::new(on_progress),
        }
    }
}

impl<F> ProgressSink for QueuedProgress<F>
where
    F: Fn(ProgressFraction) + Send + Sync + 'static,
{
    fn report(&self, fraction: ProgressFraction) {
        let on_progress = self.on_progress.clone();
        self.sender.post(move || on_progress(fraction));
    }
}
