mod callback_queue;
mod queued_progress;

pub use callback_queue::{CallbackQueue, CallbackSender, callback_queue};
pub use queued_progress::QueuedProgress;
