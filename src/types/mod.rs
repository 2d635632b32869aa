mod content_id;
mod image_payload;
mod progress;
mod upload_result;

pub use content_id::ContentId;
pub use image_payload::ImagePayload;
pub use progress::{NoProgress, ProgressFraction, ProgressSink, ProgressTracker, progress_stream};
pub use upload_result::{PhotoColor, Tag, UploadResult};
