mod tag_service;
mod upload_service;

pub use tag_service::TagService;
pub use upload_service::{UploadRequest, UploadService};
