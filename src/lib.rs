pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod services;
pub mod tagger;
pub mod types;

pub use crate::config::TaggerConfig;
pub use error::{AppError, TaggerError};

pub use api::{HttpTaggingApi, TaggingApi};
pub use dispatch::CallbackQueue;
pub use pipeline::TagPipeline;
pub use tagger::{PhotoTagger, PhotoTaggerBuilder};
pub use types::{ContentId, ImagePayload, PhotoColor, ProgressFraction, Tag, UploadResult};
