use super::tagging_api::TaggingApi;
use crate::error::TaggerError;
use crate::types::{ContentId, ProgressSink};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Canned endpoint behaviour for pipeline tests.
pub(crate) enum FakeReply {
    Json(&'static str),
    TransportFailure,
}

impl FakeReply {
    fn reply(&self) -> Result<Bytes, TaggerError> {
        match self {
            FakeReply::Json(body) => Ok(Bytes::from(body.to_string())),
            FakeReply::TransportFailure => Err(transport_error()),
        }
    }
}

/// A real `reqwest::Error`; the type has no public constructor.
pub(crate) fn transport_error() -> TaggerError {
    let error = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    TaggerError::Transport(error)
}

pub(crate) struct FakeTaggingApi {
    upload: FakeReply,
    tagging: FakeReply,
    uploads: AtomicUsize,
    fetches: AtomicUsize,
    pub fetched_ids: Mutex<Vec<String>>,
}

impl FakeTaggingApi {
    pub fn new(upload: FakeReply, tagging: FakeReply) -> Arc<Self> {
        Arc::new(Self {
            upload,
            tagging,
            uploads: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            fetched_ids: Mutex::new(Vec::new()),
        })
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaggingApi for FakeTaggingApi {
    async fn upload_content(
        &self,
        jpeg: Bytes,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Bytes, TaggerError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        let total = jpeg.len().max(1) as f32;
        let half = jpeg.len() / 2;
        progress.report(half as f32 / total);
        progress.report(1.0);
        self.upload.reply()
    }

    async fn fetch_tagging(&self, content_id: &ContentId) -> Result<Bytes, TaggerError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.fetched_ids
            .lock()
            .unwrap()
            .push(content_id.as_str().to_string());
        self.tagging.reply()
    }
}
