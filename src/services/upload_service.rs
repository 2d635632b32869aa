use crate::api::{TaggingApi, parse_upload_response};
use crate::error::TaggerError;
use crate::types::{ContentId, ImagePayload, ProgressSink};
use futures::Future;
use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::Service;
use tracing::info;

pub struct UploadRequest {
    pub payload: ImagePayload,
    pub progress: Arc<dyn ProgressSink>,
}

/// Encodes the payload, uploads it and yields the id of the stored content.
#[derive(Clone)]
pub struct UploadService {
    api: Arc<dyn TaggingApi>,
    jpeg_quality: u8,
}

impl UploadService {
    pub fn new(api: Arc<dyn TaggingApi>, jpeg_quality: u8) -> Self {
        Self { api, jpeg_quality }
    }
}

impl Service<UploadRequest> for UploadService {
    type Response = ContentId;
    type Error = TaggerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: UploadRequest) -> Self::Future {
        let api = self.api.clone();
        let jpeg_quality = self.jpeg_quality;

        Box::pin(async move {
            let jpeg = request.payload.into_jpeg(jpeg_quality)?;
            let body = api.upload_content(jpeg, request.progress).await?;
            let content_id = parse_upload_response(&body)?;
            info!("Content uploaded with ID: {}", content_id);
            Ok(content_id)
        })
    }
}
