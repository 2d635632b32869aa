use crate::api::{TaggingApi, parse_tagging_response};
use crate::error::TaggerError;
use crate::types::{ContentId, Tag};
use futures::Future;
use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::Service;
use tracing::info;

#[derive(Clone)]
pub struct TagService {
    api: Arc<dyn TaggingApi>,
}

impl TagService {
    pub fn new(api: Arc<dyn TaggingApi>) -> Self {
        Self { api }
    }
}

impl Service<ContentId> for TagService {
    type Response = Vec<Tag>;
    type Error = TaggerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, content_id: ContentId) -> Self::Future {
        let api = self.api.clone();

        Box::pin(async move {
            let body = api.fetch_tagging(&content_id).await?;
            let tags = parse_tagging_response(&body)?;
            info!("Received {} tags for {}", tags.len(), content_id);
            Ok(tags)
        })
    }
}
