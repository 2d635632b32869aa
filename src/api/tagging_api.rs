use crate::error::TaggerError;
use crate::types::{ContentId, ProgressSink};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

/// Raw access to the two tagging service endpoints. Implementations return
/// the response body of a successful (2xx) request.
#[async_trait]
pub trait TaggingApi: Send + Sync {
    async fn upload_content(
        &self,
        jpeg: Bytes,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Bytes, TaggerError>;

    async fn fetch_tagging(&self, content_id: &ContentId) -> Result<Bytes, TaggerError>;
}
