use crate::api::TaggingApi;
use crate::error::TaggerError;
use crate::pipeline::CycleStage;
use crate::services::{TagService, UploadRequest, UploadService};
use crate::types::{ImagePayload, ProgressSink, UploadResult};
use std::sync::Arc;
use tower::ServiceExt;
use tracing::{Instrument, debug, error, info_span};
use uuid::Uuid;

/// Upload followed by tag fetch, as one sequential async step.
///
/// Transport failures and malformed responses from either stage end the
/// cycle with an empty `UploadResult`. Only failures to produce the request
/// body (`Encoding`, `Multipart`) come back as `Err`.
#[derive(Clone)]
pub struct TagPipeline {
    upload: UploadService,
    tags: TagService,
}

impl TagPipeline {
    pub fn new(api: Arc<dyn TaggingApi>, jpeg_quality: u8) -> Self {
        Self {
            upload: UploadService::new(api.clone(), jpeg_quality),
            tags: TagService::new(api),
        }
    }

    pub async fn run(
        &self,
        payload: ImagePayload,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<UploadResult, TaggerError> {
        let cycle_id = Uuid::new_v4();
        async move {
            debug!("Stage: {}", CycleStage::Uploading);
            let request = UploadRequest { payload, progress };
            let content_id = match self.upload.clone().oneshot(request).await {
                Ok(content_id) => content_id,
                Err(e) => return Self::recover(CycleStage::Uploading, e),
            };

            debug!("Stage: {}", CycleStage::Fetching);
            match self.tags.clone().oneshot(content_id).await {
                Ok(tags) => Ok(UploadResult::from_tags(tags)),
                Err(e) => Self::recover(CycleStage::Fetching, e),
            }
        }
        .instrument(info_span!("tag_cycle", %cycle_id))
        .await
    }

    fn recover(stage: CycleStage, error: TaggerError) -> Result<UploadResult, TaggerError> {
        error!("Error while {}: {}", stage, error);
        if error.degrades_to_empty() {
            Ok(UploadResult::empty())
        } else {
            Err(error)
        }
    }
}
