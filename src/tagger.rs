use crate::{
    api::{HttpTaggingApi, TaggingApi},
    config::TaggerConfig,
    dispatch::{CallbackQueue, CallbackSender, QueuedProgress, callback_queue},
    error::TaggerError,
    pipeline::TagPipeline,
    types::{ImagePayload, ProgressFraction, ProgressSink, UploadResult},
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Callback entry point for an upload cycle.
///
/// Work runs on a spawned tokio task. `on_progress` and `on_complete` are
/// never called from that task; they are posted to the `CallbackQueue`
/// returned by the builder and run by whoever drives it. Overlapping
/// uploads are not prevented.
pub struct PhotoTagger {
    pipeline: Arc<TagPipeline>,
    callbacks: CallbackSender,
}

impl PhotoTagger {
    pub fn builder(configuration: TaggerConfig) -> PhotoTaggerBuilder {
        PhotoTaggerBuilder::new(configuration)
    }

    /// Must be called within a tokio runtime. `on_complete` fires exactly
    /// once, with `Err` only when the image could not be turned into a
    /// request body.
    pub fn upload<P, C>(
        &self,
        payload: ImagePayload,
        on_progress: P,
        on_complete: C,
    ) -> JoinHandle<()>
    where
        P: Fn(ProgressFraction) + Send + Sync + 'static,
        C: FnOnce(Result<UploadResult, TaggerError>) + Send + 'static,
    {
        let pipeline = self.pipeline.clone();
        let callbacks = self.callbacks.clone();
        let progress: Arc<dyn ProgressSink> =
            Arc::new(QueuedProgress::new(callbacks.clone(), on_progress));

        tokio::spawn(async move {
            let outcome = pipeline.run(payload, progress).await;
            if !callbacks.post(move || on_complete(outcome)) {
                warn!("Upload finished after the callback queue was dropped");
            }
        })
    }
}

pub struct PhotoTaggerBuilder {
    configuration: TaggerConfig,
    api: Option<Arc<dyn TaggingApi>>,
}

impl PhotoTaggerBuilder {
    pub fn new(configuration: TaggerConfig) -> Self {
        Self {
            configuration,
            api: None,
        }
    }

    // Sets the authorization credential, this will override the configuration.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.configuration.api_key = api_key.into();
        self
    }

    // Sets the upload endpoint, this will override the configuration.
    pub fn upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.configuration.upload_url = upload_url.into();
        self
    }

    // Sets the tagging endpoint, this will override the configuration.
    pub fn tagging_url(mut self, tagging_url: impl Into<String>) -> Self {
        self.configuration.tagging_url = tagging_url.into();
        self
    }

    pub fn jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.configuration.jpeg_quality = jpeg_quality;
        self
    }

    /// Replaces the HTTP transport.
    pub fn api(mut self, api: Arc<dyn TaggingApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> Result<(PhotoTagger, CallbackQueue), TaggerError> {
        let api = match self.api {
            Some(api) => api,
            None => {
                let client = reqwest::Client::builder().build()?;
                Arc::new(HttpTaggingApi::with_client(client, self.configuration.clone()))
            }
        };
        let (callbacks, queue) = callback_queue();
        let tagger = PhotoTagger {
            pipeline: Arc::new(TagPipeline::new(api, self.configuration.jpeg_quality)),
            callbacks,
        };
        Ok((tagger, queue))
    }
}
