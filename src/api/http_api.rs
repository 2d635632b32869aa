use super::tagging_api::TaggingApi;
use crate::config::TaggerConfig;
use crate::error::TaggerError;
use crate::types::{ContentId, ProgressSink, progress_stream};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    Body, Client,
    header::AUTHORIZATION,
    multipart::{Form, Part},
};
use std::sync::Arc;
use tracing::debug;

const JPEG_MIME: &str = "image/jpeg";

/// `TaggingApi` over plain HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTaggingApi {
    client: Client,
    config: Arc<TaggerConfig>,
}

impl HttpTaggingApi {
    pub fn new(config: TaggerConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: TaggerConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    fn image_part(
        &self,
        jpeg: Bytes,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Part, TaggerError> {
        let length = jpeg.len() as u64;
        let body = Body::wrap_stream(progress_stream(
            jpeg,
            self.config.progress_chunk_size,
            progress,
        ));
        Part::stream_with_length(body, length)
            .file_name(self.config.upload_file_name.clone())
            .mime_str(JPEG_MIME)
            .map_err(|e| TaggerError::Multipart(e.to_string()))
    }
}

#[async_trait]
impl TaggingApi for HttpTaggingApi {
    async fn upload_content(
        &self,
        jpeg: Bytes,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Bytes, TaggerError> {
        debug!("Uploading {} bytes to {}", jpeg.len(), self.config.upload_url);
        let form = Form::new().part(
            self.config.upload_field_name.clone(),
            self.image_part(jpeg, progress)?,
        );
        let response = self
            .client
            .post(&self.config.upload_url)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?)
    }

    async fn fetch_tagging(&self, content_id: &ContentId) -> Result<Bytes, TaggerError> {
        debug!("Fetching tags for {} from {}", content_id, self.config.tagging_url);
        let response = self
            .client
            .get(&self.config.tagging_url)
            .query(&[("content", content_id.as_str())])
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProgressFraction;
    use std::{net::SocketAddr, sync::Mutex};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    struct CapturedRequest {
        head: String,
        body: String,
    }

    async fn setup_test_server() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn content_length(head: &str) -> Option<usize> {
        head.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }

    // Answers a single request with `status` and `body`, then closes.
    fn respond_once(
        listener: TcpListener,
        status: &'static str,
        body: &'static str,
    ) -> JoinHandle<CapturedRequest> {
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find(&buf, b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let chunked = head.to_ascii_lowercase().contains("transfer-encoding: chunked");
            let expected = content_length(&head);
            loop {
                let received = buf.len() - header_end;
                let done = match expected {
                    Some(length) => received >= length,
                    None if chunked => buf.ends_with(b"0\r\n\r\n"),
                    None => true,
                };
                if done {
                    break;
                }
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            CapturedRequest {
                head,
                body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
            }
        })
    }

    fn test_config(addr: SocketAddr) -> TaggerConfig {
        TaggerConfig {
            upload_url: format!("http://{}/v1/content", addr),
            tagging_url: format!("http://{}/v1/tagging", addr),
            api_key: "Basic test-key".to_string(),
            progress_chunk_size: 4,
            ..TaggerConfig::default()
        }
    }

    fn test_api(addr: SocketAddr) -> HttpTaggingApi {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpTaggingApi::with_client(client, test_config(addr))
    }

    #[test]
    fn test_image_part_builds_with_jpeg_mime() {
        let api = HttpTaggingApi::new(TaggerConfig::default());
        let part = api.image_part(
            Bytes::from_static(b"fake-jpeg-bytes"),
            Arc::new(crate::types::NoProgress),
        );
        assert!(part.is_ok());
    }

    #[tokio::test]
    async fn test_upload_content_sends_multipart_image() {
        let (listener, addr) = setup_test_server().await;
        let server = respond_once(listener, "200 OK", r#"{"uploaded":[{"id":"abc123"}]}"#);

        let seen = Arc::new(Mutex::new(Vec::<ProgressFraction>::new()));
        let recorder = seen.clone();
        let progress: Arc<dyn ProgressSink> =
            Arc::new(move |fraction: ProgressFraction| recorder.lock().unwrap().push(fraction));

        let api = test_api(addr);
        let body = api
            .upload_content(Bytes::from_static(b"fake-jpeg-bytes"), progress)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"uploaded":[{"id":"abc123"}]}"#);

        let request = server.await.unwrap();
        let head = request.head.to_ascii_lowercase();
        assert!(head.starts_with("post /v1/content http/1.1"));
        assert!(head.contains("authorization: basic test-key"));
        assert!(head.contains("multipart/form-data"));

        let multipart = request.body.to_ascii_lowercase();
        assert!(multipart.contains("name=\"imagefile\""));
        assert!(multipart.contains("filename=\"image.jpg\""));
        assert!(multipart.contains("content-type: image/jpeg"));
        assert!(request.body.contains("fake-jpeg-bytes"));

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_fetch_tagging_sends_content_query() {
        let (listener, addr) = setup_test_server().await;
        let server = respond_once(
            listener,
            "200 OK",
            r#"{"results":[{"tags":[{"tag":"cat"}]}]}"#,
        );

        let api = test_api(addr);
        let content_id = ContentId::new("abc123").unwrap();
        let body = api.fetch_tagging(&content_id).await.unwrap();
        assert_eq!(&body[..], br#"{"results":[{"tags":[{"tag":"cat"}]}]}"#);

        let request = server.await.unwrap();
        let head = request.head.to_ascii_lowercase();
        assert!(head.starts_with("get /v1/tagging?content=abc123 http/1.1"));
        assert!(head.contains("authorization: basic test-key"));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_failure() {
        let (listener, addr) = setup_test_server().await;
        let server = respond_once(listener, "500 Internal Server Error", r#"{"status":"error"}"#);

        let api = test_api(addr);
        let content_id = ContentId::new("abc123").unwrap();
        let result = api.fetch_tagging(&content_id).await;
        assert!(matches!(result, Err(TaggerError::Transport(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_failure() {
        let (listener, addr) = setup_test_server().await;
        drop(listener);

        let api = test_api(addr);
        let result = api
            .upload_content(
                Bytes::from_static(b"fake-jpeg-bytes"),
                Arc::new(crate::types::NoProgress),
            )
            .await;
        assert!(matches!(result, Err(TaggerError::Transport(_))));
    }
}
