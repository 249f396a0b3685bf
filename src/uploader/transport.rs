use bytes::Bytes;
use reqwest::{multipart, Body, Client};

use crate::config::Environment;
use crate::errors::{AppError, AppResult};

/// Default upload path on the compliance backend.
pub const DEFAULT_UPLOAD_PATH: &str = "/api/v1/compliance/upload";

/// Chunk size for the progress-reporting request body.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// HTTP transport for report uploads.
///
/// One multipart `POST` per report, with the file streamed through a
/// chunked body so the caller sees percent-of-bytes-sent against the known
/// total.
pub struct UploadClient {
    client: Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(env: &Environment) -> AppResult<Self> {
        env.validate()?;
        let client = Client::builder().timeout(env.api_timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", env.api_base_url, DEFAULT_UPLOAD_PATH),
        })
    }

    /// Point the transport at a non-default endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload one report. `on_progress(sent, total)` fires at 0 before the
    /// request starts and after each chunk is handed to the connection.
    ///
    /// A 2xx response must carry a JSON body; anything else maps onto the
    /// error taxonomy (`Server`, `InvalidResponse`, `Network`).
    pub async fn upload_report<F>(
        &self,
        file_name: &str,
        data: Bytes,
        mut on_progress: F,
    ) -> AppResult<serde_json::Value>
    where
        F: FnMut(u64, u64) + Send + 'static,
    {
        let total = data.len() as u64;
        on_progress(0, total);

        let body = progress_body(data, total, on_progress);
        let part = multipart::Part::stream_with_length(body, total)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::server(status.as_u16(), body))
        }
    }
}

/// Wrap the report bytes in a chunked stream that reports cumulative bytes
/// handed to the connection. `Bytes::slice` keeps the chunks zero-copy.
fn progress_body<F>(data: Bytes, total: u64, mut on_progress: F) -> Body
where
    F: FnMut(u64, u64) + Send + 'static,
{
    let mut offset = 0usize;
    let mut sent = 0u64;

    let chunks = std::iter::from_fn(move || {
        if offset >= data.len() {
            return None;
        }
        let end = usize::min(offset + UPLOAD_CHUNK_SIZE, data.len());
        let chunk = data.slice(offset..end);
        offset = end;
        sent += chunk.len() as u64;
        on_progress(sent, total);
        Some(Ok::<Bytes, std::io::Error>(chunk))
    });

    Body::wrap_stream(futures::stream::iter(chunks))
}
