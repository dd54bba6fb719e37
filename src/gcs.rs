//! Google Cloud Storage sink backing the [`BlobSink`] trait.
//!
//! Uses the JSON API media upload endpoint; uploading to an existing object
//! name overwrites it, which gives the sink its last-write-wins semantics.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::contract::{BlobSink, SinkError};

const GCS_UPLOAD_API: &str = "https://storage.googleapis.com/upload/storage/v1";

pub struct GcsSink {
    http: Client,
    token: String,
    bucket: String,
}

impl GcsSink {
    pub fn new(http: Client, token: String, bucket: String) -> Self {
        Self {
            http,
            token,
            bucket,
        }
    }
}

#[async_trait]
impl BlobSink for GcsSink {
    async fn store(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), SinkError> {
        let url = format!("{GCS_UPLOAD_API}/b/{}/o", self.bucket);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[("uploadType", "media"), ("name", name)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body: String = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(300)
                .collect();
            error!(
                status = status.as_u16(),
                object = name,
                bucket = %self.bucket,
                body = %body,
                "GCS upload failed"
            );
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }
        info!(object = name, size = bytes.len(), bucket = %self.bucket, "stored blob");
        Ok(())
    }
}
