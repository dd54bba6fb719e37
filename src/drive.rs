//! Google Drive v3 REST client backing the [`Drive`] trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::contract::{Drive, DriveError, FileDescriptor};

const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";

pub struct DriveClient {
    http: Client,
    token: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileDescriptor>,
}

impl DriveClient {
    pub fn new(http: Client, token: String) -> Self {
        Self { http, token }
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, DriveError> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = body_snippet(resp.text().await.unwrap_or_default());
            error!(status = status.as_u16(), url, body = %body, "Drive API error");
            return Err(DriveError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

fn body_snippet(body: String) -> String {
    body.chars().take(300).collect()
}

#[async_trait]
impl Drive for DriveClient {
    async fn list_folder(&self, folder_id: &str) -> Result<Vec<FileDescriptor>, DriveError> {
        let query = format!("'{folder_id}' in parents and trashed = false");
        let resp = self
            .http
            .get(format!("{DRIVE_API}/files"))
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name,mimeType)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = body_snippet(resp.text().await.unwrap_or_default());
            error!(status = status.as_u16(), folder_id, body = %body, "Drive listing failed");
            return Err(DriveError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let list: FileList = resp.json().await?;
        debug!(count = list.files.len(), folder_id, "listed Drive folder");
        Ok(list.files)
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let url = format!("{DRIVE_API}/files/{file_id}");
        self.get_bytes(&url, &[("alt", "media"), ("supportsAllDrives", "true")])
            .await
    }

    async fn export_pdf(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let url = format!("{DRIVE_API}/files/{file_id}/export");
        self.get_bytes(&url, &[("mimeType", "application/pdf")])
            .await
    }
}
