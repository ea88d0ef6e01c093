use super::Api;
use crate::error::ApiResult;
use crate::models::{Download, FileAttachment};

impl Api {
    pub async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> ApiResult<FileAttachment> {
        self.http.upload("/files/upload", filename, bytes).await
    }

    pub async fn download_file(&self, file_id: i64) -> ApiResult<Download> {
        self.http.download(&format!("/files/{file_id}")).await
    }

    pub async fn get_files_for_submission(&self, submission_id: i64) -> ApiResult<Vec<FileAttachment>> {
        self.http.get(&format!("/files/submission/{submission_id}")).await
    }
}
