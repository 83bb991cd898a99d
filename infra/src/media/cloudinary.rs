//! Cloudinary upload API client
//!
//! Requests are signed with SHA-256 over the alphabetically sorted
//! parameters followed by the API secret.

use async_trait::async_trait;
use chrono::Utc;
use pz_core::domain::entities::media::{MediaAsset, UploadProfile};
use pz_core::errors::MediaHostError;
use pz_core::services::{HealthProbe, MediaHost};
use pz_shared::config::MediaConfig;
use pz_shared::types::ServiceHealth;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<f64>,
    bytes: u64,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

pub struct CloudinaryMediaHost {
    client: Client,
    api_base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryMediaHost {
    pub fn new(config: &MediaConfig) -> Result<Self, InfrastructureError> {
        let (Some(cloud_name), Some(api_key), Some(api_secret)) =
            (&config.cloud_name, &config.api_key, &config.api_secret)
        else {
            return Err(InfrastructureError::Config(
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET are required".to_string(),
            ));
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cloud_name: cloud_name.clone(),
            api_key: api_key.clone(),
            api_secret: api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    fn endpoint(&self, profile: UploadProfile, action: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/{}",
            self.api_base_url,
            self.cloud_name,
            profile.resource_type(),
            action
        )
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        sign_params(params, &self.api_secret)
    }

    async fn error_from(response: reqwest::Response) -> MediaHostError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("HTTP {status}"));
        MediaHostError::new(Some(status), message)
    }
}

/// `k1=v1&k2=v2...` sorted by key, with the secret appended, hashed with SHA-256
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaHost for CloudinaryMediaHost {
    async fn upload(&self, bytes: Vec<u8>, profile: UploadProfile, public_id: &str) -> Result<MediaAsset, MediaHostError> {
        let timestamp = Utc::now().timestamp().to_string();
        let params = [
            ("folder", self.folder.clone()),
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
        ];
        let signature = self.sign(&params);

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name("upload"))
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.endpoint(profile, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaHostError::transport(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            let error = Self::error_from(response).await;
            tracing::warn!(http_code = ?error.http_code, "media upload rejected: {}", error.message);
            return Err(error);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaHostError::transport(format!("failed to parse upload response: {e}")))?;

        Ok(MediaAsset {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            width: uploaded.width,
            height: uploaded.height,
            duration_seconds: uploaded.duration.map(|d| d.round() as u32),
            bytes: uploaded.bytes,
        })
    }

    async fn delete(&self, public_id: &str, profile: UploadProfile) -> Result<(), MediaHostError> {
        let timestamp = Utc::now().timestamp().to_string();
        let params = [("public_id", public_id.to_string()), ("timestamp", timestamp)];
        let signature = self.sign(&params);

        let mut form: Vec<(&str, String)> = params.to_vec();
        form.push(("api_key", self.api_key.clone()));
        form.push(("signature", signature));
        form.push(("signature_algorithm", "sha256".to_string()));

        let response = self
            .client
            .post(self.endpoint(profile, "destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| MediaHostError::transport(format!("destroy request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaHostError::transport(format!("failed to parse destroy response: {e}")))?;

        match destroyed.result.as_str() {
            "ok" => Ok(()),
            "not found" => Err(MediaHostError::new(Some(404), "Media asset not found")),
            other => Err(MediaHostError::new(None, format!("unexpected destroy result: {other}"))),
        }
    }
}

#[async_trait]
impl HealthProbe for CloudinaryMediaHost {
    fn name(&self) -> &str {
        "media"
    }

    /// Credentials are present; the host itself is not called on every probe
    async fn check(&self) -> ServiceHealth {
        ServiceHealth::healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MediaConfig {
        MediaConfig {
            cloud_name: Some("demo".to_string()),
            api_key: Some("1234".to_string()),
            api_secret: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_signature_sorts_params_and_appends_secret() {
        let params = [
            ("timestamp", "1700000000".to_string()),
            ("public_id", "users/u1/avatar/x".to_string()),
            ("folder", "plaza".to_string()),
        ];

        let mut hasher = Sha256::new();
        hasher.update(b"folder=plaza&public_id=users/u1/avatar/x&timestamp=1700000000secret");
        let expected = hex::encode(hasher.finalize());

        assert_eq!(sign_params(&params, "secret"), expected);
    }

    #[test]
    fn test_signature_skips_empty_values() {
        let with_empty = [("folder", String::new()), ("timestamp", "1".to_string())];
        let without = [("timestamp", "1".to_string())];
        assert_eq!(sign_params(&with_empty, "s"), sign_params(&without, "s"));
    }

    #[test]
    fn test_endpoint_uses_resource_type() {
        let host = CloudinaryMediaHost::new(&config()).unwrap();
        assert_eq!(
            host.endpoint(UploadProfile::Video, "upload"),
            "https://api.cloudinary.com/v1_1/demo/video/upload"
        );
        assert_eq!(
            host.endpoint(UploadProfile::Avatar, "destroy"),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let result = CloudinaryMediaHost::new(&MediaConfig::default());
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
