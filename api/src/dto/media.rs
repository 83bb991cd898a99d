use serde::Deserialize;

/// `?profile=` on uploads; defaults to `image`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    pub profile: Option<String>,
}

impl UploadQuery {
    pub fn profile_name(&self) -> &str {
        self.profile.as_deref().map(str::trim).unwrap_or("image")
    }
}
