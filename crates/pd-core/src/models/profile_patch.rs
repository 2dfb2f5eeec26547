use serde::Serialize;

/// Partial profile update. Absent fields are left unchanged.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Blank or absent means "leave unchanged", never "clear"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grok_api_key: Option<String>,
}

impl ProfilePatch {
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn grok_api_key(mut self, key: impl Into<String>) -> Self {
        self.grok_api_key = Some(key.into());
        self
    }

    /// Trim every field and drop blank secrets.
    pub fn normalized(&self) -> Self {
        Self {
            full_name: self.full_name.as_deref().map(|name| name.trim().to_string()),
            grok_api_key: self
                .grok_api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(String::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.grok_api_key.is_none()
    }
}

impl std::fmt::Debug for ProfilePatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePatch")
            .field("full_name", &self.full_name)
            .field(
                "grok_api_key",
                &self.grok_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
