use std::fmt;

/// Opaque credential sent with every request.
#[derive(Clone)]
pub struct ApiKey {
    key: String,
}

impl ApiKey {
    /// From a raw API key string.
    pub fn from_raw(key: &str) -> Self {
        Self {
            key: key.to_owned(),
        }
    }

    pub fn get(&self) -> &str {
        &self.key
    }
}

// Keep the key out of logs and panic messages.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("key", &"<redacted>").finish()
    }
}
