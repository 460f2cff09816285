//! Persisted proxy-definition records and API payloads.

use serde::{Deserialize, Serialize};

/// A proxied target application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProxyTarget {
    /// Stable identifier; becomes the `/proxy/{id}` path segment.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Origin the proxy forwards to, e.g. `http://10.0.0.5:8080`.
    pub target_url: String,

    #[serde(default)]
    pub description: String,

    /// Disabled targets answer 403 without any outbound call.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Payload for creating a proxy definition.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProxy {
    pub name: String,
    pub target_url: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Explicit id; derived from the name when absent.
    #[serde(default)]
    pub id: Option<String>,
}

impl NewProxy {
    /// Resolve the record id: explicit id wins, otherwise the name is
    /// slugged (lowercased, spaces to dashes).
    pub fn resolved_id(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self.name.to_lowercase().replace(' ', "-"),
        }
    }
}

/// Partial update of a proxy definition; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyPatch {
    pub name: Option<String>,
    pub target_url: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}
