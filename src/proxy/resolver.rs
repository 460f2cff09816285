//! Proxy id resolution against the definition store.

use std::sync::Arc;

use url::Url;

use crate::proxy::error::ProxyError;
use crate::store::ProxyStore;

/// A proxy definition resolved and validated for forwarding.
#[derive(Debug, Clone)]
pub struct ResolvedProxy {
    pub id: String,
    pub target_origin: Url,
}

/// Looks up proxy ids. Holds an injected store handle; performs a fresh
/// point read per call and keeps no state of its own.
pub struct ProxyResolver {
    store: Arc<ProxyStore>,
}

impl ProxyResolver {
    pub fn new(store: Arc<ProxyStore>) -> Self {
        Self { store }
    }

    pub fn lookup(&self, id: &str) -> Result<ResolvedProxy, ProxyError> {
        let record = self.store.get(id).ok_or(ProxyError::NotFound)?;
        if !record.enabled {
            return Err(ProxyError::Disabled);
        }

        let target_origin = Url::parse(record.target_url.trim_end_matches('/'))
            .map_err(|err| {
                ProxyError::Internal(format!(
                    "proxy '{}' has an invalid target url: {}",
                    id, err
                ))
            })?;

        Ok(ResolvedProxy {
            id: record.id,
            target_origin,
        })
    }
}
