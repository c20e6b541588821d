use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use sapdocs_client::models::{KbEntry, ServiceInfo};
use sapdocs_client::{ApiClient, ApiError};
use sapdocs_config::catalog;
use sapdocs_config::AppConfig;

use crate::cache::ReadCache;
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Arc<ApiClient>,
    session: Arc<Mutex<Session>>,
    cache: Arc<Mutex<ReadCache>>,
}

impl AppState {
    pub fn new(config: AppConfig, client: ApiClient) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            session: Arc::new(Mutex::new(Session::default())),
            cache: Arc::new(Mutex::new(ReadCache::new(ttl))),
        }
    }

    pub fn session(&self) -> MutexGuard<'_, Session> {
        lock_or_recover(&self.session)
    }

    pub fn cache(&self) -> MutexGuard<'_, ReadCache> {
        lock_or_recover(&self.cache)
    }

    /// Service list through the read cache.
    pub async fn services(&self) -> Result<Vec<ServiceInfo>, ApiError> {
        let cached = { self.cache().services() };
        if let Some(services) = cached {
            return Ok(services);
        }
        let services = self.client.fetch_services().await?;
        self.cache().put_services(services.clone());
        Ok(services)
    }

    /// Entry list through the read cache, keyed by the filter argument.
    pub async fn entries(&self, filter: Option<&str>) -> Result<Vec<KbEntry>, ApiError> {
        let cached = { self.cache().entries(filter) };
        if let Some(entries) = cached {
            return Ok(entries);
        }
        let entries = self.client.fetch_entries(filter).await?;
        self.cache().put_entries(filter, entries.clone());
        Ok(entries)
    }
}

// Mutex poisoning only happens if a holder panicked; the state is still
// usable, so recover the guard instead of propagating the panic.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Display-name map: live service list layered over the static fallback.
pub fn service_name_map(services: &[ServiceInfo]) -> HashMap<String, String> {
    let mut names: HashMap<String, String> = catalog::SERVICE_DISPLAY
        .iter()
        .map(|(key, name)| (key.to_string(), name.to_string()))
        .collect();
    for service in services {
        names.insert(service.key.clone(), service.display_name.clone());
    }
    names
}

/// Resolve a service key for display, falling back to the key itself.
pub fn service_name<'a>(key: &'a str, names: &'a HashMap<String, String>) -> &'a str {
    names
        .get(key)
        .map(String::as_str)
        .or_else(|| catalog::service_display_fallback(key))
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_names_override_fallback() {
        let services = vec![ServiceInfo {
            key: "ai_core".to_string(),
            display_name: "AI Core (renamed)".to_string(),
            description: String::new(),
            doc_count: 0,
        }];
        let names = service_name_map(&services);
        assert_eq!(service_name("ai_core", &names), "AI Core (renamed)");
        assert_eq!(service_name("joule", &names), "SAP Joule");
        assert_eq!(service_name("mystery", &names), "mystery");
    }
}
