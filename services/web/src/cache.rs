use std::collections::HashMap;
use std::time::{Duration, Instant};

use sapdocs_client::models::{KbEntry, ServiceInfo};

struct Stamped<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Stamped<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Time-boxed read cache for the two list endpoints, keyed by filter
/// argument. Expiry is lazy on read; mutations invalidate the whole
/// cache rather than patching it.
pub struct ReadCache {
    ttl: Duration,
    services: Option<Stamped<Vec<ServiceInfo>>>,
    entries: HashMap<Option<String>, Stamped<Vec<KbEntry>>>,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            services: None,
            entries: HashMap::new(),
        }
    }

    pub fn services(&mut self) -> Option<Vec<ServiceInfo>> {
        match &self.services {
            Some(stamped) if stamped.fresh(self.ttl) => Some(stamped.value.clone()),
            Some(_) => {
                self.services = None;
                None
            }
            None => None,
        }
    }

    pub fn put_services(&mut self, value: Vec<ServiceInfo>) {
        self.services = Some(Stamped::new(value));
    }

    pub fn entries(&mut self, filter: Option<&str>) -> Option<Vec<KbEntry>> {
        let key = filter.map(str::to_owned);
        match self.entries.get(&key) {
            Some(stamped) if stamped.fresh(self.ttl) => Some(stamped.value.clone()),
            Some(_) => {
                self.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn put_entries(&mut self, filter: Option<&str>, value: Vec<KbEntry>) {
        self.entries.insert(filter.map(str::to_owned), Stamped::new(value));
    }

    pub fn invalidate(&mut self) {
        self.services = None;
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> KbEntry {
        KbEntry {
            id: id.to_string(),
            service_key: "ai_core".to_string(),
            title: "Deploying models".to_string(),
            url: String::new(),
            description: String::new(),
            tags: vec![],
        }
    }

    #[test]
    fn fresh_reads_hit_the_cache() {
        let mut cache = ReadCache::new(Duration::from_secs(300));
        cache.put_entries(None, vec![entry("kb-1")]);
        let hit = cache.entries(None).expect("fresh hit");
        assert_eq!(hit[0].id, "kb-1");
    }

    #[test]
    fn stale_reads_miss_and_evict() {
        let mut cache = ReadCache::new(Duration::ZERO);
        cache.put_entries(None, vec![entry("kb-1")]);
        assert!(cache.entries(None).is_none());
        assert!(cache.entries(None).is_none());
    }

    #[test]
    fn filter_arguments_are_independent_keys() {
        let mut cache = ReadCache::new(Duration::from_secs(300));
        cache.put_entries(Some("joule"), vec![entry("kb-2")]);
        assert!(cache.entries(None).is_none());
        assert!(cache.entries(Some("joule")).is_some());
        assert!(cache.entries(Some("ai_core")).is_none());
    }

    #[test]
    fn invalidate_clears_everything() {
        let mut cache = ReadCache::new(Duration::from_secs(300));
        cache.put_services(vec![]);
        cache.put_entries(None, vec![entry("kb-1")]);
        cache.put_entries(Some("joule"), vec![entry("kb-2")]);
        cache.invalidate();
        assert!(cache.services().is_none());
        assert!(cache.entries(None).is_none());
        assert!(cache.entries(Some("joule")).is_none());
    }
}
