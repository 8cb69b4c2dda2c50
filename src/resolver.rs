//! Region name resolution against the GeoNames authority.
//!
//! Sheets spell regions loosely ("Kyiv Region", "kyiv", "Kyiv  region");
//! normalization collapses those to one cache key so each distinct region
//! costs exactly one network lookup per run. The cache is never evicted.

use crate::config::{GEONAMES_COUNTRY, GEONAMES_FEATURE_CLASS, REQUEST_TIMEOUT_SECS};
use crate::error::Error;
use async_trait::async_trait;
use dashmap::DashMap;
use oxrdf::NamedNode;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// The lookup seam: production talks to GeoNames, tests script responses.
#[async_trait]
pub trait AuthorityLookup: Send + Sync {
    /// Searches for a region by its normalized name, returning its entity
    /// IRI if the authority knows it.
    async fn search(&self, name: &str) -> Result<Option<NamedNode>, Error>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    geonames: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(rename = "geonameId")]
    geoname_id: u64,
}

/// GeoNames search client, restricted to one country and one feature class
/// so a bare region name cannot match a street or a lake elsewhere.
pub struct GeoNamesClient {
    client: reqwest::Client,
    base_url: String,
    username: Option<String>,
}

impl GeoNamesClient {
    pub fn new(base_url: impl Into<String>, username: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            username,
        }
    }

    /// Reads the credential from `GEONAMES_USERNAME`. Its absence is only
    /// an error once a lookup is attempted.
    pub fn from_env() -> Self {
        Self::new(
            crate::config::GEONAMES_API_BASE,
            std::env::var("GEONAMES_USERNAME").ok(),
        )
    }
}

#[async_trait]
impl AuthorityLookup for GeoNamesClient {
    async fn search(&self, name: &str) -> Result<Option<NamedNode>, Error> {
        let username = self.username.as_deref().ok_or(Error::MissingCredential)?;
        let response = self
            .client
            .get(format!("{}/searchJSON", self.base_url))
            .query(&[
                ("q", name),
                ("country", GEONAMES_COUNTRY),
                ("featureClass", GEONAMES_FEATURE_CLASS),
                ("maxRows", "1"),
                ("username", username),
            ])
            .send()
            .await
            .map_err(Error::Lookup)?
            .error_for_status()
            .map_err(Error::Lookup)?;
        let body: SearchResponse = response.json().await.map_err(Error::Lookup)?;
        Ok(body.geonames.first().map(|hit| {
            NamedNode::new_unchecked(format!("https://sws.geonames.org/{}/", hit.geoname_id))
        }))
    }
}

/// Memoizing front over an [`AuthorityLookup`].
pub struct RegionResolver {
    lookup: Box<dyn AuthorityLookup>,
    cache: DashMap<String, NamedNode>,
    hits: AtomicU64,
    lookups: AtomicU64,
}

impl RegionResolver {
    pub fn new(lookup: Box<dyn AuthorityLookup>) -> Self {
        Self {
            lookup,
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
        }
    }

    /// Resolves a raw region cell to its authority IRI.
    ///
    /// Zero matches is an error: a region the mapping cannot place would
    /// silently produce a partial graph otherwise.
    pub async fn resolve(&self, raw: &str) -> Result<NamedNode, Error> {
        let key = normalize(raw);
        if let Some(hit) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit.clone());
        }
        // No entry is held across the lookup: a concurrent caller may
        // duplicate the request, but the resolved value is identical and
        // overwriting it is harmless.
        self.lookups.fetch_add(1, Ordering::Relaxed);
        debug!(raw, key = %key, "region cache miss");
        let resolved = self
            .lookup
            .search(&key)
            .await?
            .ok_or_else(|| Error::RegionNotFound {
                name: raw.to_string(),
            })?;
        info!(raw, iri = resolved.as_str(), "resolved region");
        self.cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Distinct resolved region IRIs, for the excerpt download.
    pub fn resolved(&self) -> Vec<NamedNode> {
        self.cache.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn cache_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn lookups_performed(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

/// Cache key: drop the " region" suffix wording, then keep letters only.
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace(" region", "")
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeLookup {
        calls: AtomicU64,
    }

    impl FakeLookup {
        fn new() -> Self {
            Self {
                calls: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthorityLookup for FakeLookup {
        async fn search(&self, name: &str) -> Result<Option<NamedNode>, Error> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            match name {
                "kyiv" => Ok(Some(NamedNode::new_unchecked(
                    "https://sws.geonames.org/703447/",
                ))),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn normalize_collapses_spellings() {
        assert_eq!(normalize("Kyiv Region"), "kyiv");
        assert_eq!(normalize("kyiv"), "kyiv");
        assert_eq!(normalize(" Kyiv  "), "kyiv");
        assert_eq!(normalize("Kyiv region"), "kyiv");
    }

    #[tokio::test]
    async fn resolve_memoizes_per_normalized_key() {
        let resolver = RegionResolver::new(Box::new(FakeLookup::new()));
        let a = resolver.resolve("Kyiv Region").await.unwrap();
        let b = resolver.resolve("kyiv").await.unwrap();
        let c = resolver.resolve("Kyiv region").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(resolver.lookups_performed(), 1);
        assert_eq!(resolver.cache_hits(), 2);
        assert_eq!(resolver.resolved().len(), 1);
    }

    #[tokio::test]
    async fn resolve_fails_on_zero_matches() {
        let resolver = RegionResolver::new(Box::new(FakeLookup::new()));
        let err = resolver.resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, Error::RegionNotFound { name } if name == "Atlantis"));
    }

    #[tokio::test]
    async fn missing_credential_is_reported_before_any_request() {
        let client = GeoNamesClient::new("http://127.0.0.1:1", None);
        let err = client.search("kyiv").await.unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
    }
}
