//! Paginated retrieval of the linkset CONSTRUCT query.
//!
//! The endpoint computes the actual linking (sites and earlier damage
//! events whose geometries fall within 100 meters); this module's only
//! job is to page through its results without falling over. The service
//! times out on anything but small pages, so the page size starts small,
//! drops to 1 the moment a timeout is recognized and creeps back up by
//! one on every healthy page.

use crate::config::{INITIAL_PAGE_SIZE, REQUEST_TIMEOUT_SECS};
use crate::error::Error;
use async_trait::async_trait;
use indicatif::ProgressBar;
use oxrdf::{GraphName, NamedNode, Quad};
use oxrdfio::{RdfFormat, RdfParser};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// The query that produced the remote result set, kept with the runner so
/// the remote saved query can be recreated from the repository.
pub const LINKSET_QUERY: &str = r#"
prefix geof: <http://www.opengis.net/def/function/geosparql/>
prefix geo: <http://www.opengis.net/ont/geosparql#>
prefix sdo: <https://schema.org/>
prefix xsd: <http://www.w3.org/2001/XMLSchema#>
construct {
  ?damageEvent <https://linked4resilience.eu/vocab/isCloseInLocationTo> ?cultureSiteDamage .
} where {
  # wkt literal of a cultural-site damage event (2024 sheets)
  ?cultureSiteDamage geo:hasGeometry ?geo .
  ?geo geo:asWKT ?wkt1 .

  # damage events from the 2023 dataset carry bare lat/lon pairs
  ?damageEvent a <http://semanticweb.cs.vu.nl/2009/11/sem/Event>.
  ?damageEvent sdo:location ?location .
  ?location sdo:geo ?geo2 .
  ?geo2 sdo:latitude ?latitude .
  ?geo2 sdo:longitude ?longitude .
  bind(
    strdt( concat('Point (',str(xsd:decimal(?longitude)),' ',str( xsd:decimal(?latitude)),')') , geo:wktLiteral)
    as ?wkt2
  )

  bind (geof:distance(?wkt1, ?wkt2, <http://www.opengis.net/def/uom/OGC/1.0/meter>) as ?dist)

  # two events this close are assumed to be the same incident
  filter(?dist < 100)
}"#;

const TIMEOUT_MESSAGE: &str = "Query has timed out.";

/// One page request's outcome at the transport level.
pub enum PageBody {
    Payload(String),
    /// The client-side deadline fired before the service answered.
    TimedOut,
}

/// Transport seam for the runner; tests script it, production is HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, page_size: u32, page: u32) -> Result<PageBody, Error>;
}

/// GET `{endpoint}?pageSize={n}&page={m}` with an optional bearer token.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpPageFetcher {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, page_size: u32, page: u32) -> Result<PageBody, Error> {
        let mut request = self.client.get(&self.endpoint).query(&[
            ("pageSize", page_size.to_string()),
            ("page", page.to_string()),
        ]);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        match request.send().await {
            Ok(response) => {
                let text = response.text().await.map_err(Error::Fetch)?;
                Ok(PageBody::Payload(text))
            }
            Err(e) if e.is_timeout() => Ok(PageBody::TimedOut),
            Err(e) => Err(Error::Fetch(e)),
        }
    }
}

/// Runner knobs.
pub struct RunnerConfig {
    pub initial_page_size: u32,
    /// Consecutive timeouts tolerated per page; `None` keeps retrying
    /// until the operator interrupts.
    pub max_retries: Option<u32>,
    /// Every retrieved statement is retagged into this graph.
    pub target_graph: NamedNode,
}

impl RunnerConfig {
    pub fn new(target_graph: NamedNode) -> Self {
        Self {
            initial_page_size: INITIAL_PAGE_SIZE,
            max_retries: None,
            target_graph,
        }
    }
}

/// What a completed run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerReport {
    /// Successful pages, the terminal empty one included.
    pub pages: u32,
    pub quads: usize,
    pub timeouts: u32,
}

/// Sequential by construction: each request's page size depends on the
/// previous outcome, so there is nothing to fan out.
pub struct PaginatedQueryRunner {
    fetcher: Box<dyn PageFetcher>,
    config: RunnerConfig,
}

impl PaginatedQueryRunner {
    pub fn new(fetcher: Box<dyn PageFetcher>, config: RunnerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Pages until the endpoint returns an empty page.
    ///
    /// Always terminates on either that clean empty page or an error; a
    /// timeout alone never surfaces unless a retry ceiling is set.
    pub async fn run(&self) -> Result<(Vec<Quad>, RunnerReport), Error> {
        let pb = ProgressBar::new_spinner();
        let mut page_size = self.config.initial_page_size.max(1);
        let mut page: u32 = 1;
        let mut retries: u32 = 0;
        let mut timeouts: u32 = 0;
        let mut pages: u32 = 0;
        let mut quads: Vec<Quad> = Vec::new();

        loop {
            pb.tick();
            let body = match self.fetcher.fetch(page_size, page).await? {
                PageBody::TimedOut => None,
                PageBody::Payload(text) if is_timeout_payload(&text) => None,
                PageBody::Payload(text) => Some(text),
            };

            let Some(text) = body else {
                retries += 1;
                timeouts += 1;
                if let Some(limit) = self.config.max_retries {
                    if retries > limit {
                        pb.finish_and_clear();
                        return Err(Error::RetriesExhausted {
                            page,
                            attempts: retries,
                        });
                    }
                }
                warn!(page, retries, "query timed out, shrinking page size to 1");
                page_size = 1;
                continue; // same page, smaller bite
            };

            retries = 0;
            page_size += 1;
            let parsed = parse_statements(&text)?;
            pages += 1;
            if parsed.is_empty() {
                // The normal end-of-results signal, not an error.
                break;
            }
            debug!(page, count = parsed.len(), "page parsed");
            quads.extend(parsed.into_iter().map(|mut quad| {
                quad.graph_name = GraphName::from(self.config.target_graph.clone());
                quad
            }));
            page += 1;
        }

        pb.finish_and_clear();
        let report = RunnerReport {
            pages,
            quads: quads.len(),
            timeouts,
        };
        Ok((quads, report))
    }
}

/// Structured check first, then the legacy substring the service used to
/// be sniffed by, for payloads that wrap the error in other output.
fn is_timeout_payload(body: &str) -> bool {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if payload.message == TIMEOUT_MESSAGE {
            return true;
        }
    }
    body.contains(r#"{"message":"Query has timed out."}"#)
}

fn parse_statements(text: &str) -> Result<Vec<Quad>, Error> {
    RdfParser::from_format(RdfFormat::TriG)
        .for_reader(text.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_payload_detection() {
        assert!(is_timeout_payload(r#"{"message":"Query has timed out."}"#));
        assert!(is_timeout_payload(
            r#"retrying... {"message":"Query has timed out."} (wrapped)"#
        ));
        assert!(!is_timeout_payload(r#"{"message":"No results."}"#));
        assert!(!is_timeout_payload(
            "<http://a.example/s> <http://a.example/p> <http://a.example/o> ."
        ));
        assert!(!is_timeout_payload(""));
    }

    #[test]
    fn parse_statements_reads_ntriples() {
        let quads =
            parse_statements("<http://a.example/s> <http://a.example/p> <http://a.example/o> .")
                .unwrap();
        assert_eq!(quads.len(), 1);
        assert!(parse_statements("").unwrap().is_empty());
        assert!(parse_statements("not rdf at all").is_err());
    }
}
