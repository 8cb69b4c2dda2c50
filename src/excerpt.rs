//! GeoNames excerpt download.
//!
//! The published dataset should describe the regions it references, so for
//! every resolved region (plus the country entity itself) the per-entity
//! RDF/XML document is fetched and retagged into the excerpt graph. The
//! document host drops connections now and then; a short pause and another
//! attempt is normally enough.

use crate::config::{
    COUNTRY_GEONAMES_ID, EXCERPT_MAX_ATTEMPTS, EXCERPT_RETRY_DELAY_SECS, REQUEST_TIMEOUT_SECS,
};
use crate::error::Error;
use crate::vocab::graphs;
use oxrdf::{GraphName, NamedNode, Quad};
use oxrdfio::{RdfFormat, RdfParser};
use std::time::Duration;
use tracing::{info, warn};

pub struct ExcerptFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ExcerptFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the excerpt for every region IRI plus the country entity.
    pub async fn fetch_all(&self, regions: &[NamedNode]) -> Result<Vec<Quad>, Error> {
        let mut quads = Vec::new();
        for region in regions {
            let Some(id) = entity_id(region.as_str()) else {
                warn!(iri = region.as_str(), "region IRI has no numeric id, skipping");
                continue;
            };
            quads.extend(self.fetch_entity(id).await?);
        }
        quads.extend(self.fetch_entity(COUNTRY_GEONAMES_ID).await?);
        info!(quads = quads.len(), "excerpt assembled");
        Ok(quads)
    }

    async fn fetch_entity(&self, id: &str) -> Result<Vec<Quad>, Error> {
        let url = format!("{}/{id}/about.rdf", self.base_url);
        let body = self.download_with_retry(&url).await?;
        let quads = RdfParser::from_format(RdfFormat::RdfXml)
            .for_reader(body.as_bytes())
            .collect::<Result<Vec<Quad>, _>>()?
            .into_iter()
            .map(retag_into_excerpt_graph)
            .collect();
        Ok(quads)
    }

    async fn download_with_retry(&self, url: &str) -> Result<String, Error> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = match self.client.get(url).send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => response.text().await,
                    Err(e) => Err(e),
                },
                Err(e) => Err(e),
            };
            match result {
                Ok(body) => return Ok(body),
                Err(e) if attempt < EXCERPT_MAX_ATTEMPTS => {
                    warn!(url, attempt, "excerpt download failed, retrying: {e}");
                    tokio::time::sleep(Duration::from_secs(EXCERPT_RETRY_DELAY_SECS)).await;
                }
                Err(e) => return Err(Error::Fetch(e)),
            }
        }
    }
}

/// The numeric entity id is the last non-empty path segment.
fn entity_id(iri: &str) -> Option<&str> {
    iri.split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .filter(|segment| segment.bytes().all(|b| b.is_ascii_digit()))
}

fn retag_into_excerpt_graph(mut quad: Quad) -> Quad {
    quad.graph_name = GraphName::from(graphs::GEONAMES_EXCERPT.into_owned());
    quad
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    #[test]
    fn entity_id_takes_last_segment() {
        assert_eq!(entity_id("https://sws.geonames.org/690548/"), Some("690548"));
        assert_eq!(entity_id("https://sws.geonames.org/703447"), Some("703447"));
        assert_eq!(entity_id("https://example.com/not-numeric/"), None);
    }

    #[test]
    fn retag_moves_statement_into_excerpt_graph() {
        let quad = Quad::new(
            NamedNode::new_unchecked("https://sws.geonames.org/690548/"),
            NamedNode::new_unchecked("http://www.geonames.org/ontology#name"),
            NamedNode::new_unchecked("https://example.com/o"),
            GraphName::DefaultGraph,
        );
        let retagged = retag_into_excerpt_graph(quad);
        assert_eq!(
            retagged.graph_name.to_string(),
            "<https://linked4resilience.eu/graphs/geonames-excerpt>"
        );
    }
}
