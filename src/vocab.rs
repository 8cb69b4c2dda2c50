//! IRI constants for the vocabularies the pipeline emits.
//!
//! XSD and core RDF terms come from [`oxrdf::vocab`]; everything below is
//! what that module does not cover.

/// schema.org terms.
pub mod sdo {
    use oxrdf::NamedNodeRef;

    pub const NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://schema.org/name");
    pub const ALTERNATE_NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/alternateName");
    pub const ADDRESS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/address");
    pub const OBSERVATION_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/observationTime");
    pub const URL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://schema.org/url");
}

/// RDFS terms.
pub mod rdfs {
    use oxrdf::NamedNodeRef;

    pub const COMMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment");
    pub const SEE_ALSO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#seeAlso");
}

/// OWL terms.
pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const SAME_AS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#sameAs");
}

/// GeoSPARQL terms.
pub mod geo {
    use oxrdf::NamedNodeRef;

    pub const HAS_GEOMETRY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#hasGeometry");
    pub const GEOMETRY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#Geometry");
    pub const AS_WKT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#asWKT");
    pub const WKT_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral");
}

/// Project vocabulary.
pub mod l4r {
    use oxrdf::NamedNodeRef;

    /// Base IRI under which entity and category identifiers are minted.
    pub const DATA_BASE: &str = "https://linked4resilience.eu/data/";

    pub const INCLUDE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/include");
    pub const INCLUDED_IN_WIKIPEDIA_PAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/includedInWikipediaPage");
    pub const NOTE_ON_WIKIPEDIA: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/noteOnWikipedia");
    pub const SITE_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/site-type");
    pub const REGION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/region");
    pub const GOOGLE_MAPS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/googleMaps");
    pub const WIKIPEDIA_ENGLISH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/wikipediaEnglish");
    pub const WIKIPEDIA_UKRAINIAN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/wikipediaUkrainian");
    pub const CONSTRUCTION_YEAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/constructionYear");
    pub const FUNDRAISING_AMOUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/fundraisingAmount");
    pub const PURPOSE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/purpose");
    pub const IS_CLOSE_IN_LOCATION_TO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/vocab/isCloseInLocationTo");
}

/// Named graphs the pipeline writes into.
pub mod graphs {
    use oxrdf::NamedNodeRef;

    pub const CULTURAL_SITES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/graphs/cultural-site-damage-events");
    pub const SCIENCE_AT_RISK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/graphs/science-at-risk");
    pub const LINKSET: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/graphs/cultural-sites-linkset");
    pub const GEONAMES_EXCERPT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked4resilience.eu/graphs/geonames-excerpt");
}
