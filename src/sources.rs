//! The concrete sheet configurations.
//!
//! Column names are reproduced verbatim from the published sheets,
//! misspellings, stray whitespace and all; they are the contract with the
//! annotators' export, not something to tidy.

use crate::config::UKRAINE_BOUNDS;
use crate::mapping::{
    BoundingBox, FieldMappingRegistry, Guard, MultiKind, ObjectKind, RegistryBuilder,
};
use crate::vocab::{graphs, l4r, owl, rdfs, sdo};
use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;

/// Everything the ingest path needs to know about one tabular source.
pub struct SheetConfig {
    pub name: &'static str,
    pub graph: NamedNodeRef<'static>,
    pub id_namespace: &'static str,
    pub registry: FieldMappingRegistry,
}

/// How region cells become identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMode {
    /// Mint a local identifier from a slug of the cell text.
    Slug,
    /// Resolve the cell text against GeoNames (needs a credential).
    Authority,
}

/// Options shared by both sheets.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub regions: RegionMode,
    /// Warn on coordinates outside Ukraine. Off by default because the
    /// sheets are already curated; see `--check-bounds`.
    pub check_bounds: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            regions: RegionMode::Slug,
            check_bounds: false,
        }
    }
}

fn geometry_bounds(options: &IngestOptions) -> Option<BoundingBox> {
    options.check_bounds.then_some(UKRAINE_BOUNDS)
}

fn shared_processors(options: &IngestOptions) -> RegistryBuilder {
    let region_object = match options.regions {
        RegionMode::Slug => ObjectKind::Slug {
            base: l4r::DATA_BASE,
        },
        RegionMode::Authority => ObjectKind::Authority,
    };
    FieldMappingRegistry::builder()
        .direct(
            "Title of the damage site in English",
            sdo::NAME,
            ObjectKind::Lang("en"),
        )
        .direct(
            "Include or not (Yes/No)",
            l4r::INCLUDE,
            ObjectKind::YesNo { lenient: false },
        )
        .direct("Comment by volunteers", rdfs::COMMENT, ObjectKind::Lang("en"))
        .direct(
            "Name of damanged site in Ukrainian on Google Maps",
            sdo::ALTERNATE_NAME,
            ObjectKind::Lang("uk"),
        )
        .direct(
            "Alternative English name on Google Maps",
            sdo::ALTERNATE_NAME,
            ObjectKind::Lang("en"),
        )
        .direct(
            "Also included in the Wikipedia page?",
            l4r::INCLUDED_IN_WIKIPEDIA_PAGE,
            ObjectKind::YesNo { lenient: false },
        )
        .direct("Note on Wikipedia", l4r::NOTE_ON_WIKIPEDIA, ObjectKind::Lang("en"))
        .direct(
            "Type of damanged site",
            l4r::SITE_TYPE,
            ObjectKind::Slug {
                base: l4r::DATA_BASE,
            },
        )
        .direct("Region", l4r::REGION, region_object)
        .direct("Address ", sdo::ADDRESS, ObjectKind::Typed(sdo::ADDRESS))
        .multi(
            "Geo location",
            MultiKind::PointGeometry {
                bounds: geometry_bounds(options),
            },
        )
        .direct(
            "Link to google Maps",
            l4r::GOOGLE_MAPS,
            ObjectKind::Typed(xsd::ANY_URI),
        )
        .direct(
            "Wikipedia - English",
            l4r::WIKIPEDIA_ENGLISH,
            ObjectKind::Typed(xsd::ANY_URI),
        )
        .direct(
            "Wikipedia - Ukrainian",
            l4r::WIKIPEDIA_UKRAINIAN,
            ObjectKind::Typed(xsd::ANY_URI),
        )
        .direct_when(
            "DBpedia",
            owl::SAME_AS,
            ObjectKind::Expand {
                prefix: "dbr:",
                base: "http://dbpedia.org/resource/",
            },
            Guard::ContainsColon,
        )
        .direct(
            "Reference to the first reported news article, reports, etc.",
            rdfs::SEE_ALSO,
            ObjectKind::Typed(xsd::ANY_URI),
        )
        .direct(
            "Year of construction",
            l4r::CONSTRUCTION_YEAR,
            ObjectKind::Typed(xsd::INTEGER),
        )
}

/// The UNESCO-verified damage sheet.
pub fn unesco(options: &IngestOptions) -> SheetConfig {
    SheetConfig {
        name: "unesco",
        graph: graphs::CULTURAL_SITES,
        id_namespace: "https://linked4resilience.eu/data/cultural-sites/",
        registry: shared_processors(options)
            .direct(
                "Date of damage (first reported)",
                sdo::OBSERVATION_TIME,
                ObjectKind::DateOrPlain,
            )
            .direct(
                "Other reporting references",
                rdfs::SEE_ALSO,
                ObjectKind::Typed(xsd::ANY_URI),
            )
            .build(),
    }
}

/// The Science-at-Risk damage sheet.
pub fn science_at_risk(options: &IngestOptions) -> SheetConfig {
    SheetConfig {
        name: "science-at-risk",
        graph: graphs::SCIENCE_AT_RISK,
        id_namespace: "https://linked4resilience.eu/data/science-at-risk/",
        registry: shared_processors(options)
            // This sheet's Yes/No columns arrive in mixed case.
            .direct(
                "Include or not (Yes/No)",
                l4r::INCLUDE,
                ObjectKind::YesNo { lenient: true },
            )
            .direct(
                "Also included in the Wikipedia page?",
                l4r::INCLUDED_IN_WIKIPEDIA_PAGE,
                ObjectKind::YesNo { lenient: true },
            )
            .direct(
                "Reference to news articles, reports, etc.",
                rdfs::SEE_ALSO,
                ObjectKind::Typed(xsd::ANY_URI),
            )
            .direct("Reports by Media", rdfs::SEE_ALSO, ObjectKind::Typed(xsd::ANY_URI))
            .direct(
                "Date of damage",
                sdo::OBSERVATION_TIME,
                ObjectKind::DateOrPlain,
            )
            .direct(
                "Fundraising amount:",
                l4r::FUNDRAISING_AMOUNT,
                ObjectKind::Typed(xsd::NON_NEGATIVE_INTEGER),
            )
            .direct("For what:", l4r::PURPOSE, ObjectKind::Plain)
            .direct("Website", sdo::URL, ObjectKind::Typed(xsd::ANY_URI))
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CellProcessor;

    #[test]
    fn unesco_covers_its_columns() {
        let config = unesco(&IngestOptions::default());
        assert_eq!(config.registry.len(), 19);
        assert!(config.registry.get("Geo location").is_some());
        assert!(config.registry.get("Date of damage (first reported)").is_some());
        // The trailing space in the address header is part of the sheet.
        assert!(config.registry.get("Address ").is_some());
        assert!(config.registry.get("Address").is_none());
    }

    #[test]
    fn science_at_risk_uses_lenient_booleans() {
        let config = science_at_risk(&IngestOptions::default());
        assert_eq!(config.registry.len(), 23);
        match config.registry.get("Include or not (Yes/No)") {
            Some(CellProcessor::Direct {
                object: ObjectKind::YesNo { lenient },
                ..
            }) => assert!(*lenient),
            other => panic!("unexpected processor: {other:?}"),
        }
    }

    #[test]
    fn region_mode_switches_the_processor() {
        let slug = unesco(&IngestOptions::default());
        assert!(matches!(
            slug.registry.get("Region"),
            Some(CellProcessor::Direct {
                object: ObjectKind::Slug { .. },
                ..
            })
        ));
        let authority = unesco(&IngestOptions {
            regions: RegionMode::Authority,
            check_bounds: false,
        });
        assert!(matches!(
            authority.registry.get("Region"),
            Some(CellProcessor::Direct {
                object: ObjectKind::Authority,
                ..
            })
        ));
    }

    #[test]
    fn bounds_follow_the_flag() {
        let config = unesco(&IngestOptions {
            regions: RegionMode::Slug,
            check_bounds: true,
        });
        assert!(matches!(
            config.registry.get("Geo location"),
            Some(CellProcessor::Multi(MultiKind::PointGeometry { bounds: Some(_) }))
        ));
    }
}
