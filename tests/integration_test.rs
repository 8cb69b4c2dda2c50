//! Integration tests for the sheet-to-quads pipeline.
//!
//! These tests run the complete ingest flow: a CSV fixture (including the
//! empty-named index pseudo-column real exports carry) is read through
//! schema validation, mapped by the UNESCO sheet configuration and checked
//! quad by quad. Determinism matters as much as correctness here: a re-run
//! over an unchanged sheet must produce a byte-identical N-Quads file.

use ariadne::builder::GraphBuilder;
use ariadne::error::Error;
use ariadne::schema::CoveragePolicy;
use ariadne::sheet;
use ariadne::sources::{self, IngestOptions};
use ariadne::stats::IngestStats;
use ariadne::store;
use ariadne::vocab::{geo, l4r, owl, sdo};
use oxrdf::vocab::xsd;
use oxrdf::{NamedNodeRef, Quad, Term};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// A UNESCO-sheet export with the leading index pseudo-column.
fn sample_csv() -> &'static str {
    "\
,Title of the damage site in English,Include or not (Yes/No),Region,Geo location,DBpedia,Year of construction,Date of damage (first reported)\n\
0,Transfiguration Cathedral,Yes,Odesa Oblast,\"46.4855,30.7411\",dbr:Transfiguration_Cathedral_Odesa,1794,2023-07-23\n\
1,Drama Theatre,No,Donetsk Oblast,\"47.0951,37.5413\",,,2022-03\n\
2,Skovoroda Museum,Yes,Kharkiv Oblast!!,\"49.8430,36.3473\",no reference,1972,unknown date\n"
}

fn write_csv(content: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(content.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

async fn ingest(content: &str) -> (Vec<Quad>, IngestStats) {
    let file = write_csv(content);
    let config = sources::unesco(&IngestOptions::default());
    let rows = sheet::read_rows(file.path(), &config.registry, CoveragePolicy::Subset).unwrap();
    let stats = IngestStats::new();
    let quads = GraphBuilder::new(&config, None, &stats)
        .build(&rows)
        .await
        .unwrap();
    (quads, stats)
}

fn quads_of<'a>(
    quads: &'a [Quad],
    subject: &str,
    predicate: NamedNodeRef<'_>,
) -> Vec<&'a Quad> {
    quads
        .iter()
        .filter(|q| q.subject.to_string() == format!("<{subject}>") && q.predicate == predicate)
        .collect()
}

#[tokio::test]
async fn maps_every_cell_of_the_sample_sheet() {
    let (quads, stats) = ingest(sample_csv()).await;
    assert_eq!(stats.rows(), 3);
    // 9 + 7 + 8: the second row loses its DBpedia and construction-year
    // cells to guards, the third its DBpedia cell.
    assert_eq!(quads.len(), 24);
    assert_eq!(stats.quads(), 24);
    assert_eq!(stats.skipped(), 3);
}

#[tokio::test]
async fn subjects_are_minted_in_row_order() {
    let (quads, _) = ingest(sample_csv()).await;
    let first = quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00001",
        sdo::NAME,
    );
    assert_eq!(first.len(), 1);
    let third = quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00003",
        sdo::NAME,
    );
    assert_eq!(third.len(), 1);
    match &third[0].object {
        Term::Literal(l) => {
            assert_eq!(l.value(), "Skovoroda Museum");
            assert_eq!(l.language(), Some("en"));
        }
        other => panic!("expected literal, got {other}"),
    }
}

#[tokio::test]
async fn booleans_and_cross_references_map_to_their_vocabulary() {
    let (quads, _) = ingest(sample_csv()).await;
    let include = quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00002",
        l4r::INCLUDE,
    );
    match &include[0].object {
        Term::Literal(l) => {
            assert_eq!(l.value(), "false");
            assert_eq!(l.datatype(), xsd::BOOLEAN);
        }
        other => panic!("expected literal, got {other}"),
    }
    let same_as = quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00001",
        owl::SAME_AS,
    );
    assert_eq!(
        same_as[0].object.to_string(),
        "<http://dbpedia.org/resource/Transfiguration_Cathedral_Odesa>"
    );
    // Rows without a prefixed reference produce no owl:sameAs at all.
    assert!(quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00003",
        owl::SAME_AS,
    )
    .is_empty());
}

#[tokio::test]
async fn region_slugs_are_minted_locally() {
    let (quads, _) = ingest(sample_csv()).await;
    let region = quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00003",
        l4r::REGION,
    );
    assert_eq!(
        region[0].object.to_string(),
        "<https://linked4resilience.eu/data/kharkiv-oblast>"
    );
}

#[tokio::test]
async fn geometry_cells_fan_out_into_wkt() {
    let (quads, _) = ingest(sample_csv()).await;
    let geometry = quads_of(
        &quads,
        "https://linked4resilience.eu/data/cultural-sites/00001",
        geo::HAS_GEOMETRY,
    );
    assert_eq!(geometry.len(), 1);
    let wkt: Vec<&Quad> = quads
        .iter()
        .filter(|q| q.predicate == geo::AS_WKT && q.subject.to_string() == "_:geom00001")
        .collect();
    match &wkt[0].object {
        Term::Literal(l) => {
            // Longitude leads in WKT even though latitude leads in the cell.
            assert_eq!(l.value(), "POINT(30.7411000000 46.4855000000)");
            assert_eq!(l.datatype(), geo::WKT_LITERAL);
        }
        other => panic!("expected literal, got {other}"),
    }
}

#[tokio::test]
async fn dates_degrade_gracefully() {
    let (quads, _) = ingest(sample_csv()).await;
    let datatype_of = |subject: &str| {
        let observed = quads_of(&quads, subject, sdo::OBSERVATION_TIME);
        match &observed[0].object {
            Term::Literal(l) => l.datatype().into_owned(),
            other => panic!("expected literal, got {other}"),
        }
    };
    assert_eq!(
        datatype_of("https://linked4resilience.eu/data/cultural-sites/00001"),
        xsd::DATE
    );
    assert_eq!(
        datatype_of("https://linked4resilience.eu/data/cultural-sites/00002"),
        xsd::G_YEAR_MONTH
    );
    // "unknown date" survives as plain text instead of failing the run.
    assert_eq!(
        datatype_of("https://linked4resilience.eu/data/cultural-sites/00003"),
        xsd::STRING
    );
}

#[tokio::test]
async fn every_quad_lands_in_the_sheet_graph() {
    let (quads, _) = ingest(sample_csv()).await;
    assert!(quads.iter().all(|q| q.graph_name.to_string()
        == "<https://linked4resilience.eu/graphs/cultural-site-damage-events>"));
}

#[tokio::test]
async fn rerun_produces_a_byte_identical_file() {
    let dir = TempDir::new().unwrap();
    let first_path = dir.path().join("first.nq");
    let second_path = dir.path().join("second.nq");

    let (first, _) = ingest(sample_csv()).await;
    store::write_nquads(&first_path, &first).unwrap();
    let (second, _) = ingest(sample_csv()).await;
    store::write_nquads(&second_path, &second).unwrap();

    let a = std::fs::read(&first_path).unwrap();
    let b = std::fs::read(&second_path).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[tokio::test]
async fn unknown_column_aborts_with_zero_output() {
    let csv = "\
Title of the damage site in English,Shoe size\n\
Cathedral,44\n";
    let file = write_csv(csv);
    let config = sources::unesco(&IngestOptions::default());
    let err =
        sheet::read_rows(file.path(), &config.registry, CoveragePolicy::Subset).unwrap_err();
    assert!(matches!(err, Error::UnexpectedColumn { column } if column == "Shoe size"));
}

#[tokio::test]
async fn exact_coverage_reports_what_is_missing() {
    let csv = "Title of the damage site in English\nCathedral\n";
    let file = write_csv(csv);
    let config = sources::unesco(&IngestOptions::default());
    let err = sheet::read_rows(file.path(), &config.registry, CoveragePolicy::Exact).unwrap_err();
    match err {
        Error::MissingColumns { columns } => {
            assert_eq!(columns.len(), 18);
            assert!(columns.contains(&"Geo location".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn invalid_boolean_fails_the_whole_sheet() {
    let csv = "\
Title of the damage site in English,Include or not (Yes/No)\n\
Cathedral,maybe\n";
    let file = write_csv(csv);
    let config = sources::unesco(&IngestOptions::default());
    let rows = sheet::read_rows(file.path(), &config.registry, CoveragePolicy::Subset).unwrap();
    let stats = IngestStats::new();
    let err = GraphBuilder::new(&config, None, &stats)
        .build(&rows)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBoolean { value } if value == "maybe"));
}

#[tokio::test]
async fn science_at_risk_accepts_mixed_case_booleans() {
    let csv = "\
Title of the damage site in English,Include or not (Yes/No)\n\
Observatory,YES\n";
    let file = write_csv(csv);
    let config = sources::science_at_risk(&IngestOptions::default());
    let rows = sheet::read_rows(file.path(), &config.registry, CoveragePolicy::Subset).unwrap();
    let stats = IngestStats::new();
    let quads = GraphBuilder::new(&config, None, &stats)
        .build(&rows)
        .await
        .unwrap();
    let include = quads_of(
        &quads,
        "https://linked4resilience.eu/data/science-at-risk/00001",
        l4r::INCLUDE,
    );
    match &include[0].object {
        Term::Literal(l) => assert_eq!(l.value(), "true"),
        other => panic!("expected literal, got {other}"),
    }
}
