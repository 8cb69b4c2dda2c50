use crate::mapping::BoundingBox;

/// Width of the zero-padded numeric suffix in minted entity IRIs
pub const ID_PAD_WIDTH: usize = 5;

/// Initial page size for the linkset query; large pages time out server-side
pub const INITIAL_PAGE_SIZE: u32 = 3;

/// Client-side deadline for a single query-endpoint request
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Progress update interval (tick every N rows)
pub const PROGRESS_INTERVAL: u64 = 100;

/// GeoNames search API root
pub const GEONAMES_API_BASE: &str = "https://secure.geonames.org";

/// GeoNames document root for per-entity RDF excerpts
pub const GEONAMES_RDF_BASE: &str = "https://www.geonames.org";

/// Country filter for region lookups
pub const GEONAMES_COUNTRY: &str = "UA";

/// Feature class filter for region lookups (administrative divisions)
pub const GEONAMES_FEATURE_CLASS: &str = "A";

/// GeoNames id of the country entity, always included in the excerpt
pub const COUNTRY_GEONAMES_ID: &str = "690791";

/// Attempts per excerpt download before giving up
pub const EXCERPT_MAX_ATTEMPTS: u32 = 5;

/// Pause between excerpt download attempts
pub const EXCERPT_RETRY_DELAY_SECS: u64 = 1;

/// Bounding box for the optional coordinate sanity check (Ukraine)
pub const UKRAINE_BOUNDS: BoundingBox = BoundingBox {
    min_lon: 22.0856083513,
    max_lon: 44.3614785833,
    min_lat: 40.0807890155,
    max_lat: 52.3350745713,
};
