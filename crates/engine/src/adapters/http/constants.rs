// Registry endpoint layout, relative to the configured base URL.
pub const PRODUCTS_SEGMENT: &str = "products";
pub const BARCODE_SEGMENT: &str = "barcode";
pub const TRACK_LOCATION_SEGMENT: &str = "track-location";
