/// The default base URL for the Locu API (v1.0)
pub const DEFAULT_BASE_URL: &str = "http://api.locu.com/v1_0";

/// Path segment under the base URL for venue resources
pub const VENUE_PATH: &str = "venue";

/// Path segment under the venue resource for searches
pub const SEARCH_PATH: &str = "search";

/// Separator used to request several venues in a single lookup
pub const VENUE_ID_SEPARATOR: &str = ";";

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "api_key";

/// Query parameter and value selecting a JSON response
pub const FORMAT_PARAM: &str = "format";
pub const FORMAT_JSON: &str = "json";
