/// Default ceiling for an incoming JSON body, sized to admit embedded
/// base64 image payloads
pub const DEFAULT_PAYLOAD_LIMIT: usize = 50 * 1024 * 1024;

/// Configuration for the gallery API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Directory holding the screenshot collection file
    pub data_dir: String,

    /// Upper bound, in bytes, for an incoming JSON body
    pub payload_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
        }
    }
}
