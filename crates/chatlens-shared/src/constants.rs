/// Application name
pub const APP_NAME: &str = "Communication Insight Extractor";

/// Default base URL of the insights backend REST API
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

/// Path prefix every backend route lives under
pub const API_PREFIX: &str = "/api/v1";

/// REST paths, relative to the API base
pub const PATH_MESSAGES: &str = "/messages/";
pub const PATH_INSIGHTS: &str = "/insights/";
pub const PATH_ANALYZE: &str = "/insights/analyze";

/// Default location of the sample message batch used by "Load Sample Data"
pub const DEFAULT_SAMPLE_PATH: &str = "fixtures/sample_messages.json";

/// Wire tags for `analysis_type`
pub const TAG_TOPICS: &str = "topics";
pub const TAG_SENTIMENT: &str = "sentiment";
pub const TAG_RESPONSE_TIME: &str = "response_time";

/// Reserved aggregate keys inside `result_data`; never author names
pub const KEY_TOPICS: &str = "topics";
pub const KEY_SENTIMENTS: &str = "sentiments";

/// Field whose presence marks a `result_data` value as a response-time record
pub const KEY_AVG_RESPONSE: &str = "avg_response_minutes";
