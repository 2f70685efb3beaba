//! Request extractors whose rejections use the API error envelope.
//!
//! Drop-in replacements for the axum extractors of the same names. The only
//! difference is the rejection type: failures become the same JSON error
//! shape handlers return, with a short hint about what was malformed.

pub mod enhanced_json;
pub mod enhanced_path;
pub mod enhanced_query;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;
