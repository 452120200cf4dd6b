pub mod cache_maintenance;
pub mod fingerprint;
pub mod response_cache;

pub use cache_maintenance::CacheMaintenanceService;
pub use fingerprint::{canonical_json, canonicalize_parameters, fingerprint, validate_endpoint_name};
pub use response_cache::ResponseCache;
