pub mod get_cache_report;

pub use get_cache_report::GetCacheReportUseCase;
