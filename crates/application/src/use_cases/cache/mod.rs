pub mod get_cached_response;
pub mod set_cached_response;

pub use get_cached_response::GetCachedResponseUseCase;
pub use set_cached_response::SetCachedResponseUseCase;
