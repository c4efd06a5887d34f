/*
[INPUT]:  HTTP client configuration, service URL and access key
[OUTPUT]: HTTP responses and typed table/storage results
[POS]:    HTTP layer - REST and object storage communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod storage;
pub mod tasks;

pub use error::{Result, SupabaseError};
pub use storage::random_object_key;

pub use client::{ClientConfig, SupabaseClient};
