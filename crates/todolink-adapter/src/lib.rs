/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public TodoLink backend adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Result,
    SupabaseClient,
    SupabaseError,
    random_object_key,
};

// Re-export all types
pub use types::*;
