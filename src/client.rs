//! Translation client.
//!
//! `Translator` owns one configuration and one transport. Endpoint
//! normalization and parameter merging are free functions so hosts can
//! preview what a call will send.

pub mod builder;
pub mod core;
pub mod endpoint;
pub mod params;

pub use builder::TranslatorBuilder;
pub use self::core::{TranslateRequest, Translator};
pub use endpoint::normalize_endpoint;
pub use params::{default_parameters, merge_parameters};
