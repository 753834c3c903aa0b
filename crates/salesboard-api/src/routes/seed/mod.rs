//! Seed route - wholesale replacement of the collection

pub mod api;

pub use api::api_initialize;
