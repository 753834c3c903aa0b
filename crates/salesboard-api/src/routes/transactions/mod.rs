//! Transaction routes - month listing with search and pagination

pub mod api;

pub use api::api_transactions;
