//! Store filesystem contracts: wire models, API service trait, path helpers.

pub mod path;
pub mod service;
pub mod types;
