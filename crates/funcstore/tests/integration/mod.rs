//! Integration tests exercising the datastore through its public API.

pub mod apps;
pub mod persistence;
pub mod routes;
pub mod transactions;
