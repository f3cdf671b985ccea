//! Movie recommendation service: precomputed-similarity lookups over a
//! startup-loaded catalog, with best-effort OMDb poster resolution.

pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
