//! Catalog browsing service for a personal anime guide
//!
//! Holds a fixed media catalog for the session, filters and sorts it by
//! facet, computes a relevance score from the user's watch history, and
//! persists the user's watchlist and ratings through a pluggable key-value
//! store.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;
