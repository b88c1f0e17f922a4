//! Subscriptions API - CRUD service for user subscriptions.
//!
//! Stores subscriptions (service, monthly price, user, `MM-YYYY` period) in
//! PostgreSQL and exposes them over a JSON HTTP API, including a price total
//! over a filter.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
