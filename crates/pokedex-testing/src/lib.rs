//! Test utilities for the Pokedex services.
//!
//! Provides bearer-token helpers and an in-memory database carrying the BFF
//! schema. Import from dev-dependencies only.

pub mod auth;
pub mod db;
