//! Resto Map - restaurant selection service for an interactive map page
//!
//! This library decides which restaurants the map shows: viewport
//! containment, star-range filtering on the aggregate rating, and address
//! deduplication over an in-memory, append-only store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{average_rating, dedupe, in_bounds, in_range, select, slugify, MapEvent, MapSession, RestaurantStore};
pub use crate::models::{GeoBound, NewRating, NewRestaurant, Position, Rating, Restaurant, StarFilterRange};
