//! Bike-share station dashboard server.
//!
//! Shows live YouBike stations on a clustered map, finds stations near the
//! user, searches stations by name or address and charts historical usage.

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod feed;
pub mod geo;
pub mod lifecycle;
pub mod location;
pub mod search;
pub mod selection;
pub mod usage;
pub mod web;
