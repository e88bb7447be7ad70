//! ATM Milano stop arrival board service.
//!
//! Polls the GiroMilano stop-arrivals endpoint for a single stop,
//! normalizes the free-text wait messages into a closed status set, and
//! serves the resulting board over HTTP.

pub mod board;
pub mod giromilano;
pub mod poll;
pub mod web;
