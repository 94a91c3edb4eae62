//! QuantaWeather terminal client
//!
//! The library exposes the app's modules for testing; `main.rs` wires them to
//! the terminal and the prediction backends.

pub mod action;
pub mod api;
pub mod backend;
pub mod components;
pub mod config;
pub mod content;
pub mod effect;
pub mod reducer;
pub mod state;
