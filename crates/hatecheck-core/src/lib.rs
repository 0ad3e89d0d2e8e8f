//! Hatecheck Core Library
//!
//! Text preprocessing for noisy code-mixed (Hinglish/English) text, plus
//! the user store, credentials and detection service built around it.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod text;
