//! mindcheck-core — Quiz flow engine, scoring, and data model.
//!
//! This crate defines the data model, the storage and console traits, and the
//! registration, quiz and session logic that the rest of mindcheck builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod messages;
pub mod model;
pub mod questions;
pub mod registration;
pub mod scoring;
pub mod session;
pub mod testing;
pub mod traits;
