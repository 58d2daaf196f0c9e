//! Parley - talk to your database through a local LLM.
//!
//! This library exposes the core modules for use in integration tests.

pub mod agent;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod sql;
