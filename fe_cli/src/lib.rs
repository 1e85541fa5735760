//! Command-line front end for the fencing pairing engine.
//!
//! The binary keeps a whole event in one JSON file and runs a single
//! pipeline step per invocation. The modules here are shared with its tests.

pub mod config;
pub mod event;
pub mod logging;
pub mod report;
