//! Direct-elimination brackets.
//!
//! `BracketGenerator` builds the whole match tree up front; the methods in
//! `advancement` move winners through it as results come in.

pub mod advancement;
pub mod generator;
pub mod models;

pub use generator::BracketGenerator;
pub use models::{Bracket, BracketType};
