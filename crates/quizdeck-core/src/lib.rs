//! quizdeck-core — Card ingestion and quiz assembly.
//!
//! This crate defines the card data model, the CSV ingestion parser, and the
//! quiz assembler that the rest of quizdeck builds on.

pub mod error;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod traits;
