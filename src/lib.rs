//! reqsat - requirement traceability through source comments
//!
//! reqsat scans source files for `REQUIRE: <id>` and `SATISFIED: <id>`
//! comment annotations and reports every requirement without a matching
//! satisfaction (and the reverse), plus duplicated annotations. Annotations
//! with a qualifier such as `REQUIRE(extern): <id>` are matched across all
//! scanned files instead of within one file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Comment extraction, annotation parsing and reconciliation
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
pub mod utils;
