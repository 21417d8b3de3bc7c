//! Locsheet - localization files <-> spreadsheet synchronizer
//!
//! Locsheet is a CLI tool and library for keeping a directory of per-culture
//! JSON localization files in sync with a single xlsx workbook (one row per
//! key, one column per culture), and for finding localization keys that no
//! file in a source tree references.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Culture records, table export/import and the key usage scan
//! - `error`: Error types
//! - `workbook`: Minimal xlsx package reader/writer and cell addressing

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod workbook;
