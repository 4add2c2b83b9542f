//! core
//!
//! Core domain types, parsers, and configuration for versiongate.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Version, VersionSite
//! - [`extract`] - Line-oriented version extraction from metadata and source
//! - [`discover`] - Locating the metadata record and entry-point source
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Extraction is pure and deterministic

pub mod config;
pub mod discover;
pub mod extract;
pub mod types;
