//! Keylens - i18n key reference locator and namespace resolver
//!
//! Keylens is a CLI tool and library for locating localization key
//! references in source code and resolving them to fully-qualified
//! dictionary keys. Detection is regex-driven: scope-declaring hook calls
//! define which namespaces are active for a span of text, usage patterns
//! extract key literals, and dictionary existence disambiguates between
//! scoped and default-namespace keys.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (scan, keys, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core detection engine (scope, pattern, resolve, rewrite, detect)
//! - `issue`: Issue type definitions for reporting
//! - `locales`: Locale dictionary loading, lookup and write-back
//! - `report`: Cargo-style issue printing
//! - `utils`: Offset/line mapping helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod issue;
pub mod locales;
pub mod report;
pub mod utils;
