//! tclean - translation key reconciliation for `.properties` bundles
//!
//! tclean scans a source tree for references to namespaced localization keys,
//! reconciles them against `lang*.properties` files, moves or drops unused
//! entries, optionally sorts the files, and warns about keys that are
//! referenced in code but missing from a translation file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, console output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Key discovery, translation store, reconciliation and checks
//! - `events`: Typed log events and the injected `Logger` sink

pub mod cli;
pub mod config;
pub mod core;
pub mod events;
