//! Common utilities for the Folio property engine.
//!
//! This crate provides shared infrastructure used by the other Folio crates:
//! - **Warning System** - deduplicated, colored terminal output for input the
//!   attribute parser accepts but cannot fully honor (unknown units, unknown
//!   attribute names)

pub mod warning;
