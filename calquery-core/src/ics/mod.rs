//! ICS file parsing.
//!
//! Reads the subset of RFC 5545 needed to report events; nothing is written back.

mod parse;

pub use parse::parse_events;
