#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cleaning, proximity classification, and grouping helpers.
//!
//! The batch pipeline: raw rows in, cleaned and classified records out,
//! plus the grouping/median helpers that rendering collaborators use for
//! label placement and subset selection. Every function here is a pure
//! transformation of its inputs; row-level problems are handled by
//! exclusion, never by error.

pub mod cleaner;
pub mod grouping;
pub mod proximity;
pub mod summary;

pub use cleaner::clean;
pub use proximity::classify;
