//! bstviz: binary search tree engine with step traces for animated replay.
//!
//! Layers:
//! - `domain`: tree structure, traversals, searches, statistics, snapshot entities
//! - `application`: snapshot store and working-tree services
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
