//! Weekly class timetabling as a constraint-satisfaction search.
//!
//! Subjects are expanded into one task per weekly session, placed on a fixed
//! day x slot grid by chronological backtracking, and the resulting schedule
//! can be re-checked by an independent conflict detector.

pub mod config;
pub mod conflicts;
pub mod data;
pub mod legality;
pub mod report;
pub mod seed;
pub mod server;
pub mod solver;
pub mod tasks;
pub mod validation;

pub use conflicts::{audit_schedule, detect_conflicts};
pub use solver::{SolveOptions, SolveOutcome, generate_schedule, solve};
