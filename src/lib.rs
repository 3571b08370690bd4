// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_precision_loss: Grade averages divide by small counts
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are limited to static regex compilation
// - items_after_statements: Output structs are clearer near their usage
// - too_many_lines: The builder transition is one cohesive match
// - similar_names: Variable naming is contextually clear
// - option_if_let_else: if-let is often clearer
// - fn_params_excessive_bools: CLI flags are naturally boolean
// - trivially_copy_pass_by_ref: Minor optimization not worth churn
// - match_same_arms: Combined arms can reduce readability
// - single_match_else: match is clearer than if-let for pattern matching
// - unnecessary_wraps: Some functions always return Some for API consistency
// - manual_let_else: if-let with early return is often clearer in context
// - unnecessary_map_or: map_or keeps the minimum supported Rust version
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::option_if_let_else,
    clippy::fn_params_excessive_bools,
    clippy::trivially_copy_pass_by_ref,
    clippy::match_same_arms,
    clippy::single_match_else,
    clippy::unnecessary_wraps,
    clippy::manual_let_else,
    clippy::unnecessary_map_or
)]

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod operations;
pub mod parse;
