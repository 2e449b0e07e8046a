//! # Catalogue Architecture
//!
//! Catalogue is a **metadata-driven view engine** for small tabular datasets. A dataset
//! arrives as two tables: the data itself (rows of loosely typed strings) and a metadata
//! table describing every column (its type, its filter control, whether it is searchable
//! and where it is displayed). From those two inputs catalogue builds a typed schema,
//! coerces every row, and then filters, searches and sorts the coerced rows.
//!
//! Like any good library-with-a-CLI, the CLI is just one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the loaded Catalog       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list / show / facets / schema / config                   │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  schema → coerce → search → filter → sort (view)            │
//! │  highlight, facets, format                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Pipeline
//!
//! 1. [`schema::compile_schema`] turns the metadata table into a [`schema::Schema`].
//!    Illegal type/control combinations are rejected here, not at filter time.
//! 2. [`coerce::coerce_rows`] converts every raw record into a [`model::Row`]. Malformed
//!    values degrade (to null or false), they never fail the load.
//! 3. [`view::compute_view`] applies the free-text search, then the per-column filters,
//!    then a stable sort. It is a pure function of its inputs.
//!
//! The schema and the coerced rows form a [`Catalog`](api::Catalog) which is immutable
//! once built, so any number of readers can compute views over it concurrently.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Apart from [`loader`] (CSV parsing) and [`config`] (config.json), nothing in the
//! library touches the filesystem, prints, or exits.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and the loaded [`Catalog`](api::Catalog)
//! - [`commands`]: Business logic for each command
//! - [`model`]: Column kinds, coerced values and rows
//! - [`table`]: Raw (string) tables as produced by a loader
//! - [`schema`]: Metadata compilation
//! - [`coerce`]: Type coercion
//! - [`filter`]: Per-column filter predicates
//! - [`search`]: Free-text search
//! - [`sort`]: Type-aware row ordering
//! - [`highlight`]: Match segments for presentation
//! - [`facets`]: Filter choices derived from the data
//! - [`format`]: Cell and detail formatting
//! - [`view`]: The full search/filter/sort pipeline
//! - [`loader`]: CSV input
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod coerce;
pub mod commands;
pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod format;
pub mod highlight;
pub mod loader;
pub mod model;
pub mod schema;
pub mod search;
pub mod sort;
pub mod table;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
