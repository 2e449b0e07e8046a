//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept in stand-alone `.tmp`
//! files, included here as string constants.
//!
//! Layout (widths, truncation, padding) is computed in Rust and handed to the templates
//! as ready-made strings. Templates pick styles and control structure only.
//!
//! Line breaks are explicit: every output line ends with `{{ "\n" }}` and tags trim the
//! template's own newlines, so the file layout never leaks into the output.

pub const TABLE_TEMPLATE: &str = include_str!("templates/table.tmp");
pub const DETAIL_TEMPLATE: &str = include_str!("templates/detail.tmp");
pub const FACETS_TEMPLATE: &str = include_str!("templates/facets.tmp");
pub const SCHEMA_TEMPLATE: &str = include_str!("templates/schema.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
