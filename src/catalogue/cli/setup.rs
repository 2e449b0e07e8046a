use catalogue::error::{CatalogError, Result};
use catalogue::filter::{FilterState, FilterValue};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalogue", bin_name = "catalogue", version)]
#[command(
    about = "Filter, search and sort a CSV dataset described by a metadata table",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Metadata CSV describing every data column
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub metadata: Option<PathBuf>,

    /// Data CSV
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the records that pass the filters
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Column to sort by
        #[arg(long, value_name = "COLUMN")]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every field of one record
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Record id, as printed by `list`
        id: usize,

        /// Highlight this query in searchable fields
        #[arg(short, long)]
        search: Option<String>,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the choices a column's filter offers
    #[command(display_order = 3)]
    Facets {
        /// Column name
        column: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print the facets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the compiled columns
    #[command(display_order = 4)]
    Schema {
        /// Print the columns as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set configuration
    #[command(display_order = 5)]
    Config {
        /// Configuration key (e.g., data-path)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Filter flags shared by `list` and `facets`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Free-text search over searchable columns
    #[arg(short, long)]
    pub search: Option<String>,

    /// Keep numbers within a range; either bound may be left empty
    #[arg(long = "range", value_name = "COLUMN=MIN:MAX")]
    pub ranges: Vec<String>,

    /// Keep one value of an option column
    #[arg(long = "option", value_name = "COLUMN=VALUE")]
    pub options: Vec<String>,

    /// Keep records that have no value in a column
    #[arg(long = "none", value_name = "COLUMN")]
    pub none: Vec<String>,

    /// Keep records holding any of the listed keywords
    #[arg(long = "any", value_name = "COLUMN=A,B")]
    pub any: Vec<String>,

    /// Keep records whose checkbox column is true
    #[arg(long = "check", value_name = "COLUMN")]
    pub checks: Vec<String>,

    /// JSON filter state to start from; flags are applied on top
    #[arg(long, value_name = "FILE")]
    pub filters: Option<PathBuf>,
}

fn split_assignment<'a>(flag: &str, raw: &'a str, expected: &str) -> Result<(&'a str, &'a str)> {
    raw.split_once('=')
        .filter(|(column, _)| !column.trim().is_empty())
        .map(|(column, value)| (column.trim(), value))
        .ok_or_else(|| {
            CatalogError::Api(format!(
                "Invalid --{} value '{}': expected {}",
                flag, raw, expected
            ))
        })
}

fn parse_bound(raw: &str, default: f64) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        Some(default)
    } else {
        raw.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

pub fn parse_range(raw: &str) -> Result<(String, FilterValue)> {
    let (column, bounds) = split_assignment("range", raw, "COLUMN=MIN:MAX")?;
    let invalid = || CatalogError::Api(format!("Invalid range for {}: '{}'", column, bounds));
    let (min, max) = bounds.split_once(':').ok_or_else(invalid)?;
    let min = parse_bound(min, f64::NEG_INFINITY).ok_or_else(invalid)?;
    let max = parse_bound(max, f64::INFINITY).ok_or_else(invalid)?;
    Ok((column.to_string(), FilterValue::Range(min, max)))
}

/// An empty value (`Venue=`) switches the column's filter off.
pub fn parse_option(raw: &str) -> Result<(String, Option<FilterValue>)> {
    let (column, value) = split_assignment("option", raw, "COLUMN=VALUE")?;
    let value = value.trim();
    let filter = (!value.is_empty()).then(|| FilterValue::Option(value.to_string()));
    Ok((column.to_string(), filter))
}

pub fn parse_any(raw: &str) -> Result<(String, FilterValue)> {
    let (column, values) = split_assignment("any", raw, "COLUMN=A,B")?;
    let keywords = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    Ok((column.to_string(), FilterValue::AnyOf(keywords)))
}

impl FilterArgs {
    /// Builds the filter state: the `--filters` file first, then every flag on top.
    pub fn to_state(&self) -> Result<FilterState> {
        let mut state = match &self.filters {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => FilterState::new(),
        };

        let mut flags = FilterState::new();
        flags.search = self.search.clone();
        for raw in &self.ranges {
            let (column, value) = parse_range(raw)?;
            flags.set(column, value);
        }
        for raw in &self.options {
            let (column, value) = parse_option(raw)?;
            flags.columns.insert(column, value);
        }
        for raw in &self.any {
            let (column, value) = parse_any(raw)?;
            flags.set(column, value);
        }
        for column in &self.checks {
            flags.set(column.trim(), FilterValue::Checked(true));
        }
        for column in &self.none {
            flags.set(column.trim(), FilterValue::NoValue);
        }

        state.merge(flags);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from([
            "catalogue",
            "-m",
            "meta.csv",
            "list",
            "-s",
            "maps",
            "--range",
            "Year=2005:2015",
            "--any",
            "Topics=Blind, Low Vision",
            "--check",
            "Empirical",
            "--none",
            "Venue",
            "--sort",
            "Title",
            "--desc",
        ])
        .unwrap();
        assert_eq!(cli.metadata, Some(PathBuf::from("meta.csv")));
        let Commands::List {
            filters,
            sort,
            desc,
            json,
        } = cli.command
        else {
            panic!("expected list");
        };
        assert_eq!(sort.as_deref(), Some("Title"));
        assert!(desc);
        assert!(!json);

        let state = filters.to_state().unwrap();
        assert_eq!(state.search.as_deref(), Some("maps"));
        assert_eq!(state.get("Year"), Some(&FilterValue::Range(2005.0, 2015.0)));
        assert_eq!(
            state.get("Topics"),
            Some(&FilterValue::AnyOf(vec!["Blind".into(), "Low Vision".into()]))
        );
        assert_eq!(state.get("Empirical"), Some(&FilterValue::Checked(true)));
        assert_eq!(state.get("Venue"), Some(&FilterValue::NoValue));
    }

    #[test]
    fn desc_requires_sort() {
        assert!(Cli::try_parse_from(["catalogue", "list", "--desc"]).is_err());
    }

    #[test]
    fn open_range_bounds() {
        let (_, value) = parse_range("Year=2010:").unwrap();
        assert_eq!(value, FilterValue::Range(2010.0, f64::INFINITY));
        let (_, value) = parse_range("Year=:-5").unwrap();
        assert_eq!(value, FilterValue::Range(f64::NEG_INFINITY, -5.0));
    }

    #[test]
    fn malformed_filter_flags_are_errors() {
        assert!(parse_range("Year").is_err());
        assert!(parse_range("Year=2010").is_err());
        assert!(parse_range("Year=a:b").is_err());
        assert!(parse_range("Year=nan:").is_err());
        assert!(parse_range("Year=:inf").is_err());
        assert!(parse_option("=CHI").is_err());
        assert!(parse_any("Topics").is_err());
    }

    #[test]
    fn empty_option_switches_the_filter_off() {
        assert_eq!(parse_option("Venue=").unwrap(), ("Venue".to_string(), None));
        assert_eq!(
            parse_option("Venue= CHI ").unwrap(),
            ("Venue".to_string(), Some(FilterValue::Option("CHI".into())))
        );

        let args = FilterArgs {
            options: vec!["Venue=".into()],
            ..Default::default()
        };
        let state = args.to_state().unwrap();
        assert_eq!(state.get("Venue"), None);
        assert_eq!(state.active().count(), 0);
    }

    #[test]
    fn flags_override_filter_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(
            &path,
            r#"{"search": "old", "columns": {"Venue": {"option": "VIS"}, "Year": {"range": [0, 1]}}}"#,
        )
        .unwrap();
        let args = FilterArgs {
            options: vec!["Venue=CHI".into()],
            filters: Some(path),
            ..Default::default()
        };
        let state = args.to_state().unwrap();
        assert_eq!(state.search.as_deref(), Some("old"));
        assert_eq!(state.get("Venue"), Some(&FilterValue::Option("CHI".into())));
        assert_eq!(state.get("Year"), Some(&FilterValue::Range(0.0, 1.0)));
    }
}
