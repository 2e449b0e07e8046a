//! # Rendering Module
//!
//! Styled terminal output from minijinja templates.
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they require
//! Unicode-aware processing. Templates handle presentation:
//! - Style selection (matches, headers, links)
//! - Line structure and empty states

use super::styles::{names, Theme, CATALOGUE_THEME};
use super::templates::{
    DETAIL_TEMPLATE, FACETS_TEMPLATE, MESSAGES_TEMPLATE, SCHEMA_TEMPLATE, TABLE_TEMPLATE,
    TEXT_LIST_TEMPLATE,
};
use catalogue::api::{CmdMessage, MessageLevel};
use catalogue::commands::{ColumnFacets, ColumnSummary};
use catalogue::facets::{FacetValue, Facets};
use catalogue::format::{RecordDetail, TableView};
use catalogue::highlight::MatchSegment;
use catalogue::model::format_number;
use console::Term;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spaces between table columns.
const COLUMN_GAP: usize = 2;
const ELLIPSIS: char = '…';

#[derive(Serialize)]
struct SegmentData {
    text: String,
    is_match: bool,
}

#[derive(Serialize)]
struct CellData {
    segments: Vec<SegmentData>,
    padding: String,
}

#[derive(Serialize)]
struct HeaderData {
    text: String,
    padding: String,
}

#[derive(Serialize)]
struct RowData {
    id: String,
    cells: Vec<CellData>,
    link: Option<String>,
}

#[derive(Serialize)]
struct TableData {
    empty: bool,
    id_header: String,
    headers: Vec<HeaderData>,
    rows: Vec<RowData>,
    has_links: bool,
    summary: String,
}

#[derive(Serialize)]
struct DetailData {
    id: String,
    title: Vec<SegmentData>,
    fields: Vec<FieldData>,
    link: Option<String>,
}

#[derive(Serialize)]
struct FieldData {
    column: String,
    lines: Vec<Vec<SegmentData>>,
}

#[derive(Serialize)]
struct FacetLineData {
    label: String,
    count: usize,
    is_none: bool,
}

#[derive(Serialize)]
struct FacetsData {
    column: String,
    kind: String,
    entries: Vec<FacetLineData>,
    summary: String,
}

#[derive(Serialize)]
struct SchemaLineData {
    name: String,
    padding: String,
    kind: String,
    role: Option<String>,
    flags: String,
}

#[derive(Serialize)]
struct SchemaData {
    columns: Vec<SchemaLineData>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// Whether stdout supports colors, unless disabled.
pub fn detect_color(no_color: bool) -> bool {
    !no_color && Term::stdout().features().colors_supported()
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        let mut env = Environment::new();
        register_style_filter(&mut env, CATALOGUE_THEME.clone(), use_color);
        Self { env }
    }

    fn render<T: Serialize>(&self, template: &'static str, data: &T) -> Result<String, minijinja::Error> {
        self.env.template_from_str(template)?.render(data)
    }

    /// Renders a row table with at most `cell_width` columns per cell.
    pub fn table(&self, table: &TableView, total: usize, cell_width: usize) -> String {
        let summary = format!("{} of {} records", table.rows.len(), total);
        let data = if table.rows.is_empty() {
            TableData {
                empty: true,
                id_header: String::new(),
                headers: vec![],
                rows: vec![],
                has_links: false,
                summary,
            }
        } else {
            layout_table(table, cell_width, summary)
        };
        self.render(TABLE_TEMPLATE, &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn detail(&self, detail: &RecordDetail) -> String {
        let data = DetailData {
            id: detail.id.to_string(),
            title: segment_data(&detail.title),
            fields: detail
                .fields
                .iter()
                .map(|field| FieldData {
                    column: field.column.clone(),
                    lines: field.lines.iter().map(|line| segment_data(line)).collect(),
                })
                .collect(),
            link: detail.link.clone(),
        };
        self.render(DETAIL_TEMPLATE, &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn facets(&self, facets: &ColumnFacets) -> String {
        let line = |label: &str, count: usize, is_none: bool| FacetLineData {
            label: label.to_string(),
            count,
            is_none,
        };
        let (kind, entries, summary) = match &facets.facets {
            Facets::Options { entries } | Facets::Keywords { entries } => {
                let kind = if matches!(facets.facets, Facets::Options { .. }) {
                    "options"
                } else {
                    "keywords"
                };
                let lines = entries
                    .iter()
                    .map(|e| line(e.label(), e.count, e.value == FacetValue::NoValue))
                    .collect();
                let summary = if entries.is_empty() {
                    "no values".to_string()
                } else {
                    String::new()
                };
                (kind, lines, summary)
            }
            Facets::Range { bounds } => {
                let summary = match bounds {
                    Some((min, max)) => {
                        format!("{} to {}", format_number(*min), format_number(*max))
                    }
                    None => "no values".to_string(),
                };
                ("range", vec![], summary)
            }
            Facets::Checkbox { checked, total } => {
                ("checkbox", vec![], format!("{} of {} checked", checked, total))
            }
            Facets::Unfiltered => ("free text", vec![], "no filter control".to_string()),
        };

        let data = FacetsData {
            column: facets.column.clone(),
            kind: kind.to_string(),
            entries,
            summary,
        };
        self.render(FACETS_TEMPLATE, &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn schema(&self, columns: &[ColumnSummary]) -> String {
        let name_width = columns.iter().map(|c| c.name.width()).max().unwrap_or(0);
        let lines = columns
            .iter()
            .map(|c| {
                let mut flags = Vec::new();
                if c.column.searchable {
                    flags.push("searchable");
                }
                if c.column.display_in_table {
                    flags.push("table");
                }
                if c.column.display_in_popup {
                    flags.push("popup");
                }
                SchemaLineData {
                    name: c.name.clone(),
                    padding: " ".repeat(name_width - c.name.width() + COLUMN_GAP),
                    kind: format!("{} ({})", c.column.kind.describe(), c.column.value_type()),
                    role: c.role.map(str::to_string),
                    flags: if flags.is_empty() {
                        String::new()
                    } else {
                        format!("[{}]", flags.join(", "))
                    },
                }
            })
            .collect();
        self.render(SCHEMA_TEMPLATE, &SchemaData { columns: lines })
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn text_list(&self, lines: &[String], empty_message: &str) -> String {
        let data = TextListData {
            lines: lines.to_vec(),
            empty_message: empty_message.to_string(),
        };
        self.render(TEXT_LIST_TEMPLATE, &data)
            .unwrap_or_else(|_| format!("{}\n", empty_message))
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let messages = messages
            .iter()
            .map(|msg| {
                let style = match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                };
                MessageData {
                    content: msg.content.clone(),
                    style: style.to_string(),
                }
            })
            .collect();

        self.render(MESSAGES_TEMPLATE, &MessagesData { messages })
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }
}

fn register_style_filter(env: &mut Environment<'static>, theme: Theme, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if use_color {
            theme.apply(&name, &text)
        } else {
            theme.apply_plain(&name, &text)
        }
    });
}

fn segment_data(segments: &[MatchSegment]) -> Vec<SegmentData> {
    segments
        .iter()
        .map(|s| SegmentData {
            text: s.text().to_string(),
            is_match: s.is_match(),
        })
        .collect()
}

fn segments_width(segments: &[MatchSegment]) -> usize {
    segments.iter().map(|s| one_line(s.text()).width()).sum()
}

fn one_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Fits highlighted segments into `max_width` columns, ending with an ellipsis when
/// something had to be cut. Returns the segments and the width they take.
fn fit_segments(segments: &[MatchSegment], max_width: usize) -> (Vec<SegmentData>, usize) {
    let total = segments_width(segments);
    if total <= max_width {
        let fitted = segments
            .iter()
            .map(|s| SegmentData {
                text: one_line(s.text()),
                is_match: s.is_match(),
            })
            .collect();
        return (fitted, total);
    }

    let limit = max_width.saturating_sub(1);
    let mut fitted = Vec::new();
    let mut used = 0;
    for segment in segments {
        let mut text = String::new();
        let mut complete = true;
        for c in one_line(segment.text()).chars() {
            let width = c.width().unwrap_or(0);
            if used + width > limit {
                complete = false;
                break;
            }
            text.push(c);
            used += width;
        }
        if !text.is_empty() {
            fitted.push(SegmentData {
                text,
                is_match: segment.is_match(),
            });
        }
        if !complete {
            break;
        }
    }
    fitted.push(SegmentData {
        text: ELLIPSIS.to_string(),
        is_match: false,
    });
    (fitted, used + 1)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let (fitted, _) = fit_segments(&[MatchSegment::Plain(s.to_string())], max_width);
    fitted.into_iter().map(|s| s.text).collect()
}

fn layout_table(table: &TableView, cell_width: usize, summary: String) -> TableData {
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let content = table
                .rows
                .iter()
                .map(|row| row.cells.get(i).map_or(0, |c| segments_width(c)))
                .max()
                .unwrap_or(0);
            content.max(header.width()).min(cell_width)
        })
        .collect();

    let id_width = table
        .rows
        .iter()
        .map(|row| row.id.to_string().len())
        .max()
        .unwrap_or(1)
        + COLUMN_GAP;

    let headers = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(header, &width)| {
            let text = truncate_to_width(header, width);
            let padding = " ".repeat(width.saturating_sub(text.width()) + COLUMN_GAP);
            HeaderData { text, padding }
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| RowData {
            id: format!("{:<width$}", row.id, width = id_width),
            cells: row
                .cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| {
                    let (segments, used) = fit_segments(cell, width);
                    CellData {
                        segments,
                        padding: " ".repeat(width.saturating_sub(used) + COLUMN_GAP),
                    }
                })
                .collect(),
            link: row.link.clone(),
        })
        .collect();

    TableData {
        empty: false,
        id_header: format!("{:<width$}", "#", width = id_width),
        headers,
        rows,
        has_links: table.has_links(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue::facets::FacetEntry;
    use catalogue::format::TableRow;
    use catalogue::highlight::MatchSegment::{Match, Plain};

    fn plain() -> Renderer {
        Renderer::new(false)
    }

    fn sample_table() -> TableView {
        TableView {
            headers: vec!["Title".into(), "Year".into()],
            rows: vec![
                TableRow {
                    id: 0,
                    cells: vec![
                        vec![Plain("The ".into()), Match("Gorilla".into()), Plain(" Study".into())],
                        vec![Plain("2010".into())],
                    ],
                    link: Some("https://doi.org/10.1000/a".into()),
                },
                TableRow {
                    id: 1,
                    cells: vec![vec![Plain("Accessible Maps".into())], vec![]],
                    link: None,
                },
            ],
        }
    }

    #[test]
    fn test_render_table() {
        let output = plain().table(&sample_table(), 4, 40);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("#"));
        assert!(lines[0].contains("Title"));
        assert!(lines[0].contains("Link"));
        assert!(lines[1].starts_with("0  The Gorilla Study"));
        assert!(lines[1].contains("https://doi.org/10.1000/a"));
        assert!(lines[2].contains("Accessible Maps"));
        assert_eq!(lines.last().copied(), Some("2 of 4 records"));
    }

    #[test]
    fn test_render_empty_table() {
        let table = TableView {
            headers: vec!["Title".into()],
            rows: vec![],
        };
        let output = plain().table(&table, 4, 40);
        assert!(output.contains("No records found."));
        assert!(output.contains("0 of 4 records"));
    }

    #[test]
    fn test_cells_are_truncated() {
        let output = plain().table(&sample_table(), 4, 6);
        assert!(output.contains("The G…"));
        assert!(!output.contains("Gorilla Study"));
    }

    #[test]
    fn test_fit_segments_keeps_match_flags() {
        let segments = vec![Plain("ab".into()), Match("cdef".into())];
        let (fitted, used) = fit_segments(&segments, 4);
        assert_eq!(used, 4);
        let texts: Vec<&str> = fitted.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "c", "…"]);
        assert!(fitted[1].is_match);
    }

    #[test]
    fn test_wide_characters_count_double() {
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn test_render_detail() {
        let detail = RecordDetail {
            id: 3,
            title: vec![Plain("Tactile Graphics".into())],
            fields: vec![catalogue::format::DetailField {
                column: "Topics".into(),
                lines: vec![vec![Plain("- Low ".into()), Match("Vision".into())]],
            }],
            link: Some("https://doi.org/10.1000/d".into()),
        };
        let output = plain().detail(&detail);
        assert!(output.starts_with("3 Tactile Graphics"));
        assert!(output.contains("Topics\n  - Low Vision\n"));
        assert!(output.contains("Link: https://doi.org/10.1000/d"));
    }

    #[test]
    fn test_render_facets() {
        let facets = ColumnFacets {
            column: "Venue".into(),
            facets: Facets::Options {
                entries: vec![
                    FacetEntry {
                        value: FacetValue::Value("CHI".into()),
                        count: 2,
                    },
                    FacetEntry {
                        value: FacetValue::NoValue,
                        count: 1,
                    },
                ],
            },
        };
        let output = plain().facets(&facets);
        assert!(output.contains("CHI (2)"));
        assert!(output.contains("None (1)"));

        let range = ColumnFacets {
            column: "Year".into(),
            facets: Facets::Range {
                bounds: Some((2010.0, 2018.0)),
            },
        };
        assert!(plain().facets(&range).contains("2010 to 2018"));
    }

    #[test]
    fn test_render_messages() {
        let messages = vec![
            CmdMessage::info("Info message"),
            CmdMessage::warning("Warning message"),
        ];
        let output = plain().messages(&messages);
        assert_eq!(output, "Info message\nWarning message\n");
        assert!(plain().messages(&[]).is_empty());
    }

    #[test]
    fn test_render_text_list() {
        let output = plain().text_list(&["a = 1".into(), "b = 2".into()], "");
        assert_eq!(output, "a = 1\nb = 2\n");
        assert!(plain().text_list(&[], "Nothing here.").contains("Nothing here."));
    }

    #[test]
    fn test_unknown_style_is_flagged() {
        let theme = Theme::new();
        assert_eq!(theme.apply_plain("typo", "x"), "(!?) x");
    }
}
