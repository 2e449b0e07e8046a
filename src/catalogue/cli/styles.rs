use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style names used by the templates.
pub mod names {
    pub const HEADER: &str = "header";
    pub const INDEX: &str = "index";
    pub const MATCH: &str = "match";
    pub const TITLE: &str = "title";
    pub const FIELD: &str = "field";
    pub const LINK: &str = "link";
    pub const KIND: &str = "kind";
    pub const COUNT: &str = "count";
    pub const MUTED: &str = "muted";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Named styles applied by the `style` template filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Styled text. Unknown style names are flagged so template typos show up.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Like [`Theme::apply`] without ANSI codes.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.styles.contains_key(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

pub static CATALOGUE_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::HEADER, Style::new().bold().underlined())
        .add(names::INDEX, Style::new().yellow())
        .add(names::MATCH, Style::new().black().on_yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::FIELD, Style::new().cyan().bold())
        .add(names::LINK, Style::new().blue().underlined())
        .add(names::KIND, Style::new().magenta())
        .add(names::COUNT, Style::new().color256(245))
        .add(names::MUTED, Style::new().dim())
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});
