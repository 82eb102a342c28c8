//! Metric tile built on [`Card`].

use askama::Template;

use super::card::{join_classes, Card};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    /// Labelled but drawn without an arrow.
    Neutral,
}

impl Trend {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Up => "↗",
            Self::Down => "↘",
            Self::Neutral => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Up => "text-lg ml-2 text-green-600",
            Self::Down => "text-lg ml-2 text-red-600",
            Self::Neutral => "text-lg ml-2",
        }
    }
}

#[derive(Template)]
#[template(path = "components/kpi.html")]
struct KpiMarkup<'a> {
    title_id: &'a str,
    title: &'a str,
    value: &'a str,
    trend: Option<Trend>,
    description: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct KpiCard {
    title: String,
    value: String,
    description: Option<String>,
    trend: Option<Trend>,
    class: String,
}

impl KpiCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            description: None,
            trend: None,
            class: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Element id of the title, used to label the tile.
    pub fn title_id(&self) -> String {
        let slug = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        format!("kpi-{}", slug)
    }

    pub fn render(&self) -> askama::Result<String> {
        let title_id = self.title_id();
        let body = KpiMarkup {
            title_id: &title_id,
            title: &self.title,
            value: &self.value,
            trend: self.trend,
            description: self.description.as_deref(),
        }
        .render()?;

        Card::new()
            .class(join_classes(&["text-center", &self.class]))
            .role("group")
            .labelled_by(title_id)
            .render(&body)
    }
}
