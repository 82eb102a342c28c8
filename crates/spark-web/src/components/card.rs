//! Card container primitive.
//!
//! A card is a bordered, rounded box with a visual variant and padding
//! size. Cards that carry an action, or use the interactive variant, are
//! exposed as buttons: `role="button"`, focusable, and activated by Enter
//! or Space through the portal script.

use askama::Template;

/// Classes every card carries.
pub const BASE_CLASSES: &str = "rounded-xl border bg-card";

/// DOM `KeyboardEvent.key` values that activate an interactive card. The
/// served portal script is built from this list.
pub const ACTIVATION_KEYS: [&str; 2] = ["Enter", " "];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Default,
    Elevated,
    Interactive,
    Outline,
    Ghost,
    Warning,
    Success,
}

impl CardVariant {
    /// Parse a variant name. Unknown names fall back to `Default`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "elevated" => Self::Elevated,
            "interactive" => Self::Interactive,
            "outline" => Self::Outline,
            "ghost" => Self::Ghost,
            "warning" => Self::Warning,
            "success" => Self::Success,
            _ => Self::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Elevated => "elevated",
            Self::Interactive => "interactive",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }

    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Elevated => "shadow-lg",
            Self::Interactive => "cursor-pointer hover:shadow-md transition-shadow",
            Self::Outline => "border-2",
            Self::Ghost => "border-none shadow-none",
            Self::Warning => "border-amber-300 bg-amber-50",
            Self::Success => "border-green-300 bg-green-50",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl CardSize {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sm" => Self::Sm,
            "lg" => Self::Lg,
            _ => Self::Md,
        }
    }

    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "p-4",
            Self::Md => "p-6",
            Self::Lg => "p-8",
        }
    }
}

/// What happens when an interactive card is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Navigate(String),
}

impl CardAction {
    pub fn href(&self) -> &str {
        match self {
            Self::Navigate(href) => href,
        }
    }
}

/// Join class fragments, skipping empty ones.
pub fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Template)]
#[template(path = "components/card.html")]
struct CardMarkup<'a> {
    class_name: String,
    role: Option<&'a str>,
    tab_index: Option<i32>,
    labelled_by: Option<&'a str>,
    interactive: bool,
    action: Option<&'a str>,
    body: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    variant: CardVariant,
    size: CardSize,
    class: String,
    action: Option<CardAction>,
    tab_index: Option<i32>,
    role: Option<String>,
    labelled_by: Option<String>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: CardVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: CardSize) -> Self {
        self.size = size;
        self
    }

    /// Extra classes appended after the size and variant classes.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn on_click(mut self, href: impl Into<String>) -> Self {
        self.action = Some(CardAction::Navigate(href.into()));
        self
    }

    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn labelled_by(mut self, id: impl Into<String>) -> Self {
        self.labelled_by = Some(id.into());
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.variant == CardVariant::Interactive || self.action.is_some()
    }

    pub fn class_name(&self) -> String {
        join_classes(&[
            BASE_CLASSES,
            self.size.classes(),
            self.variant.classes(),
            &self.class,
        ])
    }

    /// Interactive cards are always buttons; others keep the caller's role.
    pub fn effective_role(&self) -> Option<&str> {
        if self.is_interactive() {
            Some("button")
        } else {
            self.role.as_deref()
        }
    }

    pub fn effective_tab_index(&self) -> Option<i32> {
        if self.is_interactive() {
            Some(self.tab_index.unwrap_or(0))
        } else {
            self.tab_index
        }
    }

    /// Whether a key press activates this card, using DOM key names.
    /// Mirrors what the portal script does in the browser.
    pub fn activates_on(&self, key: &str) -> bool {
        self.is_interactive() && ACTIVATION_KEYS.contains(&key)
    }

    pub fn action(&self) -> Option<&CardAction> {
        self.action.as_ref()
    }

    /// Render the card around already-rendered `body` markup.
    pub fn render(&self, body: &str) -> askama::Result<String> {
        CardMarkup {
            class_name: self.class_name(),
            role: self.effective_role(),
            tab_index: self.effective_tab_index(),
            labelled_by: self.labelled_by.as_deref(),
            interactive: self.is_interactive(),
            action: self.action.as_ref().map(CardAction::href),
            body,
        }
        .render()
    }
}

/// Structural sub-parts of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPart {
    Header,
    Title,
    Description,
    Content,
    Footer,
}

#[derive(Template)]
#[template(path = "components/card_part.html")]
struct CardPartMarkup<'a> {
    tag: &'a str,
    class_name: String,
    body: &'a str,
}

impl CardPart {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Title => "h3",
            Self::Description => "p",
            Self::Header | Self::Content | Self::Footer => "div",
        }
    }

    pub fn base_classes(self) -> &'static str {
        match self {
            Self::Header => "flex flex-col space-y-1.5",
            Self::Title => "font-semibold leading-none tracking-tight",
            Self::Description => "text-sm text-muted-foreground",
            Self::Content => "p-6 pt-0",
            Self::Footer => "flex items-center p-6 pt-0",
        }
    }

    pub fn class_name(self, extra: &str) -> String {
        join_classes(&[self.base_classes(), extra])
    }

    pub fn render(self, extra: &str, body: &str) -> askama::Result<String> {
        CardPartMarkup {
            tag: self.tag(),
            class_name: self.class_name(extra),
            body,
        }
        .render()
    }
}
