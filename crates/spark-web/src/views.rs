//! Page shell and shared sections.
//!
//! Pages are a list of rendered card sections placed inside `base.html`.
//! Dynamic text always passes through a template so it is escaped; only
//! markup produced by other templates is inserted verbatim.

use askama::Template;
use axum::response::Html;

use crate::components::{Card, CardPart, CardSize, CardVariant};

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    sections: Vec<String>,
}

/// Render a full page from its sections.
pub fn render_page(title: &str, sections: Vec<String>) -> askama::Result<Html<String>> {
    PageTemplate { title, sections }.render().map(Html)
}

#[derive(Template)]
#[template(path = "partials/notice.html")]
struct Notice<'a> {
    heading: &'a str,
    message: &'a str,
}

/// A small card holding a heading and a message.
pub fn notice_card(variant: CardVariant, heading: &str, message: &str) -> askama::Result<String> {
    let body = Notice { heading, message }.render()?;
    Card::new().variant(variant).size(CardSize::Sm).render(&body)
}

pub struct Link<'a> {
    pub href: &'a str,
    pub label: &'a str,
}

#[derive(Template)]
#[template(path = "partials/heading.html")]
pub struct Heading<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub link: Option<Link<'a>>,
}

impl<'a> Heading<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            subtitle: None,
            link: None,
        }
    }

    pub fn subtitle(mut self, subtitle: &'a str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn link(mut self, href: &'a str, label: &'a str) -> Self {
        self.link = Some(Link { href, label });
        self
    }

    /// Hero card at the top of a page.
    pub fn card(&self) -> askama::Result<String> {
        let header = CardPart::Header.render("items-center", &self.render()?)?;
        Card::new()
            .variant(CardVariant::Elevated)
            .size(CardSize::Lg)
            .class("text-center")
            .render(&header)
    }
}

#[derive(Template)]
#[template(path = "partials/grid.html")]
struct Grid<'a> {
    class: &'a str,
    items: &'a [String],
}

pub fn grid(class: &str, items: &[String]) -> askama::Result<String> {
    Grid { class, items }.render()
}

/// Card with a titled header over already-rendered content.
///
/// `title` is inserted as markup, so it must be a literal.
pub fn section_card(title: &'static str, content: &str) -> askama::Result<String> {
    titled_card(CardVariant::Default, title, content)
}

pub fn titled_card(variant: CardVariant, title: &'static str, content: &str) -> askama::Result<String> {
    let header = CardPart::Header.render("", &CardPart::Title.render("text-xl text-cacao-brown", title)?)?;
    let content = CardPart::Content.render("pt-4", content)?;
    Card::new().variant(variant).render(&format!("{}{}", header, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_escapes_message() {
        let html = notice_card(CardVariant::Warning, "Error", "<script>x</script>").unwrap();
        assert!(html.contains("border-amber-300"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_page_includes_sections_in_order() {
        let Html(page) = render_page(
            "Receipts",
            vec!["<section>one</section>".to_string(), "<section>two</section>".to_string()],
        )
        .unwrap();
        assert!(page.contains("<title>Receipts · SparkCreatives</title>"));
        let one = page.find("one").unwrap();
        let two = page.find("two").unwrap();
        assert!(one < two);
        assert!(page.contains("/static/portal.js"));
    }

    #[test]
    fn test_heading_card() {
        let html = Heading::new("Data Room")
            .subtitle("Shared documents")
            .link("/reviewer/spark/briefing", "Back to briefing")
            .card()
            .unwrap();
        assert!(html.contains("p-8 shadow-lg text-center"));
        assert!(html.contains("<h1"));
        assert!(html.contains("Shared documents"));
        assert!(html.contains("Back to briefing"));
    }
}
