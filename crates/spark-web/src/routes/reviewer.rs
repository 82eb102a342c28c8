//! Reviewer briefing and data room pages.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use spark_core::{
    donation::is_valid_id,
    model::{format_currency, group_thousands, DataRoomFolder, ReviewerMetrics},
    ApiError, ApiResult,
};

use crate::components::{Card, CardPart, CardVariant, KpiCard, Trend};
use crate::error::PageError;
use crate::state::AppState;
use crate::views::{grid, notice_card, render_page, section_card, Heading};

#[derive(Template)]
#[template(path = "partials/fund_rows.html")]
struct FundRowsTemplate {
    rows: Vec<FundRow>,
    total: String,
}

struct FundRow {
    name: String,
    amount: String,
    share: String,
}

#[derive(Template)]
#[template(path = "partials/story.html")]
struct StoryTemplate<'a> {
    title: &'a str,
    blurb: &'a str,
    photo: Option<&'a str>,
    initial: String,
}

#[derive(Template)]
#[template(path = "partials/folder.html")]
struct FolderTemplate<'a> {
    folder: &'a str,
    items: &'a [String],
}

const KPI_GRID: &str = "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4";
const STORY_GRID: &str = "grid grid-cols-1 md:grid-cols-3 gap-6";
const FOLDER_GRID: &str = "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6";

/// GET /reviewer - Briefing of the default organization.
pub async fn index(State(state): State<AppState>) -> Response {
    Redirect::to(&format!("/reviewer/{}/briefing", state.config.default_org)).into_response()
}

/// GET /reviewer/{org}/briefing
pub async fn briefing(
    State(state): State<AppState>,
    Path(org): Path<String>,
) -> Result<Response, PageError> {
    let org = org_name(&org)?;
    let metrics = state.api.reviewer_metrics().await?;
    let page = render_page(&format!("{} Briefing", org), briefing_sections(&org, &metrics)?)?;
    Ok(page.into_response())
}

/// GET /reviewer/{org}/data-room
pub async fn data_room(
    State(state): State<AppState>,
    Path(org): Path<String>,
) -> Result<Response, PageError> {
    let org = org_name(&org)?;
    let folders = state.api.data_room_index().await?;
    let page = render_page(&format!("{} Data Room", org), data_room_sections(&org, &folders)?)?;
    Ok(page.into_response())
}

fn org_name(raw: &str) -> ApiResult<String> {
    let org = raw.trim();
    if is_valid_id(org) {
        Ok(org.to_string())
    } else {
        Err(ApiError::validation("Invalid organization"))
    }
}

fn briefing_sections(org: &str, metrics: &ReviewerMetrics) -> askama::Result<Vec<String>> {
    let title = format!("{} Reviewer Briefing", org);
    let data_room = format!("/reviewer/{}/data-room", org);
    let heading = Heading::new(&title)
        .subtitle("Mission overview, delivery metrics and impact highlights")
        .link(&data_room, "Open the data room")
        .card()?;

    let kpis = kpi_cards(metrics)?;
    let mut sections = vec![heading, grid(KPI_GRID, &kpis)?, funds_section(metrics)?];
    if !metrics.impact_stories.is_empty() {
        sections.push(stories_section(metrics)?);
    }
    Ok(sections)
}

fn kpi_cards(metrics: &ReviewerMetrics) -> askama::Result<Vec<String>> {
    let on_time_trend = if metrics.on_time_is_healthy() {
        Trend::Up
    } else {
        Trend::Neutral
    };

    [
        KpiCard::new("Boxes Shipped (YTD)", group_thousands(metrics.shipped_ytd))
            .description("School kits delivered this year")
            .trend(Trend::Up),
        KpiCard::new("On-Time Delivery", format!("{:.0}%", metrics.on_time_pct))
            .description("Delivered within the promised window")
            .trend(on_time_trend),
        KpiCard::new("Beneficiaries", group_thousands(metrics.beneficiaries))
            .description("Students and families served")
            .trend(Trend::Up),
        KpiCard::new("Total Raised", format_currency(metrics.total_funds()))
            .description("Across all designations")
            .trend(Trend::Up),
    ]
    .iter()
    .map(KpiCard::render)
    .collect()
}

fn funds_section(metrics: &ReviewerMetrics) -> askama::Result<String> {
    if metrics.funds_by_designation.is_empty() {
        return notice_card(
            CardVariant::Outline,
            "Funds by Designation",
            "No donations recorded yet",
        );
    }

    let total = metrics.total_funds();
    let rows = metrics
        .funds_by_designation
        .iter()
        .map(|fund| FundRow {
            name: fund.display_name().to_string(),
            amount: format_currency(fund.value),
            share: format!("{:.1}", fund.share_of(total)),
        })
        .collect();

    let body = FundRowsTemplate {
        rows,
        total: format_currency(total),
    }
    .render()?;
    section_card("💰 Funds by Designation", &body)
}

fn stories_section(metrics: &ReviewerMetrics) -> askama::Result<String> {
    let stories = metrics
        .impact_stories
        .iter()
        .map(|story| {
            let body = StoryTemplate {
                title: &story.title,
                blurb: &story.blurb,
                photo: story.photo(),
                initial: story.initial(),
            }
            .render()?;

            let mut card = Card::new()
                .variant(CardVariant::Interactive)
                .class("hover:scale-105 transition-transform duration-200");
            if let Some(photo) = story.photo() {
                card = card.on_click(photo);
            }
            card.render(&CardPart::Content.render("p-0", &body)?)
        })
        .collect::<askama::Result<Vec<_>>>()?;

    section_card("✨ Impact Stories", &grid(STORY_GRID, &stories)?)
}

fn data_room_sections(org: &str, folders: &[DataRoomFolder]) -> askama::Result<Vec<String>> {
    let title = format!("{} Data Room", org);
    let briefing = format!("/reviewer/{}/briefing", org);
    let heading = Heading::new(&title)
        .subtitle("Documents shared with reviewers")
        .link(&briefing, "Back to the briefing")
        .card()?;

    if folders.is_empty() {
        let empty = notice_card(
            CardVariant::Ghost,
            "No documents",
            "No documents have been shared yet",
        )?;
        return Ok(vec![heading, empty]);
    }

    let cards = folders
        .iter()
        .map(|folder| {
            let body = FolderTemplate {
                folder: &folder.folder,
                items: &folder.items,
            }
            .render()?;
            Card::new().variant(CardVariant::Outline).render(&body)
        })
        .collect::<askama::Result<Vec<_>>>()?;

    Ok(vec![heading, grid(FOLDER_GRID, &cards)?])
}
