//! Report handlers
//!
//! Each report is served twice: as JSON under `/api/v1` and as an HTML page
//! embedding the chart.

use axum::{
    extract::{Path, State},
    response::Html,
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;

use shared::charts::Chart;
use shared::reports::{report_links, ReportKind, ReportLink};
use shared::Child;

use crate::error::{AppError, AppResult};
use crate::handlers::events::VIEW_CHILD;
use crate::middleware::AuthUser;
use crate::services::{chart_context, ReportService};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub child: Child,
    pub reports: Vec<ReportLink>,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub kind: ReportKind,
    pub title: &'static str,
    pub slug: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub child: Child,
    pub report: ReportSummary,
    /// Absent when there are too few records to draw the chart
    pub chart: Option<Chart>,
}

struct RenderedReport {
    child: Child,
    kind: ReportKind,
    chart: Option<Chart>,
}

async fn render_report(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    report: &str,
) -> AppResult<RenderedReport> {
    user.require(VIEW_CHILD)?;

    let kind = ReportKind::from_slug(report)
        .ok_or_else(|| AppError::NotFound(format!("Report {}", report)))?;

    let service = ReportService::new(state.db.clone());
    let child = service.child(slug).await?;
    let ctx = chart_context(&state.config.reports, Utc::now());
    let data = service.load(kind, &child, &ctx).await?;
    let chart = data.chart(&ctx);

    if chart.is_none() {
        tracing::debug!(report = kind.slug(), rows = data.len(), "not enough data for a chart");
    }

    Ok(RenderedReport { child, kind, chart })
}

/// List the reports available for a child
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> AppResult<Json<ReportListResponse>> {
    user.require(VIEW_CHILD)?;

    let child = ReportService::new(state.db.clone()).child(&slug).await?;
    let reports = report_links("/api/v1", &child.slug);
    Ok(Json(ReportListResponse { child, reports }))
}

/// Get one report and its chart
pub async fn get_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((slug, report)): Path<(String, String)>,
) -> AppResult<Json<ReportResponse>> {
    let RenderedReport { child, kind, chart } = render_report(&state, &user, &slug, &report).await?;

    Ok(Json(ReportResponse {
        child,
        report: ReportSummary {
            kind,
            title: kind.title(),
            slug: kind.slug(),
        },
        chart,
    }))
}

/// Report list page
pub async fn report_list_page(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    user.require(VIEW_CHILD)?;

    let child = ReportService::new(state.db.clone()).child(&slug).await?;
    let reports = report_links("", &child.slug);
    Ok(Html(state.templates.report_list(&child, &reports)?))
}

/// Report page embedding the chart
pub async fn report_page(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((slug, report)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let RenderedReport { child, kind, chart } = render_report(&state, &user, &slug, &report).await?;

    Ok(Html(state.templates.report(&child, kind.title(), chart.as_ref())?))
}
