//! Server-rendered report pages

use serde::Serialize;
use tera::{Context, Tera};

use shared::charts::Chart;
use shared::reports::ReportLink;
use shared::Child;

use crate::error::{AppError, AppResult};

/// Compiled page templates
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();

        // Register built-in templates
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            (
                "reports/report_list.html",
                include_str!("../templates/reports/report_list.html"),
            ),
            ("reports/chart.html", include_str!("../templates/reports/chart.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Page linking to every report for `child`
    pub fn report_list(&self, child: &Child, reports: &[ReportLink]) -> AppResult<String> {
        let mut context = Context::new();
        context.insert("child", &ChildView::from(child));
        context.insert("reports", reports);
        Ok(self.tera.render("reports/report_list.html", &context)?)
    }

    /// Page for one report; without a chart it says there is not enough data
    pub fn report(&self, child: &Child, title: &str, chart: Option<&Chart>) -> AppResult<String> {
        let mut context = Context::new();
        context.insert("child", &ChildView::from(child));
        context.insert("title", title);
        if let Some(chart) = chart {
            let js = chart
                .js()
                .map_err(|e| AppError::Internal(format!("Chart serialization error: {}", e)))?;
            context.insert("chart_html", &chart.html());
            context.insert("chart_js", &js);
        }
        Ok(self.tera.render("reports/chart.html", &context)?)
    }
}

#[derive(Serialize)]
struct ChildView<'a> {
    name: String,
    first_name: &'a str,
    slug: &'a str,
}

impl<'a> From<&'a Child> for ChildView<'a> {
    fn from(child: &'a Child) -> Self {
        Self {
            name: child.name(),
            first_name: &child.first_name,
            slug: &child.slug,
        }
    }
}
