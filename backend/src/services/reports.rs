//! Report service
//! Loads a child and the rows behind one of its chart reports

use chrono::{DateTime, Utc};
use sea_query::PostgresQueryBuilder;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use shared::charts::{local_date, ChartContext};
use shared::reports::{report_query, ReportData, ReportKind};
use shared::{Child, TimeWindow};

use crate::config::ReportsConfig;
use crate::error::{AppError, AppResult};

/// Report service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

impl ReportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Child with `slug`
    pub async fn child(&self, slug: &str) -> AppResult<Child> {
        sqlx::query_as::<_, Child>(
            r#"
            SELECT id, first_name, last_name, slug, birth_date, feeding_target
            FROM children
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Child".to_string()))
    }

    /// Rows for `kind` belonging to `child`
    pub async fn load(
        &self,
        kind: ReportKind,
        child: &Child,
        ctx: &ChartContext,
    ) -> AppResult<ReportData> {
        let today = TimeWindow::local_day(ctx.today, ctx.offset);
        let sql = report_query(kind, child.id, today).to_string(PostgresQueryBuilder);
        tracing::debug!(report = kind.slug(), child = %child.slug, %sql, "loading report");

        let data = match kind {
            ReportKind::BmiChange => ReportData::BmiChange(self.fetch(&sql).await?),
            ReportKind::DiaperChangeAmounts => {
                ReportData::DiaperChangeAmounts(self.fetch(&sql).await?)
            }
            ReportKind::DiaperChangeLifetimes => {
                ReportData::DiaperChangeLifetimes(self.fetch(&sql).await?)
            }
            ReportKind::DiaperChangeTypes => ReportData::DiaperChangeTypes(self.fetch(&sql).await?),
            ReportKind::FeedingAmounts => ReportData::FeedingAmounts(self.fetch(&sql).await?),
            ReportKind::FeedingDuration => ReportData::FeedingDuration(self.fetch(&sql).await?),
            ReportKind::FeedingTrend => ReportData::FeedingTrend {
                feedings: self.fetch(&sql).await?,
                target: child.feeding_target,
            },
            ReportKind::HeadCircumferenceChange => {
                ReportData::HeadCircumferenceChange(self.fetch(&sql).await?)
            }
            ReportKind::HeightChange => ReportData::HeightChange(self.fetch(&sql).await?),
            ReportKind::PumpingAmounts => ReportData::PumpingAmounts(self.fetch(&sql).await?),
            ReportKind::SleepPattern => ReportData::SleepPattern(self.fetch(&sql).await?),
            ReportKind::SleepTotals => ReportData::SleepTotals(self.fetch(&sql).await?),
            ReportKind::TemperatureChange => ReportData::TemperatureChange(self.fetch(&sql).await?),
            ReportKind::TummyTimeDuration => ReportData::TummyTimeDuration(self.fetch(&sql).await?),
            ReportKind::WeightChange => ReportData::WeightChange(self.fetch(&sql).await?),
        };

        tracing::debug!(report = kind.slug(), rows = data.len(), "report loaded");
        Ok(data)
    }

    async fn fetch<T>(&self, sql: &str) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        Ok(sqlx::query_as::<_, T>(sql).fetch_all(&self.db).await?)
    }
}

/// Chart settings for a request made at `now`
pub fn chart_context(config: &ReportsConfig, now: DateTime<Utc>) -> ChartContext {
    let offset = config.offset();
    ChartContext::new(offset, local_date(now, offset)).with_width(config.chart_width)
}
