//! Event listing service
//! Runs the filter-set queries behind the list endpoints and exports them as CSV

use sea_query::PostgresQueryBuilder;
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use shared::filters::{count_query, tag_exists_query, tags_query, ChildFilter, FilterSet};
use shared::{Child, PaginatedResponse, Pagination, PaginationMeta, ParseChoiceError, Tag};

use crate::error::{AppError, AppResult};

/// Event listing service
#[derive(Clone)]
pub struct EventService {
    db: PgPool,
}

impl EventService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// One page of the rows matching `filter`, newest first
    pub async fn list<F>(
        &self,
        filter: &F,
        caregiver: &str,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<F::Record>>
    where
        F: FilterSet,
        F::Record: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = filter.page(caregiver, pagination).to_string(PostgresQueryBuilder);
        tracing::debug!(kind = ?F::KIND, %sql, "listing events");

        let data = sqlx::query_as::<_, F::Record>(&sql)
            .fetch_all(&self.db)
            .await?;
        let count_sql = count_query(filter.select(caregiver)).to_string(PostgresQueryBuilder);
        let total = self.count(&count_sql).await?;

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(pagination, total),
        })
    }

    /// Every row matching `filter`, for export
    pub async fn all<F>(&self, filter: &F, caregiver: &str) -> AppResult<Vec<F::Record>>
    where
        F: FilterSet,
        F::Record: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = filter.select(caregiver).to_string(PostgresQueryBuilder);
        let rows = sqlx::query_as::<_, F::Record>(&sql)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Children visible to `caregiver`
    pub async fn children(
        &self,
        filter: &ChildFilter,
        caregiver: &str,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Child>> {
        let sql = filter.page(caregiver, pagination).to_string(PostgresQueryBuilder);
        let data = sqlx::query_as::<_, Child>(&sql).fetch_all(&self.db).await?;
        let count_sql = count_query(filter.select(caregiver)).to_string(PostgresQueryBuilder);
        let total = self.count(&count_sql).await?;

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(pagination, total),
        })
    }

    /// All tags, ordered by name
    pub async fn tags(&self) -> AppResult<Vec<Tag>> {
        let sql = tags_query().to_string(PostgresQueryBuilder);
        let tags = sqlx::query_as::<_, Tag>(&sql).fetch_all(&self.db).await?;
        Ok(tags)
    }

    /// Rejects a tag filter naming a tag that does not exist
    pub async fn ensure_tag_exists(&self, name: &str) -> AppResult<()> {
        let sql = tag_exists_query(name).to_string(PostgresQueryBuilder);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.db).await?;
        if count == 0 {
            return Err(AppError::validation(
                "tag",
                ParseChoiceError(name.to_string()).to_string(),
            ));
        }
        Ok(())
    }

    // Statements are rendered before any await: sea-query values are not `Send`.
    async fn count(&self, sql: &str) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.db).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::filters::FeedingFilter;
    use shared::{DiaperChange, DiaperColor};
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    fn assert_send<T: Send>(_: &T) {}

    #[tokio::test]
    async fn test_service_futures_are_send() {
        let db = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://babycare@localhost/babycare_test")
            .unwrap();
        let service = EventService::new(db);
        let feedings = FeedingFilter::default();
        let children = ChildFilter::default();

        // Handlers only register on the router when these futures are `Send`.
        assert_send(&service.list(&feedings, "alice", Pagination::default()));
        assert_send(&service.all(&feedings, "alice"));
        assert_send(&service.children(&children, "alice", Pagination::default()));
        assert_send(&service.ensure_tag_exists("night"));
        assert_send(&service.tags());
    }

    #[test]
    fn test_csv_has_header_and_one_line_per_row() {
        let change = DiaperChange {
            id: Uuid::nil(),
            child_id: Uuid::nil(),
            time: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
            wet: true,
            solid: false,
            color: Some(DiaperColor::Yellow),
            amount: None,
            notes: Some("after bath".into()),
        };
        let csv = EventService::export_to_csv(&[change.clone(), change]).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,child_id,time,wet,solid,color,amount,notes");
        assert!(lines[1].contains(",true,false,yellow,,after bath"), "{}", lines[1]);
    }

    #[test]
    fn test_empty_export_is_empty() {
        let rows: Vec<DiaperChange> = Vec::new();
        assert_eq!(EventService::export_to_csv(&rows).unwrap(), "");
    }
}
