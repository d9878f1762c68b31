//! List handlers for children, tags, and child events

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow};
use validator::Validate;

use shared::filters::{ChildFilter, FilterSet};
use shared::Pagination;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::services::EventService;
use crate::AppState;

pub const VIEW_CHILD: &str = "core.view_child";

/// Paging and output format, shared by every list endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListParams {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u32>,
    pub format: Option<String>,
}

impl ListParams {
    pub fn pagination(&self) -> Pagination {
        let default = Pagination::default();
        Pagination {
            page: self.page.unwrap_or(default.page),
            per_page: self.per_page.unwrap_or(default.per_page),
        }
    }

    /// Whether a CSV export was asked for; anything but json/csv is rejected
    fn wants_csv(&self) -> AppResult<bool> {
        match self.format.as_deref() {
            None | Some("") | Some("json") => Ok(false),
            Some("csv") => Ok(true),
            Some(other) => Err(AppError::validation(
                "format",
                format!("Unsupported format {}; expected json or csv", other),
            )),
        }
    }
}

fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::validation("query", rejection.body_text())
}

/// List one kind of child event through its filter set
pub async fn list_events<F>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    filter: Result<Query<F>, QueryRejection>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Response>
where
    F: FilterSet + DeserializeOwned + Send + Sync + 'static,
    F::Record: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static,
{
    user.require(F::KIND.view_permission())?;

    let Query(filter) = filter.map_err(invalid_query)?;
    let Query(params) = params.map_err(invalid_query)?;
    params.validate()?;
    let csv = params.wants_csv()?;

    let service = EventService::new(state.db.clone());

    if F::TAGGED {
        if let Some(tag) = filter.tag() {
            service.ensure_tag_exists(tag).await?;
        }
    }

    if csv {
        let rows = service.all(&filter, &user.username).await?;
        let body = EventService::export_to_csv(&rows)?;
        let disposition = format!("attachment; filename=\"{}.csv\"", F::KIND.table_name());
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response());
    }

    let page = service
        .list(&filter, &user.username, params.pagination())
        .await?;
    Ok(Json(page).into_response())
}

/// List the children the caregiver looks after
pub async fn list_children(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    filter: Result<Query<ChildFilter>, QueryRejection>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Response> {
    user.require(VIEW_CHILD)?;

    let Query(filter) = filter.map_err(invalid_query)?;
    let Query(params) = params.map_err(invalid_query)?;
    params.validate()?;

    let service = EventService::new(state.db.clone());
    let page = service
        .children(&filter, &user.username, params.pagination())
        .await?;
    Ok(Json(page).into_response())
}

/// List tag choices
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
) -> AppResult<Response> {
    let service = EventService::new(state.db.clone());
    let tags = service.tags().await?;
    Ok(Json(tags).into_response())
}
