//! Listing query parameters
//!
//! Numbers are read leniently: a missing or unparsable `startIndex`/`limit`
//! falls back to the default instead of failing the request.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use blog_core::{Id, ListWindow, PostFilter, SortDirection};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// `Query` whose rejection is the uniform 400 error
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(ApiQuery(inner))
    }
}

/// `startIndex`, `limit` and `sort` for user and comment listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub start_index: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Window sorted by `sort`, or by `default` when absent
    pub fn window(&self, default: SortDirection) -> ListWindow {
        window(
            self.start_index.as_deref(),
            self.limit.as_deref(),
            SortDirection::parse_or(self.sort.as_deref(), default),
        )
    }
}

/// Post listing: window, `order` and filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub start_index: Option<String>,
    pub limit: Option<String>,
    pub order: Option<String>,
    pub user_id: Option<String>,
    pub category: Option<String>,
    pub slug: Option<String>,
    pub post_id: Option<String>,
    pub search_term: Option<String>,
}

impl PostQuery {
    /// Window ordered by `order`, newest update first by default
    pub fn window(&self) -> ListWindow {
        window(
            self.start_index.as_deref(),
            self.limit.as_deref(),
            SortDirection::parse_or(self.order.as_deref(), SortDirection::Desc),
        )
    }

    /// Filters from the set parameters; empty values are ignored
    pub fn filter(&self) -> Result<PostFilter, ApiError> {
        Ok(PostFilter {
            author_id: parse_id("userId", self.user_id.as_deref())?,
            category: non_empty(self.category.as_deref()),
            slug: non_empty(self.slug.as_deref()),
            post_id: parse_id("postId", self.post_id.as_deref())?,
            search_term: non_empty(self.search_term.as_deref()),
        })
    }
}

fn window(start_index: Option<&str>, limit: Option<&str>, direction: SortDirection) -> ListWindow {
    let number = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
    ListWindow::new(
        number(start_index).unwrap_or(0),
        number(limit).unwrap_or(ListWindow::DEFAULT_LIMIT),
        direction,
    )
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToOwned::to_owned)
}

fn parse_id(name: &str, value: Option<&str>) -> Result<Option<Id>, ApiError> {
    match value.filter(|v| !v.is_empty()) {
        Some(raw) => Id::parse(raw)
            .map(Some)
            .map_err(|_| ApiError::invalid_query(format!("Invalid {name}"))),
        None => Ok(None),
    }
}
