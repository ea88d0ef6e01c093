//! Binds a list endpoint to table state: pagination, sort and filters.
//!
//! The query contract is shared by every list endpoint: zero-based `page`,
//! `size`, `sort=field,dir`, plus any non-empty filter. Date ranges under a
//! `*range*` key become `startTime`/`endTime` at day boundaries.

use std::collections::BTreeMap;
use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::error::ApiResult;
use crate::models::{ListQuery, Page};

#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch(&self, query: ListQuery) -> ApiResult<Page<T>>;
}

#[async_trait]
impl<T, F, Fut> ListSource<T> for F
where
    T: Send + 'static,
    F: Fn(ListQuery) -> Fut + Send + Sync,
    Fut: Future<Output = ApiResult<Page<T>>> + Send,
{
    async fn fetch(&self, query: ListQuery) -> ApiResult<Page<T>> {
        (self)(query).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterValue {
    Null,
    Text(String),
    Integer(i64),
    Bool(bool),
    List(Vec<String>),
    DateRange(NaiveDate, NaiveDate),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

pub type Filters = BTreeMap<String, FilterValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascend,
    Descend,
}

/// A table pager/sorter event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableChange {
    pub current: u32,
    pub page_size: u32,
    pub sort_field: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based, as shown to the user
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct PaginatedOptions {
    pub default_sort: String,
    pub page_size: u32,
    /// Offset used to compute day boundaries for date ranges
    pub utc_offset: FixedOffset,
}

impl Default for PaginatedOptions {
    fn default() -> Self {
        Self {
            default_sort: "id,desc".to_string(),
            page_size: 10,
            utc_offset: *chrono::Local::now().offset(),
        }
    }
}

pub struct PaginatedFetch<T> {
    source: Box<dyn ListSource<T>>,
    initial_filters: Filters,
    options: PaginatedOptions,
    pub filters: Filters,
    pub pagination: Pagination,
    pub sort: String,
    pub data_source: Vec<T>,
    pub loading: bool,
}

impl<T: Send + 'static> PaginatedFetch<T> {
    pub fn new(source: impl ListSource<T> + 'static, initial_filters: Filters, options: PaginatedOptions) -> Self {
        Self {
            source: Box::new(source),
            filters: initial_filters.clone(),
            initial_filters,
            pagination: Pagination {
                current: 1,
                page_size: options.page_size,
                total: 0,
            },
            sort: options.default_sort.clone(),
            options,
            data_source: Vec::new(),
            loading: false,
        }
    }

    /// Query for the current state
    pub fn build_query(&self) -> ListQuery {
        let mut query = ListQuery::new()
            .with("page", self.pagination.current.saturating_sub(1))
            .with("size", self.pagination.page_size)
            .with("sort", &self.sort);

        for (key, value) in &self.filters {
            if value.is_empty() {
                continue;
            }
            match value {
                FilterValue::DateRange(start, end) if key.to_lowercase().contains("range") => {
                    let (start_time, _) = day_bounds(*start, self.options.utc_offset);
                    let (_, end_time) = day_bounds(*end, self.options.utc_offset);
                    query.set("startTime", format_instant(start_time));
                    query.set("endTime", format_instant(end_time));
                }
                FilterValue::DateRange(start, end) => query.set(key, format!("{start},{end}")),
                FilterValue::Text(s) => query.set(key, s),
                FilterValue::Integer(n) => query.set(key, n),
                FilterValue::Bool(b) => query.set(key, b),
                FilterValue::List(items) => query.set(key, items.join(",")),
                FilterValue::Null => {}
            }
        }
        query
    }

    /// Load the current page. On failure the table is emptied rather than
    /// left showing stale rows; the HTTP layer has already reported the error.
    pub async fn fetch_data(&mut self) -> ApiResult<()> {
        self.loading = true;
        let query = self.build_query();
        let result = self.source.fetch(query).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.data_source = page.content;
                self.pagination.total = page.total_elements;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("List fetch failed, clearing table: {}", e);
                self.data_source.clear();
                self.pagination.total = 0;
                Err(e)
            }
        }
    }

    pub async fn handle_table_change(&mut self, change: TableChange) -> ApiResult<()> {
        self.pagination.current = change.current.max(1);
        if change.page_size > 0 {
            self.pagination.page_size = change.page_size;
        }

        self.sort = match change.sort_field.filter(|f| !f.is_empty()) {
            Some(field) => {
                let order = match change.sort_order {
                    Some(SortOrder::Ascend) => "asc",
                    _ => "desc",
                };
                format!("{field},{order}")
            }
            None => self.options.default_sort.clone(),
        };

        self.fetch_data().await
    }

    pub async fn handle_search(&mut self) -> ApiResult<()> {
        self.pagination.current = 1;
        self.fetch_data().await
    }

    pub async fn handle_reset(&mut self) -> ApiResult<()> {
        for (key, value) in &self.initial_filters {
            self.filters.insert(key.clone(), value.clone());
        }
        self.handle_search().await
    }

    pub fn set_filter(&mut self, key: &str, value: impl Into<FilterValue>) {
        self.filters.insert(key.to_string(), value.into());
    }
}

/// First and last millisecond of `date` in the given offset, as UTC instants
pub fn day_bounds(date: NaiveDate, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_start = date.and_time(NaiveTime::MIN);
    let utc_start = local_start - Duration::seconds(i64::from(offset.local_minus_utc()));
    let start = Utc.from_utc_datetime(&utc_start);
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
