mod common;

use anyhow::Result;
use chrono::{FixedOffset, NaiveDate};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use common::TestConsole;
use workflow_admin::error::ApiError;
use workflow_admin::paginated::{
    FilterValue, Filters, PaginatedFetch, PaginatedOptions, SortOrder, TableChange,
};

fn utc_options() -> PaginatedOptions {
    PaginatedOptions {
        default_sort: "id,desc".to_string(),
        page_size: 10,
        utc_offset: FixedOffset::east_opt(0).unwrap(),
    }
}

#[tokio::test]
async fn sends_page_sort_and_filters() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/instances"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(query_param("sort", "id,desc"))
        .and(query_param("status", "OPEN"))
        .and(query_param("startTime", "2024-03-01T00:00:00.000Z"))
        .and(query_param("endTime", "2024-03-31T23:59:59.999Z"))
        .and(query_param_is_missing("keyword"))
        .and(query_param_is_missing("dateRange"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(
            json!([{ "processInstanceId": "p-1", "suspended": false }]),
            31,
        )))
        .expect(1)
        .mount(&console.server)
        .await;
    console.login_as(common::admin()).await?;

    let api = console.ctx.api().clone();
    let mut filters = Filters::new();
    filters.insert("status".into(), FilterValue::from("OPEN"));
    filters.insert("keyword".into(), FilterValue::from(""));
    filters.insert(
        "dateRange".into(),
        FilterValue::DateRange(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        ),
    );

    let mut table = PaginatedFetch::new(
        move |query| {
            let api = api.clone();
            async move { api.get_process_instances(&query).await }
        },
        filters,
        utc_options(),
    );
    table.fetch_data().await?;

    assert_eq!(table.data_source.len(), 1);
    assert_eq!(table.data_source[0].process_instance_id, "p-1");
    assert_eq!(table.pagination.total, 31);
    assert!(!table.loading);
    Ok(())
}

#[tokio::test]
async fn server_error_clears_rows_and_notifies_once() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/pending"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(
            json!([{ "camundaTaskId": "t-1" }, { "camundaTaskId": "t-2" }]),
            12,
        )))
        .mount(&console.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/pending"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })))
        .mount(&console.server)
        .await;
    console.login_as(common::user(false)).await?;

    let mut table = console.ctx.paginated(
        |api, query| async move { api.get_pending_tasks(&query).await },
        Filters::new(),
    );
    console.ctx.fetch_page(&mut table).await?;
    assert_eq!(table.data_source.len(), 2);
    assert_eq!(console.errors(), 0);

    let err = table
        .handle_table_change(TableChange {
            current: 2,
            page_size: 10,
            sort_field: None,
            sort_order: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Server(_)));
    assert!(table.data_source.is_empty());
    assert_eq!(table.pagination.total, 0);
    assert!(!table.loading);
    assert_eq!(console.errors(), 1);
    assert_eq!(console.notifier.notices()[0].message, "Internal server error: database down");
    Ok(())
}

#[tokio::test]
async fn table_change_sorts_and_search_resets_page() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(json!([]), 0)))
        .mount(&console.server)
        .await;
    console.login_as(common::user(false)).await?;

    let mut table = console.ctx.paginated(
        |api, query| async move { api.get_forms(&query).await },
        Filters::new(),
    );

    table
        .handle_table_change(TableChange {
            current: 3,
            page_size: 25,
            sort_field: Some("name".into()),
            sort_order: Some(SortOrder::Ascend),
        })
        .await?;
    let query = table.build_query();
    assert_eq!(query.get("page"), Some("2"));
    assert_eq!(query.get("size"), Some("25"));
    assert_eq!(query.get("sort"), Some("name,asc"));

    table.set_filter("name", "leave");
    table.handle_search().await?;
    assert_eq!(table.pagination.current, 1);
    assert_eq!(table.build_query().get("name"), Some("leave"));

    let requests = console.server.received_requests().await.unwrap_or_default();
    let last = requests.last().map(|r| r.url.query().unwrap_or_default().to_string());
    assert!(last.unwrap_or_default().contains("name=leave"));
    Ok(())
}
