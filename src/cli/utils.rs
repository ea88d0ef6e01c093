use anyhow::anyhow;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::{AppContext, AppError};
use crate::cli::OutputFormat;
use crate::error::ApiError;
use crate::paginated::{FilterValue, Filters, PaginatedFetch, SortOrder, TableChange};
use crate::router::{Navigation, HOME_ROUTE, LOGIN_ROUTE, PROFILE_ROUTE};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(object), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Pretty JSON in both formats; used for free-form payloads
pub fn output_value(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output one page of a table; `row` renders a text line per item
pub fn output_page<T: Serialize>(
    output_format: &OutputFormat,
    collection_name: &str,
    table: &PaginatedFetch<T>,
    header: &str,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if table.data_source.is_empty() {
        return output_empty_collection(
            output_format,
            collection_name,
            &format!("No {} found", collection_name.replace('_', " ")),
        );
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: table.data_source,
                "pagination": table.pagination,
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", header);
            println!("{}", "-".repeat(header.len().max(40)));
            for item in &table.data_source {
                println!("{}", row(item));
            }
            let pages = table.pagination.total.div_ceil(u64::from(table.pagination.page_size.max(1)));
            println!(
                "\nPage {} of {} ({} total)",
                table.pagination.current,
                pages.max(1),
                table.pagination.total
            );
        }
    }
    Ok(())
}

/// Pager, sort and filter flags shared by every list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
    pub page: u32,

    #[arg(long, help = "Rows per page")]
    pub size: Option<u32>,

    #[arg(long, help = "Sort as field or field,asc|desc")]
    pub sort: Option<String>,

    #[arg(
        long = "filter",
        value_name = "KEY=VALUE",
        help = "Filter, repeatable. Date ranges as KEY=YYYY-MM-DD..YYYY-MM-DD"
    )]
    pub filters: Vec<String>,
}

impl ListArgs {
    pub fn table_change(&self, default_page_size: u32) -> TableChange {
        let (sort_field, sort_order) = match self.sort.as_deref().map(str::trim) {
            Some(spec) if !spec.is_empty() => {
                let (field, order) = spec.split_once(',').unwrap_or((spec, "desc"));
                let order = if order.trim().eq_ignore_ascii_case("asc") {
                    SortOrder::Ascend
                } else {
                    SortOrder::Descend
                };
                (Some(field.trim().to_string()), Some(order))
            }
            _ => (None, None),
        };

        TableChange {
            current: self.page.max(1),
            page_size: self.size.unwrap_or(default_page_size),
            sort_field,
            sort_order,
        }
    }

    pub fn parsed_filters(&self) -> anyhow::Result<Filters> {
        parse_filters(&self.filters)
    }
}

pub fn parse_filters(raw: &[String]) -> anyhow::Result<Filters> {
    let mut filters = Filters::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid filter '{}', expected KEY=VALUE", entry))?;
        filters.insert(key.trim().to_string(), parse_filter_value(value.trim())?);
    }
    Ok(filters)
}

fn parse_filter_value(value: &str) -> anyhow::Result<FilterValue> {
    if let Some((start, end)) = value.split_once("..") {
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")?;
        return Ok(FilterValue::DateRange(start, end));
    }
    if value.contains(',') {
        return Ok(FilterValue::List(
            value.split(',').map(|v| v.trim().to_string()).collect(),
        ));
    }
    Ok(FilterValue::Text(value.to_string()))
}

/// Apply the list flags to `table`, fetch it and settle the session
pub async fn fetch_table<T: Send + 'static>(
    ctx: &mut AppContext,
    table: &mut PaginatedFetch<T>,
    args: &ListArgs,
) -> anyhow::Result<()> {
    for (key, value) in args.parsed_filters()? {
        table.filters.insert(key, value);
    }
    let change = args.table_change(ctx.config().ui.page_size);
    let result = table.handle_table_change(change).await;
    ctx.settle_session();
    Ok(result?)
}

/// Navigate to `path` and fail unless the guard let us through
pub async fn enter(ctx: &mut AppContext, path: &str) -> anyhow::Result<Navigation> {
    let navigation = ctx.navigate(path).await?;
    if !navigation.redirected() {
        return Ok(navigation);
    }

    match navigation.route.as_str() {
        LOGIN_ROUTE => Err(anyhow!("Not logged in. Run 'wfadmin auth login <user-id>' first")),
        PROFILE_ROUTE => Err(anyhow!(
            "Password change required. Run 'wfadmin auth passwd' first"
        )),
        HOME_ROUTE => Err(anyhow!("Permission denied for '{}'", path)),
        other => Err(anyhow!("Navigation to '{}' ended on '{}'", path, other)),
    }
}

/// Whether the HTTP layer has already shown this error to the user
pub fn already_reported(error: &anyhow::Error) -> bool {
    let api_error = error
        .downcast_ref::<ApiError>()
        .or_else(|| error.downcast_ref::<AppError>().and_then(AppError::api_error));

    api_error.map(ApiError::is_user_visible).unwrap_or(false)
}

/// Read one line from stdin after printing `prompt`
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    use std::io::Write;

    eprint!("{}", prompt);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_kinds() {
        let filters = parse_filters(&[
            "status=OPEN".to_string(),
            "dateRange=2024-03-01..2024-03-31".to_string(),
            "ids=1,2,3".to_string(),
        ])
        .unwrap();

        assert_eq!(filters["status"], FilterValue::Text("OPEN".into()));
        assert!(matches!(filters["dateRange"], FilterValue::DateRange(_, _)));
        assert_eq!(
            filters["ids"],
            FilterValue::List(vec!["1".into(), "2".into(), "3".into()])
        );
        assert!(parse_filters(&["oops".to_string()]).is_err());
    }

    #[test]
    fn builds_table_change_from_flags() {
        let args = ListArgs {
            page: 3,
            size: None,
            sort: Some("createdAt,asc".into()),
            filters: Vec::new(),
        };
        let change = args.table_change(20);

        assert_eq!(change.current, 3);
        assert_eq!(change.page_size, 20);
        assert_eq!(change.sort_field.as_deref(), Some("createdAt"));
        assert_eq!(change.sort_order, Some(SortOrder::Ascend));

        let defaults = ListArgs::default().table_change(10);
        assert_eq!(defaults.current, 1);
        assert!(defaults.sort_field.is_none());
    }

    #[test]
    fn reported_errors_are_not_repeated() {
        let shown: anyhow::Error = AppError::Api(ApiError::NotFound("x".into())).into();
        assert!(already_reported(&shown));

        let silent: anyhow::Error = ApiError::PasswordChangeRequired {
            message: "change".into(),
            body: Value::Null,
        }
        .into();
        assert!(!already_reported(&silent));
        assert!(!already_reported(&anyhow!("plain")));
    }
}
