use clap::Subcommand;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum NotificationCommands {
    #[command(about = "List notifications")]
    List {
        #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
        page: u32,
        #[arg(long, default_value_t = 10, help = "Rows per page")]
        size: u32,
    },

    #[command(about = "Show the unread count")]
    Unread,

    #[command(about = "Mark one notification as read")]
    Read {
        #[arg(help = "Notification ID")]
        id: i64,
    },

    #[command(about = "Mark every notification as read")]
    ReadAll,
}

pub async fn handle(cmd: NotificationCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    enter(ctx, "/notifications").await?;

    match cmd {
        NotificationCommands::List { page, size } => {
            ctx.load_notifications(page, size).await?;
            let store = ctx.notifications();

            if store.notifications.is_empty() {
                return output_empty_collection(&output_format, "notifications", "No notifications");
            }

            match output_format {
                OutputFormat::Json => output_value(&json!({
                    "notifications": store.notifications,
                    "pagination": store.pagination,
                })),
                OutputFormat::Text => {
                    println!("{:<8} {:<6} {:<22} {}", "ID", "READ", "CREATED", "TITLE");
                    println!("{}", "-".repeat(70));
                    for notification in &store.notifications {
                        println!(
                            "{:<8} {:<6} {:<22} {}",
                            notification.id,
                            if notification.is_read { "yes" } else { "no" },
                            or_dash(notification.created_at.as_deref()),
                            notification.title
                        );
                    }
                    println!("\nPage {} ({} total)", store.pagination.current, store.pagination.total);
                    Ok(())
                }
            }
        }
        NotificationCommands::Unread => {
            let count = ctx.refresh_unread_count().await?;
            match output_format {
                OutputFormat::Json => output_value(&json!({ "unread": count })),
                OutputFormat::Text => {
                    println!("{} unread", count);
                    Ok(())
                }
            }
        }
        NotificationCommands::Read { id } => {
            ctx.mark_notification_read(id).await?;
            let unread = ctx.refresh_unread_count().await?;
            output_success(
                &output_format,
                &format!("Notification {} marked as read", id),
                Some(json!({ "unread": unread })),
            )
        }
        NotificationCommands::ReadAll => {
            ctx.mark_all_notifications_read().await?;
            output_success(
                &output_format,
                "All notifications marked as read",
                Some(json!({ "unread": ctx.notifications().unread_count })),
            )
        }
    }
}
