use clap::Subcommand;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::paginated::Filters;

#[derive(Subcommand)]
pub enum InstanceCommands {
    #[command(about = "List process instances")]
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Suspend a process instance")]
    Suspend {
        #[arg(help = "Process instance ID")]
        id: String,
    },

    #[command(about = "Activate a suspended process instance")]
    Activate {
        #[arg(help = "Process instance ID")]
        id: String,
    },

    #[command(about = "Terminate a process instance")]
    Terminate {
        #[arg(help = "Process instance ID")]
        id: String,
        #[arg(long, help = "Reason recorded with the termination")]
        reason: String,
    },
}

pub async fn handle(cmd: InstanceCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    enter(ctx, "/admin/instances").await?;

    match cmd {
        InstanceCommands::List { list } => {
            let mut table = ctx.paginated(
                |api, query| async move { api.get_process_instances(&query).await },
                Filters::new(),
            );
            fetch_table(ctx, &mut table, &list).await?;

            output_page(
                &output_format,
                "instances",
                &table,
                &format!("{:<38} {:<28} {:<24} {:<10} {}", "INSTANCE", "PROCESS", "ACTIVITY", "STATE", "STARTED"),
                |instance| {
                    format!(
                        "{:<38} {:<28} {:<24} {:<10} {}",
                        instance.process_instance_id,
                        or_dash(instance.process_definition_name.as_deref()),
                        or_dash(instance.current_activity_name.as_deref()),
                        if instance.suspended { "suspended" } else { "active" },
                        or_dash(instance.start_time.as_deref())
                    )
                },
            )
        }
        InstanceCommands::Suspend { id } => {
            let target = id.clone();
            ctx.call(move |api| async move { api.suspend_instance(&target).await }).await?;
            output_success(&output_format, &format!("Instance '{}' suspended", id), Some(json!({ "id": id })))
        }
        InstanceCommands::Activate { id } => {
            let target = id.clone();
            ctx.call(move |api| async move { api.activate_instance(&target).await }).await?;
            output_success(&output_format, &format!("Instance '{}' activated", id), Some(json!({ "id": id })))
        }
        InstanceCommands::Terminate { id, reason } => {
            if reason.trim().is_empty() {
                return Err(anyhow::anyhow!("A termination reason is required"));
            }
            let target = id.clone();
            ctx.call(move |api| async move { api.terminate_instance(&target, &reason).await })
                .await?;
            output_success(&output_format, &format!("Instance '{}' terminated", id), Some(json!({ "id": id })))
        }
    }
}
