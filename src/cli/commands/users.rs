use clap::Subcommand;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::paginated::Filters;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List users")]
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Enable a user account")]
    Enable {
        #[arg(help = "User ID")]
        id: String,
    },

    #[command(about = "Disable a user account")]
    Disable {
        #[arg(help = "User ID")]
        id: String,
    },

    #[command(about = "Reset a user's password to the server default")]
    ResetPassword {
        #[arg(help = "User ID")]
        id: String,
    },
}

pub async fn handle(cmd: UserCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    enter(ctx, "/admin/users").await?;

    match cmd {
        UserCommands::List { list } => {
            let mut table = ctx.paginated(
                |api, query| async move { api.get_all_users(&query).await },
                Filters::new(),
            );
            fetch_table(ctx, &mut table, &list).await?;

            output_page(
                &output_format,
                "users",
                &table,
                &format!("{:<16} {:<20} {:<24} {:<10} {}", "ID", "NAME", "DEPARTMENT", "STATUS", "EMAIL"),
                |user| {
                    format!(
                        "{:<16} {:<20} {:<24} {:<10} {}",
                        user.id,
                        user.name,
                        or_dash(user.department_name.as_deref()),
                        or_dash(user.status.as_deref()),
                        or_dash(user.email.as_deref())
                    )
                },
            )
        }
        UserCommands::Enable { id } => {
            let target = id.clone();
            ctx.call(move |api| async move { api.enable_user(&target).await }).await?;
            output_success(&output_format, &format!("User '{}' enabled", id), Some(json!({ "id": id })))
        }
        UserCommands::Disable { id } => {
            let target = id.clone();
            ctx.call(move |api| async move { api.disable_user(&target).await }).await?;
            output_success(&output_format, &format!("User '{}' disabled", id), Some(json!({ "id": id })))
        }
        UserCommands::ResetPassword { id } => {
            let target = id.clone();
            let result = ctx
                .call(move |api| async move { api.reset_password(&target).await })
                .await?;
            output_success(
                &output_format,
                &format!("Password of user '{}' reset", id),
                Some(json!({ "id": id, "result": result })),
            )
        }
    }
}
