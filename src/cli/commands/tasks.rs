use clap::{Subcommand, ValueEnum};
use serde_json::Value;

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::http::encode_segment;
use crate::models::{CompleteTaskRequest, Decision};
use crate::paginated::Filters;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DecisionArg {
    Approve,
    Reject,
}

impl From<DecisionArg> for Decision {
    fn from(value: DecisionArg) -> Self {
        match value {
            DecisionArg::Approve => Decision::Approved,
            DecisionArg::Reject => Decision::Rejected,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    #[command(about = "List tasks waiting for me")]
    Pending {
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "List tasks I have handled")]
    Completed {
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Approve or reject a task")]
    Complete {
        #[arg(help = "Task ID")]
        task_id: String,
        #[arg(long, value_enum, help = "Decision")]
        decision: DecisionArg,
        #[arg(long, help = "Approval comment")]
        comment: Option<String>,
        #[arg(long, help = "Updated form data as a JSON object")]
        data: Option<String>,
    },
}

pub async fn handle(cmd: TaskCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TaskCommands::Pending { list } => {
            enter(ctx, "/tasks").await?;
            let mut table = ctx.paginated(
                |api, query| async move { api.get_pending_tasks(&query).await },
                Filters::new(),
            );
            fetch_table(ctx, &mut table, &list).await?;

            output_page(
                &output_format,
                "tasks",
                &table,
                &format!("{:<38} {:<24} {:<24} {}", "TASK", "FORM", "STEP", "SUBMITTER"),
                |task| {
                    format!(
                        "{:<38} {:<24} {:<24} {}",
                        task.camunda_task_id,
                        or_dash(task.form_name.as_deref()),
                        or_dash(task.step_name.as_deref()),
                        or_dash(task.submitter_name.as_deref())
                    )
                },
            )
        }
        TaskCommands::Completed { list } => {
            enter(ctx, "/tasks").await?;
            let mut table = ctx.paginated(
                |api, query| async move { api.get_completed_tasks(&query).await },
                Filters::new(),
            );
            fetch_table(ctx, &mut table, &list).await?;

            output_page(&output_format, "completed_tasks", &table, "TASK", |task| {
                serde_json::to_string(task).unwrap_or_default()
            })
        }
        TaskCommands::Complete { task_id, decision, comment, data } => {
            enter(ctx, &format!("/tasks/{}", encode_segment(&task_id))).await?;

            let updated_form_data = match data {
                Some(raw) => {
                    let parsed: Value = serde_json::from_str(&raw)?;
                    if !parsed.is_object() {
                        return Err(anyhow::anyhow!("--data must be a JSON object"));
                    }
                    Some(parsed.to_string())
                }
                None => None,
            };

            let request = CompleteTaskRequest {
                decision: decision.into(),
                approval_comment: comment,
                updated_form_data,
            };
            let id = task_id.clone();
            let result = ctx
                .call(move |api| async move { api.complete_task(&id, &request).await })
                .await?;

            output_success(
                &output_format,
                &format!("Task '{}' completed", task_id),
                Some(serde_json::json!({ "result": result })),
            )
        }
    }
}
