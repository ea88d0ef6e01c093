use clap::Subcommand;

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::paginated::Filters;

#[derive(Subcommand)]
pub enum FormCommands {
    #[command(about = "List form definitions")]
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Show a form definition")]
    Show {
        #[arg(help = "Form ID")]
        id: i64,
    },

    #[command(about = "List submissions of a form")]
    Submissions {
        #[arg(help = "Form ID")]
        form_id: i64,
        #[command(flatten)]
        list: ListArgs,
    },
}

pub async fn handle(cmd: FormCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FormCommands::List { list } => {
            enter(ctx, "/").await?;
            let mut table = ctx.paginated(
                |api, query| async move { api.get_forms(&query).await },
                Filters::new(),
            );
            fetch_table(ctx, &mut table, &list).await?;

            output_page(
                &output_format,
                "forms",
                &table,
                &format!("{:<8} {:<40} {}", "ID", "NAME", "UPDATED"),
                |form| {
                    format!(
                        "{:<8} {:<40} {}",
                        form.id,
                        form.name,
                        or_dash(form.updated_at.as_deref().or(form.created_at.as_deref()))
                    )
                },
            )
        }
        FormCommands::Show { id } => {
            enter(ctx, &format!("/form/viewer/{}", id)).await?;
            let form = ctx.call(|api| async move { api.get_form_by_id(id).await }).await?;

            match output_format {
                OutputFormat::Json => output_value(&form),
                OutputFormat::Text => {
                    println!("ID: {}", form.id);
                    println!("Name: {}", form.name);
                    println!("Created: {}", or_dash(form.created_at.as_deref()));
                    println!("Updated: {}", or_dash(form.updated_at.as_deref()));
                    if !form.filterable_fields.is_empty() {
                        let labels: Vec<&str> = form.filterable_fields.iter().map(|f| f.label.as_str()).collect();
                        println!("Filterable: {}", labels.join(", "));
                    }
                    if !form.list_display_fields.is_empty() {
                        let labels: Vec<&str> = form.list_display_fields.iter().map(|f| f.label.as_str()).collect();
                        println!("Columns: {}", labels.join(", "));
                    }
                    Ok(())
                }
            }
        }
        FormCommands::Submissions { form_id, list } => {
            enter(ctx, &format!("/form/submissions/{}", form_id)).await?;
            let mut table = ctx.paginated(
                move |api, query| async move { api.get_submissions(form_id, &query).await },
                Filters::new(),
            );
            fetch_table(ctx, &mut table, &list).await?;

            output_page(
                &output_format,
                "submissions",
                &table,
                &format!("{:<8} {:<20} {:<14} {}", "ID", "SUBMITTER", "STATUS", "CREATED"),
                |submission| {
                    format!(
                        "{:<8} {:<20} {:<14} {}",
                        submission.id,
                        or_dash(submission.submitter_name.as_deref()),
                        or_dash(submission.workflow_status.as_deref()),
                        or_dash(submission.created_at.as_deref())
                    )
                },
            )
        }
    }
}
