use clap::Subcommand;
use serde_json::{json, Value};

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum SettingsCommands {
    #[command(about = "Show system settings")]
    Show {
        #[arg(long, help = "Show the full admin settings instead of the public ones")]
        admin: bool,
    },

    #[command(about = "Update system settings")]
    Set {
        #[arg(value_name = "KEY=VALUE", required = true, help = "Settings to change")]
        pairs: Vec<String>,
    },
}

pub async fn handle(cmd: SettingsCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SettingsCommands::Show { admin } => {
            let settings = if admin {
                enter(ctx, "/admin/settings").await?;
                ctx.admin_settings().await
            } else {
                ctx.refresh_public_settings().await;
                ctx.system().settings().clone()
            };

            if settings.is_empty() {
                return output_empty_collection(&output_format, "settings", "No settings available");
            }

            match output_format {
                OutputFormat::Json => output_value(&json!({
                    "settings": settings,
                    "icon": ctx.system().icon().map(|icon| json!({
                        "filename": icon.filename,
                        "content_type": icon.content_type,
                        "bytes": icon.bytes.len(),
                    })),
                })),
                OutputFormat::Text => {
                    for (key, value) in &settings {
                        println!("{:<32} {}", key, display_value(value));
                    }
                    if let Some(icon) = ctx.system().icon() {
                        println!(
                            "\nIcon: {} ({} bytes)",
                            icon.filename.as_deref().unwrap_or("-"),
                            icon.bytes.len()
                        );
                    }
                    Ok(())
                }
            }
        }
        SettingsCommands::Set { pairs } => {
            enter(ctx, "/admin/settings").await?;

            let mut settings = ctx.load_admin_settings().await?;
            for pair in &pairs {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("Invalid setting '{}', expected KEY=VALUE", pair))?;
                settings.insert(key.trim().to_string(), Value::String(value.to_string()));
            }

            ctx.save_settings(&settings).await?;
            output_success(
                &output_format,
                &format!("Updated {} setting(s)", pairs.len()),
                Some(json!({ "settings": settings })),
            )
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
