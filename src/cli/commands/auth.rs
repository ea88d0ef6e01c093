use clap::Subcommand;
use serde_json::json;

use crate::app::{AppContext, AppError};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::error::ApiError;
use crate::models::Credentials;
use crate::router::PROFILE_ROUTE;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the engine")]
    Login {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear the saved session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user profile")]
    Whoami,

    #[command(about = "Change password")]
    Passwd {
        #[arg(long, help = "Current password (will prompt if not provided)")]
        old: Option<String>,
        #[arg(long, help = "New password (will prompt if not provided)")]
        new: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { user_id, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_line("Password: ")?,
            };
            let credentials = Credentials { user_id, password };

            let navigation = match ctx.login(&credentials).await {
                Ok(navigation) => navigation,
                Err(AppError::Api(ApiError::PasswordChangeRequired { message, .. })) => {
                    output_error(&output_format, &message, Some("PASSWORD_CHANGE_REQUIRED"))?;
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let user = ctx.session().user().cloned();
            let name = user.as_ref().map(|u| u.name.as_str()).unwrap_or_default();
            let message = if navigation.route == PROFILE_ROUTE {
                format!("Logged in as {}. Change your password with 'wfadmin auth passwd'", name)
            } else {
                format!("Logged in as {}", name)
            };

            output_success(
                &output_format,
                &message,
                Some(json!({
                    "user": user,
                    "landing": navigation,
                    "menus": ctx.session().menus().len(),
                })),
            )
        }
        AuthCommands::Logout => {
            ctx.logout();
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = ctx.session();
            let user = session.user();

            match output_format {
                OutputFormat::Json => output_value(&json!({
                    "state": session.state(),
                    "server": ctx.config().api.base_url,
                    "user": user,
                    "admin": ctx.is_admin(),
                    "menus": session.menus().len(),
                })),
                OutputFormat::Text => {
                    println!("Server: {}", ctx.config().api.base_url);
                    match user {
                        Some(user) if session.is_authenticated() => {
                            println!("Logged in as: {} ({})", user.name, user.id);
                            println!("Role: {}", or_dash(user.role.as_deref()));
                            println!("Admin: {}", if ctx.is_admin() { "yes" } else { "no" });
                            if session.must_change_password() {
                                println!("Password change required");
                            }
                            println!("Menus: {}", session.menus().len());
                        }
                        _ => println!("Not logged in"),
                    }
                    Ok(())
                }
            }
        }
        AuthCommands::Whoami => {
            enter(ctx, "/profile").await?;
            let profile = ctx.call(|api| async move { api.get_my_profile().await }).await?;
            let user = ctx.session().user();

            match output_format {
                OutputFormat::Json => output_value(&json!({ "user": user, "profile": profile })),
                OutputFormat::Text => {
                    if let Some(user) = user {
                        println!("ID: {}", user.id);
                        println!("Name: {}", user.name);
                        println!("Department: {}", or_dash(user.department_name.as_deref()));
                    }
                    println!("Email: {}", or_dash(profile.email.as_deref()));
                    println!("Phone: {}", or_dash(profile.phone_number.as_deref()));
                    Ok(())
                }
            }
        }
        AuthCommands::Passwd { old, new } => {
            enter(ctx, "/profile").await?;
            let old = match old {
                Some(old) => old,
                None => prompt_line("Current password: ")?,
            };
            let new = match new {
                Some(new) => new,
                None => prompt_line("New password: ")?,
            };

            ctx.change_password(&old, &new).await?;
            output_success(&output_format, "Password changed", None)
        }
    }
}
