use clap::Subcommand;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::MenuNode;

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "Show the authorized menu tree")]
    Tree {
        #[arg(long, help = "Fetch the tree from the server instead of the saved copy")]
        refresh: bool,
    },

    #[command(about = "List every route, static and menu-derived")]
    Routes {
        #[arg(long, help = "Only show routes derived from menus")]
        dynamic: bool,
    },
}

pub async fn handle(cmd: MenuCommands, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MenuCommands::Tree { refresh } => {
            if !ctx.session().is_authenticated() {
                return Err(anyhow::anyhow!("Not logged in. Run 'wfadmin auth login <user-id>' first"));
            }
            if refresh {
                ctx.fetch_and_set_menus().await?;
            }

            let menus = ctx.session().menus();
            if menus.is_empty() {
                return output_empty_collection(&output_format, "menus", "No menus available");
            }

            match output_format {
                OutputFormat::Json => output_value(&json!({ "menus": menus })),
                OutputFormat::Text => {
                    for menu in menus {
                        print_menu(menu, 0);
                    }
                    Ok(())
                }
            }
        }
        MenuCommands::Routes { dynamic } => {
            if ctx.session().is_authenticated() {
                ctx.fetch_and_set_menus().await?;
            }

            let table = ctx.router().table();
            let routes: Vec<_> = table
                .routes()
                .iter()
                .filter(|r| !dynamic || r.meta.dynamic)
                .collect();

            if routes.is_empty() {
                return output_empty_collection(&output_format, "routes", "No routes registered");
            }

            match output_format {
                OutputFormat::Json => output_value(&json!({ "routes": routes })),
                OutputFormat::Text => {
                    println!("{:<28} {:<30} {:<18} {:<6} {}", "NAME", "PATH", "VIEW", "FORM", "TITLE");
                    println!("{}", "-".repeat(100));
                    for route in routes {
                        let marker = if route.meta.requires_admin { "*" } else { " " };
                        println!(
                            "{}{:<27} {:<30} {:<18} {:<6} {}",
                            marker,
                            route.name,
                            route.path,
                            format!("{:?}", route.view),
                            route.meta.form_id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                            route.meta.title.as_deref().unwrap_or("-"),
                        );
                    }
                    println!("\n* admin only");
                    Ok(())
                }
            }
        }
    }
}

fn print_menu(menu: &MenuNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let form = menu
        .form_definition_id
        .map(|id| format!(" [form {}]", id))
        .unwrap_or_default();
    println!(
        "{}{} ({:?}) {}{}",
        indent,
        menu.name,
        menu.menu_type,
        menu.route_path().unwrap_or("-"),
        form
    );
    for child in &menu.children {
        print_menu(child, depth + 1);
    }
}
