use crate::app::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

pub async fn handle(path: &str, ctx: &mut AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let navigation = ctx.navigate(path).await?;

    match output_format {
        OutputFormat::Json => output_value(&navigation),
        OutputFormat::Text => {
            if navigation.redirected() {
                println!("Redirected: {} -> {}", navigation.requested, navigation.path);
            }
            println!("Route: {}", navigation.route);
            println!("View: {:?}", navigation.view);
            println!("Title: {}", navigation.title);
            if let Some(form_id) = navigation.form_id {
                println!("Form: {}", form_id);
            }
            for (name, value) in &navigation.params {
                println!("Param {}: {}", name, value);
            }
            Ok(())
        }
    }
}
