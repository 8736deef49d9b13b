//! Dashboard command.

use archive_core::error::AppError;
use archive_service::{ServiceContext, ViewService};

use crate::output::{self, OutputFormat};

/// Print the destructible and handed-out counts.
pub async fn execute(ctx: ServiceContext, format: OutputFormat) -> Result<(), AppError> {
    let dashboard = ViewService::new(ctx).dashboard().await?;

    match format {
        OutputFormat::Json => output::print_json(&dashboard),
        OutputFormat::Table => {
            println!("Archive dashboard");
            output::print_kv("Destructible", &dashboard.destructible.to_string());
            output::print_kv("Handed out", &dashboard.handed_out.to_string());
        }
    }
    Ok(())
}
