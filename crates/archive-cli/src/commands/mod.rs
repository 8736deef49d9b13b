//! CLI command definitions and dispatch.

pub mod dashboard;
pub mod document;
pub mod list;
pub mod reference;

use clap::{Parser, Subcommand};
use tracing::debug;

use archive_core::config::AppConfig;
use archive_core::error::AppError;
use archive_service::ServiceContext;

use crate::output::OutputFormat;

/// Records archive: archived paper documents, their storage locations and
/// retention periods
#[derive(Debug, Parser)]
#[command(name = "archive", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from the config directory (`<env>.toml`)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count destructible and handed-out documents
    Dashboard,
    /// List the documents of a collection
    List(list::ListArgs),
    /// Show a single document
    Show(document::ShowArgs),
    /// Archive a new document
    Create(document::CreateArgs),
    /// Edit an archived document
    Update(document::UpdateArgs),
    /// Hand a document out to a colleague
    HandOut(document::HandOutArgs),
    /// Return a handed-out document
    CheckIn(document::CheckInArgs),
    /// Delete a document whose destruction date has passed
    Destroy(document::DestroyArgs),
    /// Print the storage location tree
    Locations,
    /// List document types and their storage periods
    Types,
    /// List site users
    Users(reference::UsersArgs),
    /// List sensitivity terms
    Sensitivities,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let ctx = ServiceContext::from_config(config)?;
        debug!(provider = %config.backend.provider, command = ?self.command, "Running command");
        let format = self.format;

        match &self.command {
            Commands::Dashboard => dashboard::execute(ctx, format).await,
            Commands::List(args) => list::execute(args, ctx, format).await,
            Commands::Show(args) => document::show(args, ctx, format).await,
            Commands::Create(args) => document::create(args, ctx, format).await,
            Commands::Update(args) => document::update(args, ctx, format).await,
            Commands::HandOut(args) => document::hand_out(args, ctx).await,
            Commands::CheckIn(args) => document::check_in(args, ctx).await,
            Commands::Destroy(args) => document::destroy(args, ctx).await,
            Commands::Locations => reference::locations(ctx, format).await,
            Commands::Types => reference::types(ctx, format).await,
            Commands::Users(args) => reference::users(args, ctx, format).await,
            Commands::Sensitivities => reference::sensitivities(ctx, format).await,
        }
    }
}
