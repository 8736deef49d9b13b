//! Document lifecycle commands.

use chrono::NaiveDate;
use clap::Args;
use uuid::Uuid;

use archive_core::error::AppError;
use archive_core::types::{DocumentId, DocumentTypeId, LocationId, UserId};
use archive_entity::{Document, DocumentKind, LocationTier};
use archive_service::document::HandOutRequest;
use archive_service::{
    DocumentDraft, DocumentService, LocationSelection, ReferenceService, ServiceContext,
    WriteOutcome,
};

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document id
    pub id: DocumentId,
}

/// Editable document fields. Unset flags leave the form value untouched.
#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Customer name (customer documents only)
    #[arg(long)]
    pub customer: Option<String>,
    /// Docket number
    #[arg(long)]
    pub docket: Option<String>,
    /// Description of the content
    #[arg(long)]
    pub description: Option<String>,
    /// Document type id; sets the storage period
    #[arg(long = "type")]
    pub document_type: Option<DocumentTypeId>,
    /// User id of the data controller
    #[arg(long)]
    pub controller: Option<UserId>,
    /// Sensitivity term id
    #[arg(long)]
    pub sensitivity: Option<Uuid>,
    /// Date the document entered the archive
    #[arg(long)]
    pub entry_date: Option<NaiveDate>,
    /// Never schedule destruction (`--indestructible false` to undo)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub indestructible: Option<bool>,
    /// Deepest storage location id; the path above it is filled in
    #[arg(long)]
    pub location: Option<LocationId>,
}

impl FieldArgs {
    /// Apply the given flags to `draft`, resolving ids against reference data.
    async fn apply(
        &self,
        draft: &mut DocumentDraft,
        reference: &ReferenceService,
    ) -> Result<(), AppError> {
        if let Some(customer) = &self.customer {
            draft.customer = Some(customer.clone());
        }
        if let Some(docket) = &self.docket {
            draft.docket = docket.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(id) = self.document_type {
            draft.set_document_type(Some(reference.document_type(id).await?));
        }
        if let Some(id) = self.controller {
            draft.data_controller = Some(reference.user(id).await?.id);
        }
        if let Some(term) = self.sensitivity {
            draft.sensitivity = Some(term);
        }
        if let Some(date) = self.entry_date {
            draft.set_entry_date(Some(date));
        }
        if let Some(indestructible) = self.indestructible {
            draft.set_indestructible(indestructible);
        }
        if let Some(id) = self.location {
            let resolver = reference.location_resolver().await?;
            draft.location = LocationSelection::path_to(&resolver, id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Document kind: institute or customer
    #[arg(long, default_value = "institute")]
    pub kind: DocumentKind,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Document id
    pub id: DocumentId,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Debug, Args)]
pub struct HandOutArgs {
    /// Document id
    pub id: DocumentId,
    /// User id of the recipient
    #[arg(long)]
    pub to: UserId,
    /// Why the document leaves the archive
    #[arg(long)]
    pub reason: String,
    /// Hand-out date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct CheckInArgs {
    /// Document id
    pub id: DocumentId,
}

#[derive(Debug, Args)]
pub struct DestroyArgs {
    /// Document id
    pub id: DocumentId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Print a single document.
pub async fn show(args: &ShowArgs, ctx: ServiceContext, format: OutputFormat) -> Result<(), AppError> {
    let document = DocumentService::new(ctx).get(args.id).await?;

    match format {
        OutputFormat::Json => output::print_json(&document),
        OutputFormat::Table => print_document(&document),
    }
    Ok(())
}

fn print_document(document: &Document) {
    println!("Document {}", document.id);
    output::print_kv("Kind", document.kind.as_str());
    if let Some(customer) = &document.customer {
        output::print_kv("Customer", customer);
    }
    output::print_kv("Docket", &document.docket);
    output::print_kv("Description", &document.description);
    output::print_kv(
        "Type",
        &format!(
            "{} ({} years)",
            document.document_type.title, document.document_type.storage_years
        ),
    );
    output::print_kv("Data controller", &document.data_controller.name);
    output::print_kv(
        "Sensitivity",
        &output::or_dash(document.sensitivity.as_ref().map(|s| s.label.as_str())),
    );
    output::print_kv("Entry date", &document.entry_date.to_string());
    let retention = if document.retention.is_indestructible() {
        "indestructible".to_string()
    } else {
        output::or_dash(document.destruction_date())
    };
    output::print_kv("Destruction date", &retention);
    for tier in LocationTier::ALL {
        if let Some(location) = document.placement.get(tier) {
            output::print_kv(tier.as_str(), &location.title);
        }
    }
    match document.hand_out.details() {
        Some(hand_out) => {
            output::print_kv("Handed out to", &hand_out.recipient.name);
            output::print_kv("Handed out on", &hand_out.date.to_string());
            output::print_kv("Reason", &hand_out.reason);
        }
        None => output::print_kv("Handed out", "no"),
    }
}

fn report_write(outcome: &WriteOutcome, verb: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(outcome),
        OutputFormat::Table => {
            output::print_success(&format!("Document {} {}", outcome.id, verb));
            if !outcome.sensitivity_tagged {
                output::print_warning("The sensitivity could not be tagged; edit the document to retry");
            }
        }
    }
}

/// Archive a new document.
pub async fn create(
    args: &CreateArgs,
    ctx: ServiceContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let reference = ReferenceService::new(ctx.clone());
    let service = DocumentService::new(ctx);

    let mut draft = DocumentDraft::new(args.kind);
    args.fields.apply(&mut draft, &reference).await?;

    let outcome = service.create(&draft).await?;
    report_write(&outcome, "archived", format);
    Ok(())
}

/// Edit an archived document.
pub async fn update(
    args: &UpdateArgs,
    ctx: ServiceContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let reference = ReferenceService::new(ctx.clone());
    let service = DocumentService::new(ctx);

    let mut draft = service.edit_draft(args.id).await?;
    args.fields.apply(&mut draft, &reference).await?;

    let outcome = service.update(args.id, &draft).await?;
    report_write(&outcome, "updated", format);
    Ok(())
}

/// Hand a document out.
pub async fn hand_out(args: &HandOutArgs, ctx: ServiceContext) -> Result<(), AppError> {
    let date = args.date.unwrap_or_else(|| ctx.today());
    let request = HandOutRequest {
        recipient: args.to,
        date,
        reason: args.reason.clone(),
    };
    DocumentService::new(ctx).hand_out(args.id, request).await?;
    output::print_success(&format!("Document {} handed out", args.id));
    Ok(())
}

/// Return a handed-out document.
pub async fn check_in(args: &CheckInArgs, ctx: ServiceContext) -> Result<(), AppError> {
    DocumentService::new(ctx).check_in(args.id).await?;
    output::print_success(&format!("Document {} checked in", args.id));
    Ok(())
}

/// Delete a document after confirmation.
pub async fn destroy(args: &DestroyArgs, ctx: ServiceContext) -> Result<(), AppError> {
    let service = DocumentService::new(ctx);
    let document = service.destroy_candidate(args.id).await?;

    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Destroy document {} '{}' ({})? This cannot be undone.",
                document.docket, document.description, document.document_type.title
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Aborted.");
            return Ok(());
        }
    }

    service.destroy(args.id).await?;
    output::print_success(&format!("Document {} destroyed", args.id));
    Ok(())
}
