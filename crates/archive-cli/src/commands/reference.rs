//! Reference data listings.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use archive_core::error::AppError;
use archive_service::{LocationNode, ReferenceService, ServiceContext};

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct UsersArgs {
    /// Only users whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// Maximum number of users to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Tabled)]
struct TypeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Storage years")]
    storage_years: u32,
}

#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Debug, Serialize, Tabled)]
struct TermRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
}

/// Print the location tree, one indented line per location.
pub async fn locations(ctx: ServiceContext, format: OutputFormat) -> Result<(), AppError> {
    let resolver = ReferenceService::new(ctx).location_resolver().await?;
    let tree = resolver.tree();

    match format {
        OutputFormat::Json => output::print_json(&tree),
        OutputFormat::Table => {
            if tree.is_empty() {
                println!("No storage locations defined.");
            }
            let mut lines = Vec::new();
            for node in &tree {
                render_node(node, 0, &mut lines);
            }
            for line in lines {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn render_node(node: &LocationNode, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!(
        "{}{} [{} #{}]",
        "  ".repeat(depth),
        node.location.title,
        node.location.tier,
        node.location.id
    ));
    for child in &node.children {
        render_node(child, depth + 1, lines);
    }
}

/// List document types.
pub async fn types(ctx: ServiceContext, format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<TypeRow> = ReferenceService::new(ctx)
        .document_types()
        .await?
        .into_iter()
        .map(|t| TypeRow {
            id: t.id.get(),
            title: t.title,
            storage_years: t.storage_years,
        })
        .collect();

    output::print_list(&rows, format, "No document types defined.");
    Ok(())
}

/// List users, optionally narrowed by a name search.
pub async fn users(args: &UsersArgs, ctx: ServiceContext, format: OutputFormat) -> Result<(), AppError> {
    let reference = ReferenceService::new(ctx);
    let users = match &args.search {
        Some(query) => reference.search_people(query, &[], args.limit).await?,
        None => {
            let mut users = reference.users().await?;
            if let Some(limit) = args.limit {
                users.truncate(limit);
            }
            users
        }
    };

    let rows: Vec<UserRow> = users
        .into_iter()
        .map(|u| UserRow {
            id: u.id.get(),
            name: u.name,
        })
        .collect();

    output::print_list(&rows, format, "No users found.");
    Ok(())
}

/// List sensitivity terms.
pub async fn sensitivities(ctx: ServiceContext, format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<TermRow> = ReferenceService::new(ctx)
        .sensitivity_terms()
        .await?
        .into_iter()
        .map(|t| TermRow {
            id: t.id.to_string(),
            label: t.label,
        })
        .collect();

    output::print_list(&rows, format, "No sensitivity terms found.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_entity::{LocationTier, StorageLocation};

    #[test]
    fn test_render_node_indents_children() {
        let tree = LocationNode {
            location: StorageLocation::new(1, "Main", None, LocationTier::Building),
            children: vec![LocationNode {
                location: StorageLocation::new(2, "R1", Some(1.into()), LocationTier::Room),
                children: Vec::new(),
            }],
        };

        let mut lines = Vec::new();
        render_node(&tree, 0, &mut lines);
        assert_eq!(lines, vec!["Main [building #1]", "  R1 [room #2]"]);
    }
}
