//! Collection listing with filters and sorting.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use archive_core::error::AppError;
use archive_core::types::SortDirection;
use archive_entity::{Document, DocumentCollection, LocationTier};
use archive_service::{
    ColumnSort, FilterCriteria, LocationFilter, ServiceContext, SortColumn, ViewService,
};

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection: institute, customer, destructible or retrieved
    pub collection: DocumentCollection,
    /// Substring of the description (case-sensitive)
    #[arg(long)]
    pub content: Option<String>,
    /// Document type title; repeat to match any of several
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Tier of the location filter
    #[arg(long, requires = "location")]
    pub location_tier: Option<LocationTier>,
    /// Exact location title at the chosen tier
    #[arg(long, requires = "location_tier")]
    pub location: Option<String>,
    /// Substring of the customer name (customer collection only)
    #[arg(long)]
    pub customer: Option<String>,
    /// Date column value (destruction date for destructible, entry date otherwise)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Column to sort by: docket, content, type, building..folder, date, customer
    #[arg(long)]
    pub sort: Option<SortColumn>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(content) = &self.content {
            criteria = criteria.with_content(content);
        }
        for title in &self.types {
            criteria = criteria.with_type(title);
        }
        if let (Some(tier), Some(title)) = (self.location_tier, &self.location) {
            criteria = criteria.with_location(LocationFilter::new(tier, title));
        }
        if let Some(customer) = &self.customer {
            criteria = criteria.with_customer(customer);
        }
        if let Some(date) = self.date {
            criteria = criteria.with_date(date);
        }
        criteria
    }

    fn column_sort(&self) -> ColumnSort {
        match self.sort {
            Some(column) => {
                let direction = if self.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                ColumnSort::new(column, direction)
            }
            None => ColumnSort::default(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Docket")]
    docket: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    document_type: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl DocumentRow {
    fn new(document: &Document, collection: DocumentCollection) -> Self {
        let location = LocationTier::ALL
            .into_iter()
            .filter_map(|tier| document.placement.get(tier))
            .map(|l| l.title.as_str())
            .collect::<Vec<_>>()
            .join(" / ");

        Self {
            id: document.id.get(),
            docket: document.docket.clone(),
            customer: document.customer_name().to_string(),
            description: document.description.clone(),
            document_type: document.document_type.title.clone(),
            location,
            date: output::or_dash(collection.date_of(document)),
        }
    }
}

/// Load a collection, apply the filters and sort, and print the rows.
pub async fn execute(
    args: &ListArgs,
    ctx: ServiceContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut view = ViewService::new(ctx).load(args.collection).await?;
    view.set_criteria(args.criteria());
    view.set_sort(args.column_sort());

    if let Some(message) = view.message() {
        println!("{}", message);
        return Ok(());
    }

    let collection = view.collection();
    let rows: Vec<DocumentRow> = view
        .visible()
        .iter()
        .map(|d| DocumentRow::new(d, collection))
        .collect();

    if format == OutputFormat::Table {
        println!(
            "{} ({} of {})",
            collection.title(),
            rows.len(),
            view.documents().len()
        );
    }
    output::print_list(&rows, format, "No documents match the filter.");
    Ok(())
}
