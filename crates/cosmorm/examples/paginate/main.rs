//! Example walking a result set page by page, plus a count query.
//!
//! Run with:
//!   cargo run --example paginate -p cosmorm
//!
//! Records live in a `MemoryLauncher`; swap in a launcher backed by a real
//! store to run the same criteria against it.

use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use cosmorm::prelude::*;
use cosmorm::{InstrumentedLauncher, LauncherConfig, MemoryLauncher};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Customer {
    id: String,
    name: String,
    country: String,
    lifetime_value: u32,
}

#[derive(Debug)]
struct CustomerRow {
    id: String,
    label: String,
    lifetime_value: u32,
}

impl From<Customer> for CustomerRow {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            label: format!("{} ({})", c.name, c.country),
            lifetime_value: c.lifetime_value,
        }
    }
}

#[derive(Default)]
struct CustomerCriteria(CriteriaBuilder);

impl DocumentCriteria for CustomerCriteria {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        &mut self.0
    }

    fn criteria_ref(&self) -> &CriteriaBuilder {
        &self.0
    }

    fn into_criteria(self) -> CriteriaBuilder {
        self.0
    }
}

criteria_columns! {
    CustomerCriteria {
        country => "country",
        lifetime_value => "lifetimeValue",
        name => "name",
        [tag_names] => "tags.name",
    }
}

// ============================================
// Helper functions
// ============================================

fn print_header(title: &str) {
    println!();
    println!("{}", format!("=== {title} ===").bold().cyan());
}

fn page_table(rows: &[CustomerRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold).fg(Color::Cyan),
            Cell::new("Customer").add_attribute(Attribute::Bold).fg(Color::Cyan),
            Cell::new("Lifetime value")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
        ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.id).fg(Color::Yellow),
            Cell::new(&row.label).fg(Color::White),
            Cell::new(row.lifetime_value.to_string()).fg(Color::Magenta),
        ]);
    }

    table
}

fn seed() -> MemoryLauncher {
    let countries = ["ES", "FR", "PT"];
    let customers = (0..23).map(|i| {
        json!({
            "id": format!("cust-{i:02}"),
            "name": format!("Customer {i}"),
            "country": countries[i % countries.len()],
            "lifetimeValue": 100 * i,
        })
    });
    MemoryLauncher::new()
        .with_container("customers", customers)
        .with_container("customers-count", [json!({ "id": "null", "totalCount": 23 })])
}

#[tokio::main]
async fn main() -> OrmResult<()> {
    let launcher = InstrumentedLauncher::new(seed()).with_config(
        LauncherConfig::new()
            .with_query_timeout(Duration::from_secs(5))
            .with_slow_query_threshold(Duration::from_millis(250)),
    );
    let repo = CriteriaRepository::new(launcher);
    let container = ContainerInfo::<Customer>::new("customers");

    // ============================================
    // Build the criteria
    // ============================================
    print_header("Criteria");

    let mut customers = CustomerCriteria::default();
    customers
        .country(Op::Contains, ["ES", "FR", "PT"])
        .lifetime_value(Op::MoreOrEqualsThan, [0]);
    customers.or_start()?;
    customers
        .name(Op::Like, ["customer"])
        .tag_names(Op::Equals, None::<&str>);
    customers.or_end()?;
    customers.order_by("lifetimeValue", Order::Desc);
    let criteria = customers.build()?;
    println!("{}", criteria.query_text().dimmed());

    // ============================================
    // Walk the pages
    // ============================================
    let page_size = 10;
    for desired_page in 0.. {
        let page = repo
            .find_paginated(&criteria, desired_page, page_size, &container, CustomerRow::from)
            .await?;

        print_header(&format!("Page {desired_page}"));
        println!("{}", page_table(&page.data));
        println!(
            "total: {}  has next page: {}",
            page.total_result.to_string().green(),
            if page.has_next_page {
                "yes".green()
            } else {
                "no".red()
            }
        );

        if !page.has_next_page {
            break;
        }
    }

    // Out of range pages come back empty.
    let beyond = repo
        .find_paginated(&criteria, 99, page_size, &container, CustomerRow::from)
        .await?;
    println!("page 99: {} records", beyond.data.len());

    // ============================================
    // Count query
    // ============================================
    print_header("Count");

    let mut count = CustomerCriteria::default();
    count.select_count().country(Op::Contains, ["ES", "FR", "PT"]);
    let count = count.build()?;
    println!("{}", count.query_text().dimmed());

    let response = repo.count(&count, "customers-count").await?;
    println!("totalCount: {}", response.total_count.to_string().green());

    if let Err(err) = repo.count(&criteria, "customers-count").await {
        println!("{} {err}", "expected error:".yellow());
    }

    Ok(())
}
