use anyhow::{Context, Result};
use common::format::{
    format_count, format_count_delta, format_money, format_money_delta, format_money_f64,
    format_percent, format_percent_delta,
};
use common::{DashboardView, FilterSelection, ProductRank};
use std::fmt::Write;
use tracing::{debug, info, trace};

use crate::config::Settings;

pub fn summary(
    settings: &Settings,
    year: Option<i32>,
    month: Option<u32>,
    countries: Vec<String>,
) -> Result<()> {
    trace!("Entering summary function");

    let records = model::load_csv(&settings.data_path)?;
    info!("Loaded {} records from {}", records.len(), settings.data_path.display());

    let defaults = compute::default_selection(&records).context("The data file has no records")?;
    let selection = FilterSelection::new(
        year.unwrap_or(defaults.year),
        month.unwrap_or(defaults.month),
        countries,
    );
    debug!(?selection, "Computing summary");

    let view = compute::compute_dashboard(&records, &selection)?;
    print!("{}", render_summary(&view, &settings.currency_prefix));

    Ok(())
}

/// Plain-text rendering of the metric cards and product tables.
pub fn render_summary(view: &DashboardView, prefix: &str) -> String {
    let period = &view.period;
    let current = &period.current;
    let variances = &period.variances;
    let countries = if view.selection.countries.is_empty() {
        "all countries".to_string()
    } else {
        view.selection.countries.join(", ")
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}-{:02} vs {}-{:02} ({})",
        view.selection.year, period.current_month, view.selection.year, period.comparison_month, countries
    );
    for notice in &view.notices {
        let _ = writeln!(out, "! {}", notice.message());
    }
    let _ = writeln!(out);

    let cards = [
        ("Quantity", format_count(current.quantity), format_count_delta(variances.quantity)),
        ("Orders", format_count(current.orders), format_count_delta(variances.orders)),
        ("Revenue", format_money(current.revenue, prefix), format_money_delta(variances.revenue)),
        ("Profit", format_money(current.profit, prefix), format_money_delta(variances.profit)),
        (
            "Profit ratio",
            format_percent(current.profit_ratio),
            format_percent_delta(variances.profit_ratio),
        ),
    ];
    for (label, value, delta) in cards {
        let _ = writeln!(out, "{:<14}{:>16}{:>14}", label, value, delta);
    }

    write_products(&mut out, "Top products", &view.top_products, prefix);
    write_products(&mut out, "Bottom products", &view.bottom_products, prefix);
    out
}

fn write_products(out: &mut String, title: &str, products: &[ProductRank], prefix: &str) {
    let _ = writeln!(out, "\n{}", title);
    if products.is_empty() {
        let _ = writeln!(out, "  (no sales)");
        return;
    }
    for (rank, product) in products.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<20} {:<30} {:>8} {:>16}",
            rank + 1,
            product.category,
            product.product,
            format_count(product.orders),
            format_money_f64(product.revenue, prefix)
        );
    }
}
