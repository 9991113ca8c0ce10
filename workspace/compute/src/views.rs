//! Aggregation and ranking views over the working set.
//!
//! Records are projected into a polars `DataFrame` with the columns
//! `month, country, category, product, order_id, total`; every view is a
//! lazy group-by over that frame. Sort keys always end with the group keys
//! so the output order is fully determined by the input.

use common::{
    CategorySeries, FacetPanel, FacetSlice, MonthRevenue, ProductRank, RankedRevenue,
    TOP_PRODUCTS_LIMIT,
};
use model::SaleRecord;
use polars::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Builds the frame every view is computed from.
pub fn records_to_dataframe(records: &[&SaleRecord]) -> Result<DataFrame> {
    let mut months = Vec::with_capacity(records.len());
    let mut countries = Vec::with_capacity(records.len());
    let mut categories = Vec::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());
    let mut order_ids = Vec::with_capacity(records.len());
    let mut totals = Vec::with_capacity(records.len());

    for record in records {
        months.push(record.month());
        countries.push(record.country());
        categories.push(record.category());
        products.push(record.product());
        order_ids.push(record.order_id());
        let total = record.total().to_f64().ok_or_else(|| {
            ComputeError::Series(format!(
                "total {} of order {} is not representable as f64",
                record.total(),
                record.order_id()
            ))
        })?;
        totals.push(total);
    }

    let df = DataFrame::new(vec![
        Series::new("month".into(), months).into(),
        Series::new("country".into(), countries).into(),
        Series::new("category".into(), categories).into(),
        Series::new("product".into(), products).into(),
        Series::new("order_id".into(), order_ids).into(),
        Series::new("total".into(), totals).into(),
    ])?;

    Ok(df)
}

/// Revenue per month over the working set, ordered by month.
#[instrument(skip(working), fields(rows = working.height()))]
pub fn revenue_by_month(working: &DataFrame) -> Result<Vec<MonthRevenue>> {
    let out = working
        .clone()
        .lazy()
        .group_by([col("month")])
        .agg([col("total").sum().alias("revenue")])
        .sort(["month"], SortMultipleOptions::default())
        .collect()?;

    let months = u32_values(&out, "month")?;
    let revenue = f64_values(&out, "revenue")?;

    Ok(months
        .into_iter()
        .zip(revenue)
        .map(|(month, revenue)| MonthRevenue { month, revenue })
        .collect())
}

/// Revenue per value of `key` (`country` or `category`), highest first.
#[instrument(skip(frame), fields(rows = frame.height()))]
pub fn ranked_revenue(frame: &DataFrame, key: &str) -> Result<Vec<RankedRevenue>> {
    let out = frame
        .clone()
        .lazy()
        .group_by([col(key)])
        .agg([col("total").sum().alias("revenue")])
        .sort(
            ["revenue", key],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let labels = str_values(&out, key)?;
    let revenue = f64_values(&out, "revenue")?;

    Ok(labels
        .into_iter()
        .zip(revenue)
        .map(|(label, revenue)| RankedRevenue { label, revenue })
        .collect())
}

/// One revenue-per-month series for each category.
#[instrument(skip(working), fields(rows = working.height()))]
pub fn revenue_by_month_and_category(working: &DataFrame) -> Result<Vec<CategorySeries>> {
    let out = working
        .clone()
        .lazy()
        .group_by([col("category"), col("month")])
        .agg([col("total").sum().alias("revenue")])
        .sort(["category", "month"], SortMultipleOptions::default())
        .collect()?;

    let categories = str_values(&out, "category")?;
    let months = u32_values(&out, "month")?;
    let revenue = f64_values(&out, "revenue")?;

    let mut series: Vec<CategorySeries> = Vec::new();
    for ((category, month), revenue) in categories.into_iter().zip(months).zip(revenue) {
        let point = MonthRevenue { month, revenue };
        match series.last_mut() {
            Some(last) if last.category == category => last.points.push(point),
            _ => series.push(CategorySeries {
                category,
                points: vec![point],
            }),
        }
    }

    Ok(series)
}

/// Order count per category, one panel per country.
#[instrument(skip(current), fields(rows = current.height()))]
pub fn orders_by_category_and_country(current: &DataFrame) -> Result<Vec<FacetPanel>> {
    let out = current
        .clone()
        .lazy()
        .group_by([col("country"), col("category")])
        .agg([col("order_id").count().cast(DataType::Int64).alias("orders")])
        .sort(["country", "category"], SortMultipleOptions::default())
        .collect()?;

    let countries = str_values(&out, "country")?;
    let categories = str_values(&out, "category")?;
    let orders = i64_values(&out, "orders")?;

    let mut panels: Vec<FacetPanel> = Vec::new();
    for ((country, category), orders) in countries.into_iter().zip(categories).zip(orders) {
        let slice = FacetSlice { category, orders };
        match panels.last_mut() {
            Some(last) if last.country == country => last.slices.push(slice),
            _ => panels.push(FacetPanel {
                country,
                slices: vec![slice],
            }),
        }
    }

    Ok(panels)
}

/// Most and least ordered products, [`TOP_PRODUCTS_LIMIT`] rows each.
///
/// Products are grouped by (category, product). Ties on the order count are
/// broken by category, then product, ascending.
#[instrument(skip(current), fields(rows = current.height()))]
pub fn product_rankings(current: &DataFrame) -> Result<(Vec<ProductRank>, Vec<ProductRank>)> {
    let grouped = current
        .clone()
        .lazy()
        .group_by([col("category"), col("product")])
        .agg([
            col("total").sum().alias("revenue"),
            col("order_id").count().cast(DataType::Int64).alias("orders"),
        ]);

    let top = grouped
        .clone()
        .sort(
            ["orders", "category", "product"],
            SortMultipleOptions::default().with_order_descending_multi([true, false, false]),
        )
        .collect()?;
    let bottom = grouped
        .sort(["orders", "category", "product"], SortMultipleOptions::default())
        .collect()?;

    let top = product_rows(&top)?;
    let bottom = product_rows(&bottom)?;
    debug!("Ranked {} products", top.len().max(bottom.len()));

    Ok((top, bottom))
}

fn product_rows(ranked: &DataFrame) -> Result<Vec<ProductRank>> {
    let categories = str_values(ranked, "category")?;
    let products = str_values(ranked, "product")?;
    let revenue = f64_values(ranked, "revenue")?;
    let orders = i64_values(ranked, "orders")?;

    Ok(categories
        .into_iter()
        .zip(products)
        .zip(revenue)
        .zip(orders)
        .take(TOP_PRODUCTS_LIMIT)
        .map(|(((category, product), revenue), orders)| ProductRank {
            category,
            product,
            revenue,
            orders,
        })
        .collect())
}

fn str_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

fn u32_values(df: &DataFrame, name: &str) -> Result<Vec<u32>> {
    Ok(df
        .column(name)?
        .u32()?
        .into_iter()
        .map(|v| v.unwrap_or_default())
        .collect())
}

fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    Ok(df
        .column(name)?
        .i64()?
        .into_iter()
        .map(|v| v.unwrap_or_default())
        .collect())
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(month: u32, country: &str, category: &str, product: &str, total: i64) -> SaleRecord {
        SaleRecord::new(
            2024,
            month,
            country,
            category,
            product,
            format!("{}-{}-{}", month, country, product),
            1,
            Decimal::new(total, 0),
            Decimal::new(total / 10, 0),
        )
    }

    fn frame(records: &[SaleRecord]) -> DataFrame {
        let refs: Vec<&SaleRecord> = records.iter().collect();
        records_to_dataframe(&refs).unwrap()
    }

    #[test]
    fn test_revenue_by_month_is_ordered_by_month() {
        let records = vec![
            record(3, "US", "A", "p1", 30),
            record(1, "US", "A", "p1", 10),
            record(3, "PE", "B", "p2", 5),
            record(2, "US", "B", "p2", 20),
        ];

        let months = revenue_by_month(&frame(&records)).unwrap();

        assert_eq!(
            months,
            vec![
                MonthRevenue { month: 1, revenue: 10.0 },
                MonthRevenue { month: 2, revenue: 20.0 },
                MonthRevenue { month: 3, revenue: 35.0 },
            ]
        );
    }

    #[test]
    fn test_ranked_revenue_descending_with_ties_by_label() {
        let records = vec![
            record(1, "PE", "A", "p1", 50),
            record(1, "US", "A", "p1", 80),
            record(1, "CL", "A", "p1", 50),
            record(1, "PE", "B", "p2", 10),
        ];

        let by_country = ranked_revenue(&frame(&records), "country").unwrap();
        let labels: Vec<&str> = by_country.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["US", "PE", "CL"]);
        assert_eq!(by_country[1].revenue, 60.0);

        let by_category = ranked_revenue(&frame(&records), "category").unwrap();
        assert_eq!(by_category[0].label, "A");
        assert_eq!(by_category[0].revenue, 180.0);
    }

    #[test]
    fn test_revenue_by_month_and_category_groups_series() {
        let records = vec![
            record(1, "US", "B", "p2", 5),
            record(1, "US", "A", "p1", 10),
            record(2, "US", "A", "p1", 20),
            record(2, "PE", "A", "p3", 1),
        ];

        let series = revenue_by_month_and_category(&frame(&records)).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].category, "A");
        assert_eq!(
            series[0].points,
            vec![
                MonthRevenue { month: 1, revenue: 10.0 },
                MonthRevenue { month: 2, revenue: 21.0 },
            ]
        );
        assert_eq!(series[1].category, "B");
        assert_eq!(series[1].points.len(), 1);
    }

    #[test]
    fn test_orders_by_category_and_country_panels() {
        let records = vec![
            record(4, "US", "B", "p2", 5),
            record(4, "US", "A", "p1", 10),
            record(4, "US", "A", "p9", 10),
            record(4, "CL", "A", "p1", 10),
        ];

        let panels = orders_by_category_and_country(&frame(&records)).unwrap();

        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].country, "CL");
        assert_eq!(panels[1].country, "US");
        assert_eq!(
            panels[1].slices,
            vec![
                FacetSlice { category: "A".to_string(), orders: 2 },
                FacetSlice { category: "B".to_string(), orders: 1 },
            ]
        );
    }

    #[test]
    fn test_product_rankings_are_limited_and_deterministic() {
        let mut records = Vec::new();
        // p00 gets 3 orders, p01 gets 2, the rest one each.
        for i in 0..12 {
            let product = format!("p{:02}", i);
            records.push(record(5, "US", "A", &product, 10));
        }
        records.push(record(5, "PE", "A", "p00", 10));
        records.push(record(5, "CL", "A", "p00", 10));
        records.push(record(5, "PE", "A", "p01", 10));

        let (top, bottom) = product_rankings(&frame(&records)).unwrap();

        assert_eq!(top.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(bottom.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(top[0].product, "p00");
        assert_eq!(top[0].orders, 3);
        assert_eq!(top[0].revenue, 30.0);
        assert_eq!(top[1].product, "p01");
        // Ties resolve by product name.
        assert_eq!(top[2].product, "p02");
        assert_eq!(bottom[0].product, "p02");
        assert_eq!(bottom[9].product, "p11");

        let (top_again, bottom_again) = product_rankings(&frame(&records)).unwrap();
        assert_eq!(top, top_again);
        assert_eq!(bottom, bottom_again);
    }

    #[test]
    fn test_views_over_empty_frame() {
        let empty = frame(&[]);

        assert!(revenue_by_month(&empty).unwrap().is_empty());
        assert!(ranked_revenue(&empty, "country").unwrap().is_empty());
        assert!(revenue_by_month_and_category(&empty).unwrap().is_empty());
        assert!(orders_by_category_and_country(&empty).unwrap().is_empty());
        let (top, bottom) = product_rankings(&empty).unwrap();
        assert!(top.is_empty() && bottom.is_empty());
    }

    #[test]
    fn test_fractional_totals_keep_their_value() {
        let cents = SaleRecord::new(
            2024,
            1,
            "US",
            "A",
            "p1",
            "1",
            1,
            Decimal::new(5025, 2),
            Decimal::new(1050, 2),
        );

        let months = revenue_by_month(&frame(&[cents])).unwrap();

        assert_eq!(months.len(), 1);
        assert!((months[0].revenue - 50.25).abs() < 1e-9);
    }
}
