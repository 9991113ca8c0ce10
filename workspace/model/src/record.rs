use rust_decimal::Decimal;
use serde::Deserialize;

/// One sales transaction line.
///
/// Records are immutable once loaded. Header names follow the canonical
/// English spelling; the aliases accept the column names of the store export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleRecord {
    #[serde(alias = "anio")]
    year: i32,
    #[serde(alias = "mes")]
    month: u32,
    #[serde(alias = "pais")]
    country: String,
    #[serde(alias = "categoria")]
    category: String,
    #[serde(alias = "producto")]
    product: String,
    #[serde(alias = "orden")]
    order_id: String,
    #[serde(alias = "Cantidad")]
    quantity: i64,
    #[serde(alias = "Total", with = "rust_decimal::serde::str")]
    total: Decimal,
    #[serde(alias = "utilidad", with = "rust_decimal::serde::str")]
    profit: Decimal,
}

impl SaleRecord {
    /// Creates a new SaleRecord.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        country: impl Into<String>,
        category: impl Into<String>,
        product: impl Into<String>,
        order_id: impl Into<String>,
        quantity: i64,
        total: Decimal,
        profit: Decimal,
    ) -> Self {
        Self {
            year,
            month,
            country: country.into(),
            category: category.into(),
            product: product.into(),
            order_id: order_id.into(),
            quantity,
            total,
            profit,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of the sale, 1 to 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Total amount of the line, in the store currency.
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn profit(&self) -> Decimal {
        self.profit
    }
}
