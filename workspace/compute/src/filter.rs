//! Filter stage: narrows the loaded records to the working set.
//!
//! Three predicates compose by AND: year equality, a cumulative month filter
//! (every month up to and including the selected one) and an optional
//! country membership test. Each step returns a new sequence.

use common::{FilterOptions, FilterSelection};
use model::{RecordSet, SaleRecord};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Keeps records of the selected year.
pub fn filter_year<'a>(records: &[&'a SaleRecord], year: i32) -> Vec<&'a SaleRecord> {
    records.iter().copied().filter(|r| r.year() == year).collect()
}

/// Keeps records with `month <= through_month` (year to date).
pub fn filter_through_month<'a>(records: &[&'a SaleRecord], through_month: u32) -> Vec<&'a SaleRecord> {
    records
        .iter()
        .copied()
        .filter(|r| r.month() <= through_month)
        .collect()
}

/// Keeps records whose country is selected; no-op for an empty selection.
pub fn filter_countries<'a>(
    records: &[&'a SaleRecord],
    selection: &FilterSelection,
) -> Vec<&'a SaleRecord> {
    records
        .iter()
        .copied()
        .filter(|r| selection.allows_country(r.country()))
        .collect()
}

/// Applies the year, month and country filters.
#[instrument(skip(records), fields(total = records.len()))]
pub fn apply_filters<'a>(records: &'a RecordSet, selection: &FilterSelection) -> Vec<&'a SaleRecord> {
    let all: Vec<&SaleRecord> = records.iter().collect();
    let by_year = filter_year(&all, selection.year);
    let by_month = filter_through_month(&by_year, selection.month);
    let working = filter_countries(&by_month, selection);
    debug!("Working set has {} records", working.len());
    working
}

/// First distinct year and month in file order, no country restriction.
pub fn default_selection(records: &RecordSet) -> Option<FilterSelection> {
    let year = *records.years().first()?;
    let month = *records.months().first()?;
    Some(FilterSelection::new(year, month, Vec::<String>::new()))
}

/// Rejects selections naming values the loaded data does not contain.
pub fn validate_selection(records: &RecordSet, selection: &FilterSelection) -> Result<()> {
    if !records.years().contains(&selection.year) {
        return Err(ComputeError::InvalidFilterState(format!(
            "year {} is not present in the data",
            selection.year
        )));
    }
    if !records.months().contains(&selection.month) {
        return Err(ComputeError::InvalidFilterState(format!(
            "month {} is not present in the data",
            selection.month
        )));
    }

    let known = records.countries();
    let unknown: Vec<&str> = selection
        .countries
        .iter()
        .filter(|c| !known.contains(*c))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(ComputeError::InvalidFilterState(format!(
            "unknown countries: {}",
            unknown.join(", ")
        )));
    }

    Ok(())
}

/// Values for the sidebar controls.
pub fn filter_options(records: &RecordSet, currency_prefix: &str) -> Result<FilterOptions> {
    let default_selection = default_selection(records).ok_or_else(|| {
        ComputeError::InvalidFilterState("no records loaded".to_string())
    })?;

    Ok(FilterOptions {
        years: records.years(),
        months: records.months(),
        countries: records.countries(),
        default_selection,
        currency_prefix: currency_prefix.to_string(),
    })
}
