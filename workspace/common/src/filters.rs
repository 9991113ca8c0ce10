use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The viewer's filter choice for one render.
///
/// `countries` is kept sorted and free of duplicates; an empty list means
/// "no country restriction".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct FilterSelection {
    /// Selected year
    pub year: i32,
    /// Selected month (1-12); the working set keeps every month up to it
    pub month: u32,
    /// Selected countries, empty for all
    pub countries: Vec<String>,
}

impl FilterSelection {
    pub fn new<I, S>(year: i32, month: u32, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut countries: Vec<String> = countries.into_iter().map(Into::into).collect();
        countries.sort();
        countries.dedup();
        Self { year, month, countries }
    }

    /// Whether a record from `country` passes the country filter.
    pub fn allows_country(&self, country: &str) -> bool {
        self.countries.is_empty()
            || self
                .countries
                .binary_search_by(|c| c.as_str().cmp(country))
                .is_ok()
    }

    /// Stable textual key, used for caching rendered dashboards.
    ///
    /// Countries are quoted, since names may contain commas.
    pub fn cache_key(&self) -> String {
        format!("{}-{}-{:?}", self.year, self.month, self.countries)
    }
}

/// Values the sidebar controls can offer, plus display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FilterOptions {
    /// Distinct years in file order
    pub years: Vec<i32>,
    /// Distinct months in file order
    pub months: Vec<u32>,
    /// Distinct countries in file order
    pub countries: Vec<String>,
    /// Selection used when the viewer has not chosen anything yet
    pub default_selection: FilterSelection,
    /// Prefix printed before money amounts (e.g. `US$`)
    pub currency_prefix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countries_are_normalized() {
        let selection = FilterSelection::new(2024, 3, ["Peru", "Chile", "Peru"]);
        assert_eq!(selection.countries, vec!["Chile", "Peru"]);
        assert_eq!(selection.cache_key(), r#"2024-3-["Chile", "Peru"]"#);
    }

    #[test]
    fn test_cache_key_separates_names_with_commas() {
        let joined = FilterSelection::new(2024, 3, ["Korea, Republic of"]);
        let split = FilterSelection::new(2024, 3, ["Korea", " Republic of"]);
        assert_ne!(joined.cache_key(), split.cache_key());
    }

    #[test]
    fn test_allows_country() {
        let all = FilterSelection::new(2024, 3, Vec::<String>::new());
        assert!(all.allows_country("Anywhere"));

        let some = FilterSelection::new(2024, 3, ["Peru", "Chile"]);
        assert!(some.allows_country("Peru"));
        assert!(!some.allows_country("Bolivia"));
    }
}
