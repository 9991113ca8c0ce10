pub mod cards;
pub mod charts;
pub mod filters;
pub mod products;
pub mod view;

pub use view::Dashboard;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// English month name for 1-12, the number itself otherwise.
pub fn month_name(month: u32) -> String {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .map(|name| name.to_string())
        .unwrap_or_else(|| month.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "0");
        assert_eq!(month_name(13), "13");
    }
}
