use shared::{FilterOptions, FilterSelection};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::month_name;

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub options: FilterOptions,
    pub selection: FilterSelection,
    pub on_change: Callback<FilterSelection>,
}

/// Year and month single-selects plus the country multi-select.
#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let on_year = {
        let selection = props.selection.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = select.value().parse::<i32>() {
                log::debug!("Year changed to {}", year);
                on_change.emit(FilterSelection::new(
                    year,
                    selection.month,
                    selection.countries.clone(),
                ));
            }
        })
    };

    let on_month = {
        let selection = props.selection.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = select.value().parse::<u32>() {
                log::debug!("Month changed to {}", month);
                on_change.emit(FilterSelection::new(
                    selection.year,
                    month,
                    selection.countries.clone(),
                ));
            }
        })
    };

    let country_toggle = |country: String| {
        let selection = props.selection.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let countries = toggle_country(&selection.countries, &country, input.checked());
            log::debug!("Countries changed to {:?}", countries);
            on_change.emit(FilterSelection::new(selection.year, selection.month, countries));
        })
    };

    let clear_countries = {
        let selection = props.selection.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_change.emit(FilterSelection::new(
                selection.year,
                selection.month,
                Vec::<String>::new(),
            ));
        })
    };

    html! {
        <aside class="w-64 shrink-0 bg-base-100 border-r border-base-300 p-4 flex flex-col gap-4">
            <label class="form-control">
                <span class="label-text font-semibold">{"Year"}</span>
                <select class="select select-bordered select-sm" onchange={on_year}>
                    { for props.options.years.iter().map(|year| html! {
                        <option value={year.to_string()} selected={*year == props.selection.year}>
                            {year.to_string()}
                        </option>
                    }) }
                </select>
            </label>

            <label class="form-control">
                <span class="label-text font-semibold">{"Month"}</span>
                <select class="select select-bordered select-sm" onchange={on_month}>
                    { for props.options.months.iter().map(|month| html! {
                        <option value={month.to_string()} selected={*month == props.selection.month}>
                            {month_name(*month)}
                        </option>
                    }) }
                </select>
                <span class="label-text-alt text-gray-500 mt-1">{"Year to date through this month"}</span>
            </label>

            <div class="form-control">
                <div class="flex items-center justify-between">
                    <span class="label-text font-semibold">{"Countries"}</span>
                    <button class="btn btn-ghost btn-xs" onclick={clear_countries}>{"All"}</button>
                </div>
                { for props.options.countries.iter().map(|country| html! {
                    <label class="label cursor-pointer justify-start gap-2 py-1">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-sm"
                            checked={props.selection.countries.contains(country)}
                            onchange={country_toggle(country.clone())}
                        />
                        <span class="label-text">{country.clone()}</span>
                    </label>
                }) }
            </div>
        </aside>
    }
}

/// `countries` with `country` added or removed.
pub fn toggle_country(countries: &[String], country: &str, checked: bool) -> Vec<String> {
    let mut next: Vec<String> = countries.iter().filter(|c| *c != country).cloned().collect();
    if checked {
        next.push(country.to_string());
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_country() {
        let countries = vec!["Chile".to_string()];

        assert_eq!(toggle_country(&countries, "Peru", true), vec!["Chile", "Peru"]);
        assert!(toggle_country(&countries, "Chile", false).is_empty());
        assert_eq!(toggle_country(&countries, "Chile", true), vec!["Chile"]);
    }
}
