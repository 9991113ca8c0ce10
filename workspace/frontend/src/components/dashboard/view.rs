use shared::{DashboardView, FilterOptions, FilterSelection, SelectionScope};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::cards::MetricCards;
use super::charts::{
    category_lines_figure, facet_pies_figure, facet_rows, ranked_revenue_figure,
    revenue_by_month_figure, Figure, PlotlyChart, FACET_ROW_HEIGHT,
};
use super::filters::FilterPanel;
use super::month_name;
use super::products::ProductTable;
use crate::api_client::dashboard::{fetch_dashboard, fetch_filters, reload_dataset};
use crate::common::error::{EmptyState, ErrorDisplay};
use crate::common::fetch_render::FetchRender;
use crate::components::layout::Layout;
use crate::hooks::FetchState;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let options = use_state(|| FetchState::<FilterOptions>::Loading);
    let selection = use_state(|| None::<FilterSelection>);
    let view = use_state(FetchState::<DashboardView>::default);
    let generation = use_state(|| 0u32);

    // Filter options on mount and after every reload
    {
        let options = options.clone();
        let selection = selection.clone();
        use_effect_with(*generation, move |_| {
            options.set(FetchState::Loading);
            spawn_local(async move {
                let result = fetch_filters().await;
                if let Ok(loaded) = &result {
                    let keep = (*selection)
                        .as_ref()
                        .is_some_and(|s| loaded.years.contains(&s.year) && loaded.months.contains(&s.month));
                    if !keep {
                        log::debug!("Using default selection {:?}", loaded.default_selection);
                        selection.set(Some(loaded.default_selection.clone()));
                    }
                }
                options.set(FetchState::from_result(result));
            });
            || ()
        });
    }

    // Dashboard for the current selection
    {
        let view = view.clone();
        use_effect_with(((*selection).clone(), *generation), move |(selection, _)| {
            if let Some(selection) = selection.clone() {
                view.set(FetchState::Loading);
                spawn_local(async move {
                    view.set(FetchState::from_result(fetch_dashboard(&selection).await));
                });
            }
            || ()
        });
    }

    let refresh = {
        let generation = generation.clone();
        Callback::from(move |_: ()| generation.set(*generation + 1))
    };

    let on_reload = {
        let refresh = refresh.clone();
        let view = view.clone();
        Callback::from(move |_: ()| {
            let refresh = refresh.clone();
            let view = view.clone();
            spawn_local(async move {
                match reload_dataset().await {
                    Ok(info) => {
                        log::info!("Data reloaded: {} records", info.records);
                        refresh.emit(());
                    }
                    Err(err) => view.set(FetchState::Error(err)),
                }
            });
        })
    };

    let on_change = {
        let selection = selection.clone();
        Callback::from(move |next: FilterSelection| selection.set(Some(next)))
    };

    let sidebar = match (options.data(), (*selection).clone()) {
        (Some(loaded), Some(current)) => html! {
            <FilterPanel options={loaded.clone()} selection={current} on_change={on_change} />
        },
        _ => html! {},
    };

    let currency_prefix = options
        .data()
        .map(|o| o.currency_prefix.clone())
        .unwrap_or_default();

    let content = match &*options {
        FetchState::Error(err) => html! {
            <ErrorDisplay message={err.clone()} on_retry={Some(refresh.clone())} />
        },
        _ => html! {
            <FetchRender<DashboardView>
                state={(*view).clone()}
                render={Callback::from(move |view: DashboardView| render_view(&view, &currency_prefix))}
                on_retry={Some(refresh.clone())}
                loading_text={Some("Computing dashboard...".to_string())}
            />
        },
    };

    html! {
        <Layout title="Sales dashboard" sidebar={sidebar} on_reload={Some(on_reload)}>
            {content}
        </Layout>
    }
}

fn render_view(view: &DashboardView, currency_prefix: &str) -> Html {
    let empty_working = view.has_notice(SelectionScope::WorkingSet);
    let empty_current = view.has_notice(SelectionScope::CurrentMonth);
    let current = month_name(view.period.current_month);
    let facet_height = facet_rows(view.orders_by_category_and_country.len()) as u32 * FACET_ROW_HEIGHT;

    let working_figure = |figure: Figure| (!empty_working).then_some(figure);
    let current_figure = |figure: Figure| (!empty_current).then_some(figure);

    html! {
        <div class="flex flex-col gap-6">
            { for view.notices.iter().map(|notice| html! {
                <div class="alert alert-warning py-2">{notice.message()}</div>
            }) }

            <MetricCards period={view.period.clone()} currency_prefix={currency_prefix.to_string()} />

            <div class="grid grid-cols-5 gap-6">
                <div class="col-span-3">
                    { chart_card(
                        "Revenue by month".to_string(),
                        "chart-revenue-month",
                        working_figure(revenue_by_month_figure(&view.revenue_by_month, currency_prefix)),
                        320,
                    ) }
                </div>
                <div class="col-span-2">
                    { chart_card(
                        format!("Revenue by country, {}", current),
                        "chart-revenue-country",
                        current_figure(ranked_revenue_figure(&view.revenue_by_country, currency_prefix, "#0ea5e9")),
                        320,
                    ) }
                </div>
            </div>

            <div class="grid grid-cols-5 gap-6">
                <div class="col-span-3">
                    { chart_card(
                        "Revenue by month and category".to_string(),
                        "chart-revenue-month-category",
                        working_figure(category_lines_figure(&view.revenue_by_month_and_category, currency_prefix)),
                        320,
                    ) }
                </div>
                <div class="col-span-2">
                    { chart_card(
                        format!("Revenue by category, {}", current),
                        "chart-revenue-category",
                        current_figure(ranked_revenue_figure(&view.revenue_by_category, currency_prefix, "#22c55e")),
                        320,
                    ) }
                </div>
            </div>

            { chart_card(
                format!("Orders by category and country, {}", current),
                "chart-orders-facets",
                current_figure(facet_pies_figure(&view.orders_by_category_and_country)),
                facet_height,
            ) }

            <div class="grid grid-cols-2 gap-6">
                <ProductTable
                    title={format!("Top {} products, {}", shared::TOP_PRODUCTS_LIMIT, current)}
                    products={view.top_products.clone()}
                    currency_prefix={currency_prefix.to_string()}
                />
                <ProductTable
                    title={format!("Bottom {} products, {}", shared::TOP_PRODUCTS_LIMIT, current)}
                    products={view.bottom_products.clone()}
                    currency_prefix={currency_prefix.to_string()}
                />
            </div>
        </div>
    }
}

fn chart_card(title: String, id: &'static str, figure: Option<Figure>, height: u32) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                if let Some(figure) = figure {
                    <PlotlyChart id={id} figure={figure} height={height} />
                } else {
                    <EmptyState message="No sales for this selection" />
                }
            </div>
        </div>
    }
}
