use shared::format::{
    format_count, format_count_delta, format_money, format_money_delta, format_percent,
    format_percent_delta,
};
use shared::{PeriodComparison, VarianceConvention};
use yew::prelude::*;

use super::month_name;

/// Text of one metric card.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub delta: String,
    pub convention: VarianceConvention,
}

/// The five cards, in display order.
pub fn metric_cards(period: &PeriodComparison, prefix: &str) -> Vec<MetricCard> {
    let current = &period.current;
    let variances = &period.variances;

    vec![
        MetricCard {
            title: "Quantity",
            value: format_count(current.quantity),
            delta: format_count_delta(variances.quantity),
            convention: variances.quantity_convention,
        },
        MetricCard {
            title: "Orders",
            value: format_count(current.orders),
            delta: format_count_delta(variances.orders),
            convention: variances.orders_convention,
        },
        MetricCard {
            title: "Revenue",
            value: format_money(current.revenue, prefix),
            delta: format_money_delta(variances.revenue),
            convention: variances.revenue_convention,
        },
        MetricCard {
            title: "Profit",
            value: format_money(current.profit, prefix),
            delta: format_money_delta(variances.profit),
            convention: variances.profit_convention,
        },
        MetricCard {
            title: "Profit ratio",
            value: format_percent(current.profit_ratio),
            delta: format_percent_delta(variances.profit_ratio),
            convention: variances.profit_ratio_convention,
        },
    ]
}

fn convention_hint(convention: VarianceConvention, comparison: &str) -> String {
    match convention {
        VarianceConvention::ComparisonMinusCurrent => format!("{} minus this month", comparison),
        VarianceConvention::CurrentMinusComparison => format!("this month minus {}", comparison),
    }
}

#[derive(Properties, PartialEq)]
pub struct MetricCardsProps {
    pub period: PeriodComparison,
    pub currency_prefix: AttrValue,
}

#[function_component(MetricCards)]
pub fn metric_cards_row(props: &MetricCardsProps) -> Html {
    let comparison = month_name(props.period.comparison_month);

    html! {
        <div class="grid grid-cols-5 gap-4">
            { for metric_cards(&props.period, &props.currency_prefix).into_iter().map(|card| html! {
                <div class="stats shadow bg-base-100">
                    <div class="stat">
                        <div class="stat-title">{card.title}</div>
                        <div class="stat-value text-2xl">{card.value}</div>
                        <div class="stat-desc" title={convention_hint(card.convention, &comparison)}>
                            {format!("{} vs {}", card.delta, comparison)}
                        </div>
                    </div>
                </div>
            }) }
        </div>
    }
}
