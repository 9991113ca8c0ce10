use serde::Serialize;
use serde_json::{json, Value};
use shared::format::format_money_f64;
use shared::{CategorySeries, FacetPanel, MonthRevenue, RankedRevenue, FACET_COLUMNS};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

use super::month_name;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// Height of one row of facet pies, in pixels.
pub const FACET_ROW_HEIGHT: u32 = 260;

/// On-bar value labels: whole units with thousands separators.
const BAR_VALUE_TEMPLATE: &str = "%{y:,.0f}";

/// Plotly traces and layout, as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub traces: Value,
    pub layout: Value,
}

#[derive(Properties, PartialEq)]
pub struct PlotlyChartProps {
    pub id: AttrValue,
    pub figure: Figure,
    #[prop_or(320)]
    pub height: u32,
}

#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with(
        (chart_ref.clone(), props.figure.clone()),
        move |(chart_ref, figure)| {
            if let Some(element) = chart_ref.cast::<Element>() {
                let div_id = element.id();
                if !div_id.is_empty() {
                    draw(&div_id, figure);
                }
            }
            || ()
        },
    );

    html! {
        <div
            ref={chart_ref}
            id={props.id.clone()}
            class="chart-container"
            style={format!("height: {}px;", props.height)}
        ></div>
    }
}

fn draw(div_id: &str, figure: &Figure) {
    // Plain JS objects; the default serializer would produce Maps.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let config = json!({"responsive": true, "displayModeBar": false});

    match (
        figure.traces.serialize(&serializer),
        figure.layout.serialize(&serializer),
        config.serialize(&serializer),
    ) {
        (Ok(data), Ok(layout), Ok(config)) => {
            log::trace!("Drawing chart {}", div_id);
            new_plot(div_id, data, layout, config);
        }
        _ => log::error!("Failed to convert chart {} for Plotly", div_id),
    }
}

fn base_layout() -> Value {
    json!({
        "margin": {"t": 10, "r": 10, "l": 60, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"showgrid": false},
        "yaxis": {"showgrid": true, "gridcolor": "#eee", "rangemode": "tozero"},
    })
}

fn money_labels<'a>(values: impl Iterator<Item = &'a f64>, prefix: &str) -> Vec<String> {
    values.map(|v| format_money_f64(*v, prefix)).collect()
}

/// Revenue per month over the working set.
pub fn revenue_by_month_figure(points: &[MonthRevenue], prefix: &str) -> Figure {
    let revenue: Vec<f64> = points.iter().map(|p| p.revenue).collect();

    Figure {
        traces: json!([{
            "x": points.iter().map(|p| month_name(p.month)).collect::<Vec<_>>(),
            "y": revenue,
            "text": money_labels(revenue.iter(), prefix),
            "hoverinfo": "x+text",
            "type": "scatter",
            "mode": "lines+markers",
            "line": {"color": "#2563eb", "shape": "spline"},
            "name": "Revenue"
        }]),
        layout: base_layout(),
    }
}

/// Current-month revenue per country or category, highest first.
pub fn ranked_revenue_figure(items: &[RankedRevenue], prefix: &str, color: &str) -> Figure {
    let revenue: Vec<f64> = items.iter().map(|i| i.revenue).collect();

    Figure {
        traces: json!([{
            "x": items.iter().map(|i| i.label.clone()).collect::<Vec<_>>(),
            "y": revenue,
            "text": money_labels(revenue.iter(), prefix),
            "hoverinfo": "x+text",
            "texttemplate": BAR_VALUE_TEMPLATE,
            "textposition": "auto",
            "type": "bar",
            "marker": {"color": color}
        }]),
        layout: base_layout(),
    }
}

/// One revenue line per category.
pub fn category_lines_figure(series: &[CategorySeries], prefix: &str) -> Figure {
    let traces: Vec<Value> = series
        .iter()
        .map(|s| {
            let revenue: Vec<f64> = s.points.iter().map(|p| p.revenue).collect();
            json!({
                "x": s.points.iter().map(|p| month_name(p.month)).collect::<Vec<_>>(),
                "y": revenue,
                "text": money_labels(revenue.iter(), prefix),
                "hoverinfo": "x+text+name",
                "type": "scatter",
                "mode": "lines+markers",
                "name": s.category
            })
        })
        .collect();

    let mut layout = base_layout();
    layout["showlegend"] = json!(true);
    layout["legend"] = json!({"orientation": "h", "y": -0.2});

    Figure {
        traces: Value::Array(traces),
        layout,
    }
}

/// One pie per country, [`FACET_COLUMNS`] per row.
pub fn facet_pies_figure(panels: &[FacetPanel]) -> Figure {
    let rows = facet_rows(panels.len());

    let traces: Vec<Value> = panels
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            json!({
                "type": "pie",
                "labels": panel.slices.iter().map(|s| s.category.clone()).collect::<Vec<_>>(),
                "values": panel.slices.iter().map(|s| s.orders).collect::<Vec<_>>(),
                "title": {"text": panel.country},
                "textinfo": "percent",
                "hoverinfo": "label+value",
                "sort": false,
                "domain": {"row": index / FACET_COLUMNS, "column": index % FACET_COLUMNS}
            })
        })
        .collect();

    Figure {
        traces: Value::Array(traces),
        layout: json!({
            "margin": {"t": 30, "r": 10, "l": 10, "b": 10},
            "paper_bgcolor": "rgba(0,0,0,0)",
            "grid": {"rows": rows, "columns": FACET_COLUMNS},
            "showlegend": true,
            "legend": {"orientation": "h"}
        }),
    }
}

/// Rows needed to lay out `panels` pies.
pub fn facet_rows(panels: usize) -> usize {
    panels.div_ceil(FACET_COLUMNS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FacetSlice;

    fn panel(country: &str) -> FacetPanel {
        FacetPanel {
            country: country.to_string(),
            slices: vec![FacetSlice {
                category: "A".to_string(),
                orders: 2,
            }],
        }
    }

    #[test]
    fn test_revenue_by_month_figure() {
        let figure = revenue_by_month_figure(
            &[
                MonthRevenue { month: 1, revenue: 100.0 },
                MonthRevenue { month: 2, revenue: 1500.0 },
            ],
            "US$",
        );

        assert_eq!(figure.traces[0]["x"], json!(["January", "February"]));
        assert_eq!(figure.traces[0]["text"], json!(["US$ 100", "US$ 1,500"]));
    }

    #[test]
    fn test_ranked_revenue_bars_show_values() {
        let figure = ranked_revenue_figure(
            &[
                RankedRevenue { label: "US".to_string(), revenue: 2500.0 },
                RankedRevenue { label: "PE".to_string(), revenue: 30.0 },
            ],
            "US$",
            "#0ea5e9",
        );

        assert_eq!(figure.traces[0]["type"], json!("bar"));
        assert_eq!(figure.traces[0]["texttemplate"], json!("%{y:,.0f}"));
        assert_eq!(figure.traces[0]["textposition"], json!("auto"));
        assert_eq!(figure.traces[0]["x"], json!(["US", "PE"]));
    }

    #[test]
    fn test_facet_grid_wraps_after_four_panels() {
        let panels: Vec<FacetPanel> = ["CL", "MX", "PE", "US", "UY"].iter().map(|c| panel(c)).collect();

        let figure = facet_pies_figure(&panels);

        assert_eq!(figure.layout["grid"]["rows"], json!(2));
        assert_eq!(figure.traces[3]["domain"], json!({"row": 0, "column": 3}));
        assert_eq!(figure.traces[4]["domain"], json!({"row": 1, "column": 0}));
        assert_eq!(figure.traces[4]["title"]["text"], json!("UY"));
    }

    #[test]
    fn test_facet_rows() {
        assert_eq!(facet_rows(0), 1);
        assert_eq!(facet_rows(4), 1);
        assert_eq!(facet_rows(5), 2);
    }

    #[test]
    fn test_category_lines_figure() {
        let figure = category_lines_figure(
            &[
                CategorySeries {
                    category: "A".to_string(),
                    points: vec![MonthRevenue { month: 1, revenue: 1.0 }],
                },
                CategorySeries {
                    category: "B".to_string(),
                    points: vec![MonthRevenue { month: 2, revenue: 2.0 }],
                },
            ],
            "US$",
        );

        assert_eq!(figure.traces.as_array().map(Vec::len), Some(2));
        assert_eq!(figure.traces[1]["name"], json!("B"));
        assert_eq!(figure.layout["showlegend"], json!(true));
    }
}
