use shared::format::{format_count, format_money_f64};
use shared::ProductRank;
use yew::prelude::*;

use crate::common::error::EmptyState;

#[derive(Properties, PartialEq)]
pub struct ProductTableProps {
    pub title: AttrValue,
    pub products: Vec<ProductRank>,
    pub currency_prefix: AttrValue,
}

/// Ranked product table, as ordered by the server.
#[function_component(ProductTable)]
pub fn product_table(props: &ProductTableProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{props.title.clone()}</h2>
                if props.products.is_empty() {
                    <EmptyState message="No sales in the selected month" />
                } else {
                    <div class="overflow-x-auto">
                        <table class="table table-zebra table-sm">
                            <thead>
                                <tr>
                                    <th>{"#"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Product"}</th>
                                    <th class="text-right">{"Orders"}</th>
                                    <th class="text-right">{"Revenue"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for props.products.iter().enumerate().map(|(index, product)| html! {
                                    <tr>
                                        <td>{(index + 1).to_string()}</td>
                                        <td>{product.category.clone()}</td>
                                        <td>{product.product.clone()}</td>
                                        <td class="text-right">{format_count(product.orders)}</td>
                                        <td class="text-right">{format_money_f64(product.revenue, &props.currency_prefix)}</td>
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                    </div>
                }
            </div>
        </div>
    }
}
