//! Combined page rendering - Full page endpoint
//!
//! Helper functions:
//! - render_month_selector: Month dropdown form
//! - render_statistics: Sale amount and sold/unsold cards
//! - render_transactions_table: First page of the month's transactions
//! - render_bar_chart: Price histogram as CSS bars
//! - render_pie_chart: Category distribution with percentages

use super::super::{param, Params};
use crate::{base_html, ApiError, AppState};
use salesboard_core::{CombinedData, PriceRangeCount, Statistics};
use salesboard_store::{CategoryCount, ProductTransaction};
use salesboard_utils::{escape_html, format_amount, format_number};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Display name for a month parameter, if it names one of the twelve months
pub fn month_name(month: &str) -> Option<&'static str> {
    month
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .map(|m| MONTH_NAMES[m - 1])
}

/// Combined page - statistics, transactions and both charts for one month
pub async fn page_combined(
    state: axum::extract::State<AppState>,
    params: Params,
) -> Result<axum::response::Html<String>, ApiError> {
    let month = param(&params, "month");
    let data = state
        .reporter
        .combined(month)
        .await
        .map_err(|e| state.fail("combined_data", month, "Error fetching combined data.", e))?;

    Ok(axum::response::Html(render_page(month, &data)))
}

pub fn render_page(month: Option<&str>, data: &CombinedData) -> String {
    let heading = match month.and_then(month_name) {
        Some(name) => format!("Transactions for {}", name),
        None => "Transactions".to_string(),
    };
    let json_link = format!(
        "/api/combined_data?month={}",
        urlencoding::encode(month.unwrap_or(""))
    );

    let content = format!(
        r#"<div class='max-w-6xl mx-auto p-6 space-y-6'>
    <div class='flex items-center justify-between'>
        <h2 class='text-2xl font-bold'>{}</h2>
        <div class='flex items-center gap-3'>
            {}
            <a href='{}' class='text-sm text-indigo-600 hover:underline'>JSON</a>
        </div>
    </div>
    {}
    {}
    <div class='grid grid-cols-1 md:grid-cols-2 gap-6'>
        {}
        {}
    </div>
</div>"#,
        escape_html(&heading),
        render_month_selector(month),
        json_link,
        render_statistics(&data.statistics),
        render_transactions_table(&data.transactions),
        render_bar_chart(&data.bar_chart),
        render_pie_chart(&data.pie_chart),
    );

    base_html(&heading, &content)
}

fn render_month_selector(selected: Option<&str>) -> String {
    let selected = selected.and_then(|m| m.trim().parse::<usize>().ok());
    let mut options = String::new();
    for (i, name) in MONTH_NAMES.iter().enumerate() {
        let value = i + 1;
        let attr = if selected == Some(value) { " selected" } else { "" };
        options.push_str(&format!("<option value='{}'{}>{}</option>", value, attr, name));
    }

    format!(
        r#"<form method='get' action='/combined_data'>
            <select name='month' class='px-2 py-1.5 text-sm border rounded-lg bg-white' onchange='this.form.submit()'>{}</select>
        </form>"#,
        options
    )
}

fn render_statistics(stats: &Statistics) -> String {
    let card = |label: &str, value: String| {
        format!(
            r#"<div class='bg-white p-4 rounded-lg border shadow-sm'>
                <div class='text-sm text-gray-500'>{}</div>
                <div class='text-2xl font-semibold'>{}</div>
            </div>"#,
            label, value
        )
    };

    format!(
        "<div class='grid grid-cols-1 md:grid-cols-3 gap-4'>{}{}{}</div>",
        card("Total sale", format_amount(stats.total_sale_amount)),
        card("Sold items", format_number(stats.total_sold_items)),
        card("Not sold items", format_number(stats.total_not_sold_items)),
    )
}

fn render_transactions_table(transactions: &[ProductTransaction]) -> String {
    if transactions.is_empty() {
        return "<div class='bg-white p-6 rounded-lg border text-center text-gray-500'>No transactions found</div>".to_string();
    }

    let mut rows = String::new();
    for tx in transactions {
        let sold = match tx.sold {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "-",
        };
        rows.push_str(&format!(
            r#"<tr class='border-t'>
                <td class='px-3 py-2 text-gray-500'>{}</td>
                <td class='px-3 py-2 font-medium'>{}</td>
                <td class='px-3 py-2 text-gray-600'>{}</td>
                <td class='px-3 py-2 text-right'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
            </tr>"#,
            tx.id.map(|id| id.to_string()).unwrap_or_default(),
            escape_html(&tx.title),
            escape_html(&tx.description),
            tx.price.map(format_amount).unwrap_or_else(|| "-".to_string()),
            escape_html(tx.category.as_deref().unwrap_or("-")),
            sold,
        ));
    }

    format!(
        r#"<div class='bg-white rounded-lg border shadow-sm overflow-x-auto'>
            <table class='w-full text-sm'>
                <thead class='bg-gray-50 text-left'>
                    <tr><th class='px-3 py-2'>ID</th><th class='px-3 py-2'>Title</th><th class='px-3 py-2'>Description</th><th class='px-3 py-2 text-right'>Price</th><th class='px-3 py-2'>Category</th><th class='px-3 py-2'>Sold</th></tr>
                </thead>
                <tbody>{}</tbody>
            </table>
        </div>"#,
        rows
    )
}

fn render_bar_chart(bars: &[PriceRangeCount]) -> String {
    let max = bars.iter().map(|b| b.count).max().unwrap_or(0);
    let mut items = String::new();
    for bar in bars {
        let width = if max == 0 { 0 } else { bar.count * 100 / max };
        items.push_str(&format!(
            r#"<div class='flex items-center gap-2 text-sm'>
                <span class='w-24 text-gray-600'>{}</span>
                <div class='flex-1 bg-gray-100 rounded h-4'><div class='bg-indigo-500 h-4 rounded' style='width: {}%'></div></div>
                <span class='w-10 text-right'>{}</span>
            </div>"#,
            escape_html(&bar.range),
            width,
            bar.count
        ));
    }

    format!(
        r#"<div class='bg-white p-4 rounded-lg border shadow-sm space-y-2'>
            <h3 class='font-semibold mb-2'>Price ranges</h3>
            {}
        </div>"#,
        items
    )
}

fn render_pie_chart(slices: &[CategoryCount]) -> String {
    let total: u64 = slices.iter().map(|s| s.count).sum();
    let mut items = String::new();
    for slice in slices {
        let percent = if total == 0 { 0.0 } else { slice.count as f64 * 100.0 / total as f64 };
        items.push_str(&format!(
            r#"<li class='flex justify-between text-sm py-1 border-b'>
                <span>{}</span>
                <span class='text-gray-600'>{} ({:.1}%)</span>
            </li>"#,
            escape_html(slice.category.as_deref().unwrap_or("Uncategorized")),
            slice.count,
            percent
        ));
    }
    if items.is_empty() {
        items.push_str("<li class='text-sm text-gray-500'>No categories</li>");
    }

    format!(
        r#"<div class='bg-white p-4 rounded-lg border shadow-sm'>
            <h3 class='font-semibold mb-2'>Categories</h3>
            <ul>{}</ul>
        </div>"#,
        items
    )
}
