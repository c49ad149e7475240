use catalog_core::{FeedViewModel, ProductDetailView, ProductRowView};
use chrono::{DateTime, TimeZone};

const TITLE_WIDTH: usize = 48;

pub fn render<Tz: TimeZone>(view: &FeedViewModel, at: &DateTime<Tz>) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = Vec::with_capacity(view.rows.len() + 2);
    let status = if view.rows.is_empty() {
        format!("[{}] {}", at.format("%H:%M:%S"), view.state_label)
    } else {
        format!(
            "[{}] {} | {} results",
            at.format("%H:%M:%S"),
            view.state_label,
            view.rows.len()
        )
    };
    lines.push(status);

    if view.loading {
        lines.push("  Searching...".to_string());
    }
    if let Some(banner) = &view.banner {
        lines.push(format!("  {banner}"));
    }
    lines.extend(view.rows.iter().map(format_row));
    lines
}

pub fn render_detail(detail: &ProductDetailView) -> Vec<String> {
    vec![
        detail.title.clone(),
        format!("  Price:     {}", detail.price),
        format!("  Available: {}", detail.available_quantity),
        format!("  Condition: {}", detail.condition),
        format!("  Link:      {}", detail.permalink),
        format!("  Image:     {}", detail.thumbnail),
    ]
}

fn format_row(row: &ProductRowView) -> String {
    format!(
        "  {pos:>3}. {title:<width$}  {price:>10}  x{qty:<4} {condition}",
        pos = row.position,
        title = truncate(&row.title, TITLE_WIDTH),
        width = TITLE_WIDTH,
        price = row.price,
        qty = row.available_quantity,
        condition = row.condition,
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
