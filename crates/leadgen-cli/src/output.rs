//! Terminal rendering.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use colored::Colorize;
use leadgen_application::views::Banners;
use leadgen_core::records::{AnalysisResult, Brand, Seller};
use std::process::ExitCode;

const DASH: &str = "-";

fn opt(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.trim().is_empty()).unwrap_or(DASH)
}

/// Shortens `value` to `width` characters, marking the cut with `~`.
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

/// Renders a server timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 and the naive ISO forms the API emits; anything else is
/// shown as-is.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return DASH.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Prints the banners and maps them to an exit code.
pub fn banners(banners: &Banners) -> ExitCode {
    if let Some(success) = &banners.success {
        println!("{}", success.green());
    }
    match &banners.error {
        Some(error) => {
            eprintln!("{}", error.red());
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

pub fn error(message: &str) -> ExitCode {
    eprintln!("{}", message.red());
    ExitCode::FAILURE
}

pub fn sellers_table(sellers: &[Seller]) {
    if sellers.is_empty() {
        println!("{}", "No sellers yet.".dimmed());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<8} {:<28} {:<28} {:>6} {:<12} {:<16}",
            "ID", "NAME", "EMAIL", "RATING", "STATUS", "CREATED"
        )
        .bold()
    );
    for seller in sellers {
        let rating = seller
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| DASH.to_string());
        println!(
            "{:<8} {:<28} {:<28} {:>6} {:<12} {:<16}",
            fit(&seller.id.to_string(), 8),
            fit(opt(&seller.name), 28),
            fit(opt(&seller.email), 28),
            rating,
            fit(opt(&seller.status), 12),
            format_date(seller.created_at.as_deref()),
        );
    }
}

pub fn seller_detail(seller: &Seller) {
    println!("{}", opt(&seller.name).bold());
    let rows = [
        ("ID", seller.id.to_string()),
        ("Company", opt(&seller.company_name).to_string()),
        ("Email", opt(&seller.email).to_string()),
        ("Phone", opt(&seller.phone).to_string()),
        ("Store", opt(&seller.store_url).to_string()),
        ("Location", opt(&seller.location).to_string()),
        (
            "Rating",
            match (seller.rating, seller.total_reviews) {
                (Some(r), Some(n)) => format!("{:.1} ({} reviews)", r, n),
                (Some(r), None) => format!("{:.1}", r),
                _ => DASH.to_string(),
            },
        ),
        ("Status", opt(&seller.status).to_string()),
        ("Validation", opt(&seller.validation_status).to_string()),
        ("Notes", opt(&seller.notes).to_string()),
        ("Created", format_date(seller.created_at.as_deref())),
        ("Updated", format_date(seller.updated_at.as_deref())),
    ];
    for (label, value) in rows {
        println!("  {:<11} {}", format!("{}:", label).dimmed(), value);
    }
}

pub fn brands_table(brands: &[Brand]) {
    if brands.is_empty() {
        println!("{}", "No brands yet.".dimmed());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<8} {:<24} {:<24} {:<28} {:<12} {:<16}",
            "ID", "NAME", "DOMAIN", "EMAIL", "STATUS", "CREATED"
        )
        .bold()
    );
    for brand in brands {
        println!(
            "{:<8} {:<24} {:<24} {:<28} {:<12} {:<16}",
            fit(&brand.id.to_string(), 8),
            fit(opt(&brand.name), 24),
            fit(opt(&brand.domain), 24),
            fit(opt(&brand.email), 28),
            fit(opt(&brand.status), 12),
            format_date(brand.created_at.as_deref()),
        );
    }
}

pub fn brand_detail(brand: &Brand) {
    println!("{}", opt(&brand.name).bold());
    let rows = [
        ("ID", brand.id.to_string()),
        ("Domain", opt(&brand.domain).to_string()),
        ("Email", opt(&brand.email).to_string()),
        ("Phone", opt(&brand.phone).to_string()),
        ("Industry", opt(&brand.industry).to_string()),
        ("Location", opt(&brand.location).to_string()),
        (
            "Social",
            brand.social_summary().unwrap_or_else(|| DASH.to_string()),
        ),
        ("Status", opt(&brand.status).to_string()),
        ("Validation", opt(&brand.validation_status).to_string()),
        ("Created", format_date(brand.created_at.as_deref())),
    ];
    for (label, value) in rows {
        println!("  {:<11} {}", format!("{}:", label).dimmed(), value);
    }
    if let Some(description) = brand.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!();
        println!("  {}", description);
    }
}

pub fn analysis(result: &AnalysisResult) {
    let title = result.brand_name.as_deref().unwrap_or("Analysis");
    println!("{}", title.bold());

    let verdict = result.status.to_string().replace('_', " ").to_uppercase();
    let verdict = if result.status.is_profitable() {
        verdict.green()
    } else {
        verdict.yellow()
    };
    println!("  {:<18} {}", "Verdict:".dimmed(), verdict);
    println!(
        "  {:<18} {:.1}%",
        "Profit margin:".dimmed(),
        result.profit_margin
    );
    println!(
        "  {:<18} {:.1}",
        "Competition score:".dimmed(),
        result.competition_score
    );
    if let Some(avg) = result.average_price {
        println!("  {:<18} ${:.2}", "Average price:".dimmed(), avg);
    }
    if let (Some(min), Some(max)) = (result.min_price, result.max_price) {
        println!("  {:<18} ${:.2} - ${:.2}", "Price range:".dimmed(), min, max);
    }
    if let Some(count) = result.product_count {
        println!("  {:<18} {}", "Products:".dimmed(), count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(
            format_date(Some("2024-03-01T10:15:30Z")),
            "2024-03-01 10:15"
        );
        assert_eq!(
            format_date(Some("2024-03-01T10:15:30.123456")),
            "2024-03-01 10:15"
        );
        assert_eq!(format_date(Some("2024-03-01 08:00:00")), "2024-03-01 08:00");
        assert_eq!(format_date(Some("2024-03-01")), "2024-03-01");
        assert_eq!(format_date(Some("yesterday")), "yesterday");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("  ")), "-");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("a very long seller name", 8), "a very ~");
    }
}
