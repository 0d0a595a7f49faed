//! Plain-text rendering for CLI output.
//!
//! Pure string builders so they stay testable; the binary is the only
//! place that prints.

use crate::api::{DonationBreakdown, Donor, Paged, Politician, VoteRecord};

/// Width of the bar column in the donation chart.
const CHART_WIDTH: usize = 40;

/// Format a cent amount as dollars, e.g. `$1,234.56`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = cents / 100;
    let remainder = cents % 100;

    let mut grouped = String::new();
    let digits = dollars.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{remainder:02}")
}

fn page_footer(current_page: u32, total_pages: u32, total: u64, noun: &str) -> String {
    format!("page {current_page} of {total_pages}, {total} {noun}")
}

#[must_use]
pub fn politician_table(page: &Paged<Politician>) -> String {
    let mut out = String::new();
    for p in &page.items {
        out.push_str(&format!(
            "{:<10} {:<30} {:<2} {:<2} {}\n",
            p.id, p.name, p.state, p.party, p.chamber
        ));
    }
    out.push_str(&page_footer(
        page.current_page,
        page.total_pages,
        page.total_item_count,
        "politicians",
    ));
    out
}

#[must_use]
pub fn donor_table(page: &Paged<Donor>) -> String {
    let mut out = String::new();
    for donor in &page.items {
        out.push_str(&format!(
            "{:<12} {:<30} {:<2} {}\n",
            donor.id,
            donor.name,
            donor.state.as_deref().unwrap_or("--"),
            donor.employer.as_deref().unwrap_or(""),
        ));
    }
    out.push_str(&page_footer(
        page.current_page,
        page.total_pages,
        page.total_item_count,
        "donors",
    ));
    out
}

#[must_use]
pub fn vote_table(page: &Paged<VoteRecord>) -> String {
    let mut out = String::new();
    for vote in &page.items {
        out.push_str(&format!(
            "{}  {:<8} {:<10} {:<25} {}\n",
            vote.date,
            format!("{}{}", vote.bill_type, vote.bill_number),
            vote.position,
            vote.question,
            vote.result,
        ));
    }
    out.push_str(&page_footer(
        page.current_page,
        page.total_pages,
        page.total_item_count,
        "votes",
    ));
    out
}

/// Render the donation-by-industry breakdown as a horizontal bar chart.
#[must_use]
pub fn donation_chart(breakdown: &DonationBreakdown) -> String {
    let total = breakdown.total_cents();
    if total <= 0 || breakdown.industries.is_empty() {
        return "no itemized donations on file".to_string();
    }
    let max = breakdown
        .industries
        .iter()
        .map(|s| s.total_cents.max(0))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut out = String::new();
    for slice in &breakdown.industries {
        let cents = slice.total_cents.max(0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_len = ((cents as u128 * CHART_WIDTH as u128) / max as u128) as usize;
        #[allow(clippy::cast_precision_loss)]
        let percent = (cents as f64 / total as f64) * 100.0;
        out.push_str(&format!(
            "{:<28} {:<width$} {:>12} ({percent:>5.1}%)\n",
            slice.industry,
            "#".repeat(bar_len),
            format_cents(cents),
            width = CHART_WIDTH,
        ));
    }
    out.push_str(&format!(
        "{:<28} {:<width$} {:>12}",
        "total",
        "",
        format_cents(total),
        width = CHART_WIDTH,
    ));
    out
}
