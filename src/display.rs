//! Presentation helpers: currency and date formatting, pagination.
//!
//! Formatting follows pt-BR conventions (`R$ 1.234,56`, `DD/MM/YYYY`).
//! None of this affects the numbers computed by [`crate::analytics`].

use crate::analytics::round_to_cents;
use crate::models::{DISPLAY_DATE_FORMAT, parse_date};

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Formats an amount as Brazilian reais, e.g. `-R$ 1.234,56`.
#[inline]
#[must_use]
pub fn format_brl(amount: f64) -> String {
    let magnitude = round_to_cents(amount.abs());
    let fixed = format!("{magnitude:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0_f64 && magnitude > 0.0_f64 {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {},{fraction}", group_thousands(whole))
}

/// Inserts `.` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let count = digits.chars().count();
    let mut grouped = String::with_capacity(count.saturating_mul(2));
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (count - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// Shows a stored date as `DD/MM/YYYY`, or verbatim if it cannot be parsed.
#[inline]
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_date(raw).map_or_else(
        || raw.to_owned(),
        |date| date.format(DISPLAY_DATE_FORMAT).to_string(),
    )
}

/// One page of a longer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'items, T> {
    /// Rows on this page.
    pub items: &'items [T],
    /// 1-based page number actually shown.
    pub number: usize,
    /// Number of pages (at least 1).
    pub total_pages: usize,
    /// Number of rows across all pages.
    pub total_items: usize,
}

/// Splits `items` into pages of `page_size` and returns page `page`.
///
/// Pages are 1-based. Out-of-range page numbers are clamped to the first or
/// last page, and a zero page size is treated as one.
#[inline]
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let total_pages = items.len().div_ceil(size).max(1);
    let number = page.clamp(1, total_pages);
    let start = (number - 1).saturating_mul(size);
    let end = start.saturating_add(size).min(items.len());
    Page {
        items: items.get(start..end).unwrap_or_default(),
        number,
        total_pages,
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_small_amounts() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(200.0), "R$ 200,00");
        assert_eq!(format_brl(-50.5), "-R$ 50,50");
    }

    #[test]
    fn brl_groups_thousands() {
        assert_eq!(format_brl(1500.0), "R$ 1.500,00");
        assert_eq!(format_brl(-1_234_567.891), "-R$ 1.234.567,89");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
    }

    #[test]
    fn brl_never_shows_negative_zero() {
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn dates_are_shown_day_first() {
        assert_eq!(format_date("2025-03-27"), "27/03/2025");
        assert_eq!(format_date("27/03/2025"), "27/03/2025");
        assert_eq!(format_date("someday"), "someday");
    }

    #[test]
    fn paginate_splits_into_pages() {
        let items: Vec<u32> = (1..=12).collect();
        let first = paginate(&items, 1, 5);
        assert_eq!(first.items, [1, 2, 3, 4, 5]);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 12);

        let last = paginate(&items, 3, 5);
        assert_eq!(last.items, [11, 12]);
    }

    #[test]
    fn paginate_clamps_page_number() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 0, 5).number, 1);
        let beyond = paginate(&items, 9, 5);
        assert_eq!(beyond.number, 2);
        assert_eq!(beyond.items, [6, 7]);
    }

    #[test]
    fn paginate_empty_list_has_one_empty_page() {
        let items: [u8; 0] = [];
        let page = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn paginate_zero_page_size() {
        let items = [10, 20];
        let page = paginate(&items, 2, 0);
        assert_eq!(page.items, [20]);
        assert_eq!(page.total_pages, 2);
    }
}
