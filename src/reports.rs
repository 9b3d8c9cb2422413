// Style partitioning, summary statistics, and report-row construction.
//
// Everything here is a pure function of the normalized table; subsets are
// borrowed views and statistics are recomputed on every render.
use crate::types::{
    AnalysisSummary, ExportRow, ListingRecord, ListingRow, StyleStats, StyleSummaryRow,
};
use crate::util::{format_number, format_opt_money, format_plain, mean_present};
use std::cmp::Ordering;

/// Split the table into one borrowed subset per target style code.
///
/// Subsets are disjoint, preserve the table's row order, and may be empty.
/// Rows matching no target land in no subset but stay in the full table.
pub fn partition_by_style<'a>(
    records: &'a [ListingRecord],
    targets: &[&str],
) -> Vec<Vec<&'a ListingRecord>> {
    let mut subsets: Vec<Vec<&ListingRecord>> = targets.iter().map(|_| Vec::new()).collect();
    for r in records {
        if let Some(pos) = targets.iter().position(|t| r.style_code == *t) {
            subsets[pos].push(r);
        }
    }
    subsets
}

/// The comparison rows in table order, i.e. every record whose style code
/// matches one of the targets, in original table order. This is the view
/// the export writes.
pub fn filtered_in_order<'a>(
    records: &'a [ListingRecord],
    targets: &[&str],
) -> Vec<&'a ListingRecord> {
    records
        .iter()
        .filter(|r| targets.iter().any(|t| r.style_code == *t))
        .collect()
}

/// Summary statistics for one style subset.
///
/// `count` is the plain row count; the means skip missing fields, so a
/// row with an unparsable price still counts as a listing but contributes
/// nothing to either average.
pub fn summarize(subset: &[&ListingRecord]) -> StyleStats {
    let prices: Vec<Option<f64>> = subset.iter().map(|r| r.selling_price).collect();
    let per_area: Vec<Option<f64>> = subset.iter().map(|r| r.price_per_area).collect();
    StyleStats {
        count: subset.len(),
        mean_price: mean_present(&prices),
        mean_price_per_area: mean_present(&per_area),
    }
}

/// Rambler premium as a percentage over the two-story mean price per
/// square foot.
///
/// `None` is the undefined sentinel: the two-story mean is missing or
/// zero, or either side has nothing to average. Never NaN, never a panic.
pub fn premium_pct(rambler: &StyleStats, two_story: &StyleStats) -> Option<f64> {
    let base = two_story.mean_price_per_area?;
    if base == 0.0 {
        return None;
    }
    let rambler_ppa = rambler.mean_price_per_area?;
    Some((rambler_ppa - base) / base * 100.0)
}

/// The two formatted rows of the comparison table.
pub fn comparison_rows(rambler: &StyleStats, two_story: &StyleStats) -> Vec<StyleSummaryRow> {
    vec![
        summary_row("Rambler", rambler),
        summary_row("2-Story", two_story),
    ]
}

fn summary_row(label: &str, stats: &StyleStats) -> StyleSummaryRow {
    StyleSummaryRow {
        home_type: label.to_string(),
        listings: stats.count,
        avg_price: format_opt_money(stats.mean_price, 0),
        avg_price_per_sqft: format_opt_money(stats.mean_price_per_area, 2),
    }
}

/// Merge the comparison subsets and sort by selling price, highest first.
/// Rows with a missing price sort last; the underlying partition order
/// keeps the result deterministic (stable sort).
pub fn sorted_by_price_desc<'a>(subsets: &[Vec<&'a ListingRecord>]) -> Vec<&'a ListingRecord> {
    let mut merged: Vec<&ListingRecord> = subsets.iter().flatten().copied().collect();
    merged.sort_by(|a, b| match (a.selling_price, b.selling_price) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    merged
}

/// Console rows for the sorted raw-data table.
pub fn listing_rows(records: &[&ListingRecord]) -> Vec<ListingRow> {
    records
        .iter()
        .map(|r| ListingRow {
            listing_id: r.listing_id.clone(),
            selling_price: format_opt_money(r.selling_price, 0),
            square_footage: match r.square_footage {
                Some(v) => format_number(v, 0),
                None => "n/a".to_string(),
            },
            style_code: r.style_code.clone(),
            price_per_sqft: format_opt_money(r.price_per_area, 2),
        })
        .collect()
}

/// Export rows in the source column layout, numerics separator-free.
/// The derived price-per-square-foot column is intentionally absent; it
/// is recomputed on reload.
pub fn export_rows(records: &[&ListingRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|r| ExportRow {
            listing_number: r.listing_id.clone(),
            selling_price: format_plain(r.selling_price),
            square_footage: format_plain(r.square_footage),
            style_code: r.style_code.clone(),
        })
        .collect()
}

pub fn analysis_summary(
    rambler: &StyleStats,
    two_story: &StyleStats,
    premium: Option<f64>,
) -> AnalysisSummary {
    AnalysisSummary {
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        rambler: rambler.clone(),
        two_story: two_story.clone(),
        rambler_premium_pct: premium,
    }
}
