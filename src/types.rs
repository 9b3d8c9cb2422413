use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Style code used for single-story ("rambler") homes in the MLS extract.
pub const RAMBLER_STYLE: &str = "10 - 1 Story";
/// Style code used for two-story homes in the MLS extract.
pub const TWO_STORY_STYLE: &str = "12 - 2 Story";

/// One row of the source CSV, exactly as read. All fields are raw text;
/// cleaning happens in `normalize`. Columns beyond these four are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Listing Number")]
    pub listing_number: Option<String>,
    #[serde(rename = "Selling Price")]
    pub selling_price: Option<String>,
    #[serde(rename = "Square Footage")]
    pub square_footage: Option<String>,
    #[serde(rename = "Style Code")]
    pub style_code: Option<String>,
}

/// A normalized sold listing. `None` marks a field whose source text could
/// not be parsed; such rows stay in the table but drop out of averages.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// MLS number, kept as separator-free text. Never treated as a number:
    /// arithmetic or scientific-notation rendering would corrupt it.
    pub listing_id: String,
    pub selling_price: Option<f64>,
    pub square_footage: Option<f64>,
    pub style_code: String,
    /// Always recomputed from price and footage, never read from the source.
    pub price_per_area: Option<f64>,
}

/// Per-style summary statistics. Means exclude missing fields from both
/// numerator and denominator; an empty or all-missing subset yields `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleStats {
    pub count: usize,
    pub mean_price: Option<f64>,
    pub mean_price_per_area: Option<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct StyleSummaryRow {
    #[serde(rename = "HomeType")]
    #[tabled(rename = "HomeType")]
    pub home_type: String,
    #[serde(rename = "Listings")]
    #[tabled(rename = "Listings")]
    pub listings: usize,
    #[serde(rename = "AvgPrice")]
    #[tabled(rename = "AvgPrice")]
    pub avg_price: String,
    #[serde(rename = "AvgPricePerSqFt")]
    #[tabled(rename = "AvgPricePerSqFt")]
    pub avg_price_per_sqft: String,
}

/// Console view of one listing for the sorted raw-data table.
#[derive(Debug, Tabled, Clone)]
pub struct ListingRow {
    #[tabled(rename = "MLS #")]
    pub listing_id: String,
    #[tabled(rename = "Selling Price")]
    pub selling_price: String,
    #[tabled(rename = "Square Footage")]
    pub square_footage: String,
    #[tabled(rename = "Style Code")]
    pub style_code: String,
    #[tabled(rename = "Price/SqFt")]
    pub price_per_sqft: String,
}

/// Export view of one listing. Field names and order match the source CSV
/// so the exported file reloads through the same pipeline unchanged.
/// Numerics are written separator-free; the derived column is not exported.
#[derive(Debug, Serialize, Clone)]
pub struct ExportRow {
    #[serde(rename = "Listing Number")]
    pub listing_number: String,
    #[serde(rename = "Selling Price")]
    pub selling_price: String,
    #[serde(rename = "Square Footage")]
    pub square_footage: String,
    #[serde(rename = "Style Code")]
    pub style_code: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub generated_at: String,
    pub rambler: StyleStats,
    pub two_story: StyleStats,
    /// `null` in the JSON when the two-story denominator is unusable.
    pub rambler_premium_pct: Option<f64>,
}
