// Field normalization and the derived price-per-square-foot metric.
//
// This stage is pure: it never touches the loaded snapshot and produces a
// new table on every call, so a cached raw load stays safe to share.
use crate::types::{ListingRecord, RawRow};
use crate::util::{clean_identifier, parse_f64_safe};

/// Normalize one raw row into a [`ListingRecord`].
///
/// Every raw row, however dirty, yields exactly one record. Unparsable
/// numeric fields become `None` and the row is kept; rows are never
/// dropped at this stage. Re-normalizing already-clean data is a no-op.
pub fn normalize_row(raw: &RawRow) -> ListingRecord {
    let listing_id = clean_identifier(raw.listing_number.as_deref());
    let selling_price = parse_f64_safe(raw.selling_price.as_deref());
    let square_footage = parse_f64_safe(raw.square_footage.as_deref());
    let price_per_area = derive_price_per_area(selling_price, square_footage);
    let style_code = raw.style_code.as_deref().unwrap_or("").trim().to_string();
    ListingRecord {
        listing_id,
        selling_price,
        square_footage,
        style_code,
        price_per_area,
    }
}

/// Price per square foot, recomputed from its operands every time.
///
/// Missing operands and a zero footage both yield `None`; no NaN or
/// infinity ever reaches the aggregation stage.
pub fn derive_price_per_area(
    selling_price: Option<f64>,
    square_footage: Option<f64>,
) -> Option<f64> {
    match (selling_price, square_footage) {
        (Some(price), Some(area)) if area != 0.0 => Some(price / area),
        _ => None,
    }
}

/// Normalize a whole raw table into a new, independent listing table.
pub fn normalize_table(rows: &[RawRow]) -> Vec<ListingRecord> {
    rows.iter().map(normalize_row).collect()
}
