use std::collections::BTreeMap;

use tracing::debug;

use super::domain::EarningsRecord;

/// Expand position-aligned points/credits strings into a per-fare-class table.
///
/// Both strings are whitespace separated; the points string may carry
/// thousands separators. Tokens that do not parse, and labels beyond the end of
/// either token list, earn zero rather than failing, because published rate
/// tables are frequently sparse.
pub fn parse_earning_rates<S: AsRef<str>>(
    points: &str,
    credits: &str,
    labels: &[S],
) -> BTreeMap<String, EarningsRecord> {
    let points = points.replace(',', "");
    let points = tokenize(&points);
    let credits = tokenize(credits);

    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let record = EarningsRecord {
                qantas_points: parse_or_default(points.get(index).copied()),
                status_credits: parse_or_default(credits.get(index).copied()),
            };
            (label.as_ref().to_string(), record)
        })
        .collect()
}

fn tokenize(value: &str) -> Vec<&str> {
    value.split_whitespace().collect()
}

/// Parse an integer token, treating anything unusable as zero.
pub(crate) fn parse_or_default(token: Option<&str>) -> u32 {
    match token {
        Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
            debug!(token = raw, "earning rate token is not an integer; using 0");
            0
        }),
        None => 0,
    }
}
