//! Sort keys and comparators for listings.

use jiff::Timestamp;
use jiff::civil;
use jiff::tz::TimeZone;

use super::Comparator;
use crate::enum_display_fromstr;
use crate::error::ApiError;

/// Sort order selectable on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the order the backend returned.
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    /// Most recent first; items without a readable timestamp go last.
    Newest,
}

enum_display_fromstr!(
    SortKey,
    ApiError::invalid_sort_key,
    {
        None => "none",
        PriceAsc => "price-asc",
        PriceDesc => "price-desc",
        Newest => "newest",
    }
);

impl SortKey {
    /// Comparator for this key, given how to read price and timestamp.
    pub fn comparator<T, P, S>(self, price: P, timestamp: S) -> Option<Comparator<T>>
    where
        T: 'static,
        P: Fn(&T) -> f64 + Send + Sync + 'static,
        S: Fn(&T) -> Option<&str> + Send + Sync + 'static,
    {
        match self {
            SortKey::None => None,
            SortKey::PriceAsc => Some(price_ascending(price)),
            SortKey::PriceDesc => Some(price_descending(price)),
            SortKey::Newest => Some(newest_first(timestamp)),
        }
    }
}

pub fn price_ascending<T, P>(price: P) -> Comparator<T>
where
    T: 'static,
    P: Fn(&T) -> f64 + Send + Sync + 'static,
{
    Box::new(move |a: &T, b: &T| price(a).total_cmp(&price(b)))
}

pub fn price_descending<T, P>(price: P) -> Comparator<T>
where
    T: 'static,
    P: Fn(&T) -> f64 + Send + Sync + 'static,
{
    Box::new(move |a: &T, b: &T| price(b).total_cmp(&price(a)))
}

pub fn newest_first<T, S>(timestamp: S) -> Comparator<T>
where
    T: 'static,
    S: Fn(&T) -> Option<&str> + Send + Sync + 'static,
{
    Box::new(move |a: &T, b: &T| {
        let ta = timestamp(a).and_then(parse_timestamp);
        let tb = timestamp(b).and_then(parse_timestamp);
        // None < Some, so reversing puts unreadable timestamps last
        tb.cmp(&ta)
    })
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 instants, offset-less date-times and bare dates; the
/// latter two are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = raw.parse::<civil::DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    raw.parse::<civil::Date>()
        .ok()
        .and_then(|d| d.to_zoned(TimeZone::UTC).ok())
        .map(|z| z.timestamp())
}
