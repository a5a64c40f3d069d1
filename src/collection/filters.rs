//! Predicate builders for listing filters.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::Predicate;
use crate::api::models::OrderStatus;
use crate::enum_display_fromstr;
use crate::error::ApiError;

/// Case-insensitive substring match against one or more text fields.
///
/// An item passes when any field contains the query. A blank query passes
/// everything.
pub fn keyword<T, F>(query: &str, fields: F) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> Vec<&str> + Send + Sync + 'static,
{
    let needle = query.trim().to_lowercase();
    Box::new(move |item: &T| {
        needle.is_empty()
            || fields(item)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    })
}

/// Exact match on an identifier such as a category or type id.
pub fn equals<T, K, F>(key: F, expected: K) -> Predicate<T>
where
    T: 'static,
    K: PartialEq + Send + Sync + 'static,
    F: Fn(&T) -> Option<K> + Send + Sync + 'static,
{
    Box::new(move |item: &T| key(item).is_some_and(|k| k == expected))
}

/// Membership in a small set of values, e.g. several raw statuses.
pub fn one_of<T, K, F>(key: F, allowed: HashSet<K>) -> Predicate<T>
where
    T: 'static,
    K: Eq + Hash + Send + Sync + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    Box::new(move |item: &T| allowed.contains(&key(item)))
}

/// Price bucket boundaries.
///
/// `Low` is strictly below `low`, `Mid` is the closed range `[low, high]`,
/// `High` is strictly above `high`. Every price falls in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self {
            low: 30_000.0,
            high: 100_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBucket {
    Low,
    Mid,
    High,
}

enum_display_fromstr!(
    PriceBucket,
    ApiError::invalid_price_bucket,
    {
        Low => "low",
        Mid => "mid",
        High => "high",
    }
);

impl PriceBucket {
    pub fn of(price: f64, thresholds: &PriceThresholds) -> Self {
        if price < thresholds.low {
            PriceBucket::Low
        } else if price <= thresholds.high {
            PriceBucket::Mid
        } else {
            PriceBucket::High
        }
    }

    pub fn contains(&self, price: f64, thresholds: &PriceThresholds) -> bool {
        Self::of(price, thresholds) == *self
    }
}

pub fn price_in<T, F>(bucket: PriceBucket, thresholds: PriceThresholds, price: F) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> f64 + Send + Sync + 'static,
{
    Box::new(move |item: &T| bucket.contains(price(item), &thresholds))
}

/// User-facing groupings of raw order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Pending,
    InTransit,
    Done,
    Cancelled,
}

enum_display_fromstr!(
    StatusBucket,
    ApiError::invalid_status_bucket,
    {
        Pending => "pending",
        InTransit => "in-transit",
        Done => "done",
        Cancelled => "cancelled",
    }
);

impl StatusBucket {
    /// Bucket a raw status falls in; unrecognized statuses belong to none.
    pub fn of(status: &OrderStatus) -> Option<Self> {
        match status {
            OrderStatus::Pending
            | OrderStatus::Confirmed
            | OrderStatus::Preparing
            | OrderStatus::Ready => Some(StatusBucket::Pending),
            OrderStatus::Delivering => Some(StatusBucket::InTransit),
            OrderStatus::Delivered => Some(StatusBucket::Done),
            OrderStatus::Cancelled => Some(StatusBucket::Cancelled),
            OrderStatus::Other(_) => None,
        }
    }

    pub fn contains(&self, status: &OrderStatus) -> bool {
        Self::of(status) == Some(*self)
    }
}

/// Items whose status falls in `bucket`. Items without a status never match.
pub fn status_in<T, F>(bucket: StatusBucket, status: F) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> Option<&OrderStatus> + Send + Sync + 'static,
{
    Box::new(move |item: &T| status(item).is_some_and(|s| bucket.contains(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dish {
        name: &'static str,
        address: &'static str,
        category: Option<u64>,
        price: f64,
    }

    fn dish(name: &'static str, price: f64) -> Dish {
        Dish {
            name,
            address: "12 Lý Thường Kiệt",
            category: Some(1),
            price,
        }
    }

    #[test]
    fn test_keyword_is_case_insensitive_over_fields() {
        let pred = keyword("PIZZA", |d: &Dish| vec![d.name, d.address]);
        assert!(pred(&dish("Pizza Margherita", 1.0)));
        assert!(pred(&dish("mini pizza", 1.0)));
        assert!(!pred(&dish("Phở bò", 1.0)));

        let by_address = keyword("lý thường", |d: &Dish| vec![d.name, d.address]);
        assert!(by_address(&dish("anything", 1.0)));
    }

    #[test]
    fn test_blank_keyword_passes_all() {
        let pred = keyword("   ", |d: &Dish| vec![d.name]);
        assert!(pred(&dish("x", 1.0)));
    }

    #[test]
    fn test_equals_requires_present_key() {
        let pred = equals(|d: &Dish| d.category, 1);
        assert!(pred(&dish("a", 1.0)));

        let mut uncategorized = dish("b", 1.0);
        uncategorized.category = None;
        assert!(!pred(&uncategorized));
    }

    #[test]
    fn test_one_of() {
        let pred = one_of(|d: &Dish| d.category.unwrap_or(0), HashSet::from([1, 2]));
        assert!(pred(&dish("a", 1.0)));
    }

    #[test]
    fn test_low_bucket_is_strictly_below_threshold() {
        let thresholds = PriceThresholds {
            low: 30_000.0,
            high: 100_000.0,
        };
        let low = price_in(PriceBucket::Low, thresholds, |d: &Dish| d.price);
        let prices = [10_000.0, 30_000.0, 30_001.0, 50_000.0];
        let matched: Vec<f64> = prices
            .iter()
            .copied()
            .filter(|p| low(&dish("x", *p)))
            .collect();
        assert_eq!(matched, vec![10_000.0]);
    }

    #[test]
    fn test_buckets_partition_prices() {
        let t = PriceThresholds::default();
        assert_eq!(PriceBucket::of(29_999.0, &t), PriceBucket::Low);
        assert_eq!(PriceBucket::of(30_000.0, &t), PriceBucket::Mid);
        assert_eq!(PriceBucket::of(100_000.0, &t), PriceBucket::Mid);
        assert_eq!(PriceBucket::of(100_000.5, &t), PriceBucket::High);
    }

    #[test]
    fn test_pending_bucket_groups_statuses() {
        assert!(StatusBucket::Pending.contains(&OrderStatus::Confirmed));
        assert!(StatusBucket::Pending.contains(&OrderStatus::Preparing));
        assert!(!StatusBucket::Pending.contains(&OrderStatus::Delivered));
        assert!(!StatusBucket::Done.contains(&OrderStatus::Other("REFUNDED".to_string())));
    }

    #[test]
    fn test_status_in_predicate() {
        let orders = [
            (1, Some(OrderStatus::Ready)),
            (2, Some(OrderStatus::Delivering)),
            (3, None),
            (4, Some(OrderStatus::Pending)),
        ];
        let pending = status_in(StatusBucket::Pending, |o: &(u32, Option<OrderStatus>)| {
            o.1.as_ref()
        });
        let ids: Vec<u32> = orders.iter().filter(|o| pending(o)).map(|o| o.0).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_bucket_parsing() {
        assert_eq!("LOW".parse::<PriceBucket>().unwrap(), PriceBucket::Low);
        assert_eq!(
            "in-transit".parse::<StatusBucket>().unwrap(),
            StatusBucket::InTransit
        );
        assert!("medium".parse::<PriceBucket>().is_err());
    }
}
