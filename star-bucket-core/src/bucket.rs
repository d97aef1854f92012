//! Grouping of accepted records by star value truncated to one decimal.

use std::collections::BTreeMap;
use std::fmt;

use crate::crawl::AcceptedRecord;

/// Star value truncated (never rounded) to tenths, stored as an integer count of tenths
/// so keys compare and hash exactly. `7.37` and `7.30` both key `7.3`; `7.99999` keys `7.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey(u32);

impl BucketKey {
    /// `floor(stars * 10) / 10`. Negative and non-finite input clamp to `0.0`.
    pub fn from_stars(stars: f64) -> Self {
        let tenths = (stars * 10.0).floor();
        if tenths.is_finite() && tenths > 0.0 {
            BucketKey(tenths as u32)
        } else {
            BucketKey(0)
        }
    }

    pub fn tenths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for BucketKey {
    /// Exactly one decimal place: `7.3`, `7.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Buckets keyed by [`BucketKey`]. A bucket exists only once a record lands in it, and
/// records inside a bucket keep arrival order. Iteration is ascending by key.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    inner: BTreeMap<BucketKey, Vec<AcceptedRecord>>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AcceptedRecord) {
        self.inner.entry(record.key).or_default().push(record);
    }

    pub fn get(&self, key: BucketKey) -> Option<&[AcceptedRecord]> {
        self.inner.get(&key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, &[AcceptedRecord])> {
        self.inner.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = BucketKey> + '_ {
        self.inner.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }
}

impl FromIterator<AcceptedRecord> for Buckets {
    fn from_iter<I: IntoIterator<Item = AcceptedRecord>>(iter: I) -> Self {
        let mut buckets = Buckets::new();
        for record in iter {
            buckets.push(record);
        }
        buckets
    }
}
