use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Inserted lines for one directory type, split into production and test code.
/// `test` stays absent until a test path ever contributed to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub code: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub test: Option<u64>,
}

impl BucketStats {
    pub fn total(&self) -> u64 {
        self.code + self.test.unwrap_or(0)
    }
}

/// Inserted-line counts bucketed by taxonomy. Absence of a bucket is not the
/// same as a zero bucket: merges keep absent buckets absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertions {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frontend: Option<BucketStats>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub backend: Option<BucketStats>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub infra: Option<BucketStats>,
    pub others: u64,
}

impl Insertions {
    /// Element-wise addition. Associative and commutative, so the fold order
    /// over a commit's stat lines does not affect the result.
    pub fn merge(&self, other: &Insertions) -> Insertions {
        Insertions {
            frontend: merge_bucket(self.frontend.as_ref(), other.frontend.as_ref()),
            backend: merge_bucket(self.backend.as_ref(), other.backend.as_ref()),
            infra: merge_bucket(self.infra.as_ref(), other.infra.as_ref()),
            others: self.others + other.others,
        }
    }

    pub fn total(&self) -> u64 {
        self.others
            + self.frontend.as_ref().map(BucketStats::total).unwrap_or(0)
            + self.backend.as_ref().map(BucketStats::total).unwrap_or(0)
            + self.infra.as_ref().map(BucketStats::total).unwrap_or(0)
    }

    pub fn total_tests(&self) -> u64 {
        self.frontend.as_ref().and_then(|b| b.test).unwrap_or(0)
            + self.backend.as_ref().and_then(|b| b.test).unwrap_or(0)
            + self.infra.as_ref().and_then(|b| b.test).unwrap_or(0)
    }
}

fn merge_bucket(a: Option<&BucketStats>, b: Option<&BucketStats>) -> Option<BucketStats> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) => Some(x.clone()),
        (None, Some(y)) => Some(y.clone()),
        (Some(x), Some(y)) => Some(BucketStats {
            code: x.code + y.code,
            // A real test count from either side survives; only two absent
            // sides merge to absent.
            test: match (x.test, y.test) {
                (None, None) => None,
                (tx, ty) => Some(tx.unwrap_or(0) + ty.unwrap_or(0)),
            },
        }),
    }
}

/// One ledger cell: aggregate stats for one contributor in one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitData {
    pub commits: u64,
    pub insertions: Insertions,
    pub deletions: u64,
}

impl CommitData {
    /// Fold one finished commit into this cell.
    pub fn absorb(&mut self, insertions: &Insertions, deletions: u64) {
        self.commits += 1;
        self.insertions = self.insertions.merge(insertions);
        self.deletions += deletions;
    }
}

/// Contributor -> `YYYY-MM` -> cell. BTreeMap keeps report order stable.
pub type AuthorLog = BTreeMap<String, BTreeMap<String, CommitData>>;

/// One flat record per commit, kept alongside the ledger for outlier
/// detection and audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub insertions: Insertions,
    pub deletions: u64,
}

impl CommitDetail {
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }
}

/// Accumulator for the commit currently being scanned; discarded once the
/// commit boundary closes.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub ym: String,
    pub insertions: Insertions,
    pub deletions: u64,
}

impl CommitInfo {
    pub fn into_detail(self) -> CommitDetail {
        CommitDetail {
            hash: self.hash,
            author: self.author,
            date: self.date,
            insertions: self.insertions,
            deletions: self.deletions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub authors: AuthorLog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub commits: Vec<CommitDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn front(code: u64, test: Option<u64>) -> Insertions {
        Insertions {
            frontend: Some(BucketStats { code, test }),
            ..Default::default()
        }
    }

    #[test]
    fn merge_is_commutative() {
        let a = front(10, Some(3));
        let b = Insertions {
            backend: Some(BucketStats { code: 7, test: None }),
            others: 2,
            ..Default::default()
        };
        assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn merge_is_associative() {
        let a = front(10, Some(3));
        let b = front(5, None);
        let c = Insertions {
            infra: Some(BucketStats { code: 1, test: Some(1) }),
            others: 9,
            ..Default::default()
        };
        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn merge_keeps_absent_buckets_absent() {
        let a = Insertions { others: 1, ..Default::default() };
        let b = Insertions { others: 2, ..Default::default() };
        let merged = a.merge(&b);
        assert_eq!(merged.frontend, None);
        assert_eq!(merged.backend, None);
        assert_eq!(merged.infra, None);
        assert_eq!(merged.others, 3);
    }

    #[test]
    fn merge_takes_one_sided_bucket_verbatim() {
        let a = front(10, Some(3));
        let b = Insertions::default();
        assert_eq!(a.merge(&b).frontend, Some(BucketStats { code: 10, test: Some(3) }));
    }

    #[test]
    fn merge_preserves_one_sided_test_count() {
        let a = front(10, Some(3));
        let b = front(5, None);
        let merged = a.merge(&b);
        assert_eq!(merged.frontend, Some(BucketStats { code: 15, test: Some(3) }));
    }

    #[test]
    fn merged_test_absent_only_when_both_sides_omit_it() {
        let a = front(10, None);
        let b = front(5, None);
        assert_eq!(a.merge(&b).frontend, Some(BucketStats { code: 15, test: None }));
    }

    #[test]
    fn total_sums_every_leaf() {
        let insertions = Insertions {
            frontend: Some(BucketStats { code: 10, test: Some(3) }),
            backend: Some(BucketStats { code: 7, test: None }),
            infra: None,
            others: 5,
        };
        assert_eq!(insertions.total(), 25);
        assert_eq!(insertions.total_tests(), 3);
    }

    #[test]
    fn absorb_accumulates_cell() {
        let mut cell = CommitData::default();
        cell.absorb(&front(10, None), 4);
        cell.absorb(&front(5, Some(2)), 1);
        assert_eq!(cell.commits, 2);
        assert_eq!(cell.deletions, 5);
        assert_eq!(cell.insertions.frontend, Some(BucketStats { code: 15, test: Some(2) }));
    }
}
