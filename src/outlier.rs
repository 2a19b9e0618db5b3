use crate::model::CommitDetail;

/// A single commit inserting more lines than this is not typical authoring
/// activity (vendored code, generated output, bulk imports).
pub const INSERTIONS_THRESHOLD: u64 = 5000;

/// Deletions this many times the insertions mark a purge commit.
pub const DELETION_RATIO: u64 = 10;

/// Fixed-threshold rule. A zero-insertion commit is never flagged by the
/// deletion ratio, whatever its deletion count.
pub fn is_outlier(commit: &CommitDetail) -> bool {
    let inserted = commit.insertions.total();
    inserted > INSERTIONS_THRESHOLD
        || (inserted > 0 && commit.deletions >= DELETION_RATIO * inserted)
}

/// The flagged subset of the commit list, order preserved.
pub fn detect_outliers(commits: &[CommitDetail]) -> Vec<CommitDetail> {
    commits.iter().filter(|c| is_outlier(c)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Insertions;

    fn commit(hash: &str, others: u64, deletions: u64) -> CommitDetail {
        CommitDetail {
            hash: hash.to_string(),
            author: "Dana".to_string(),
            date: "2025-01-15".to_string(),
            insertions: Insertions { others, ..Default::default() },
            deletions,
        }
    }

    #[test]
    fn bulk_insertion_is_flagged() {
        assert!(is_outlier(&commit("a", 6000, 10)));
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_outlier(&commit("a", 5000, 0)));
        assert!(is_outlier(&commit("a", 5001, 0)));
    }

    #[test]
    fn purge_commit_is_flagged() {
        // 150 >= 10 * 10
        assert!(is_outlier(&commit("a", 10, 150)));
        assert!(is_outlier(&commit("a", 10, 100)));
        assert!(!is_outlier(&commit("a", 10, 99)));
    }

    #[test]
    fn zero_insertion_commits_are_never_flagged() {
        assert!(!is_outlier(&commit("a", 0, 150)));
        assert!(!is_outlier(&commit("a", 0, 0)));
    }

    #[test]
    fn detection_preserves_order() {
        let commits = vec![
            commit("a", 1, 0),
            commit("b", 9000, 0),
            commit("c", 10, 100),
            commit("d", 2, 0),
        ];
        let outliers = detect_outliers(&commits);
        let hashes: Vec<&str> = outliers.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["b", "c"]);
    }
}
