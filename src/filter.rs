use crate::model::{AuthorLog, BucketStats, CommitData, CommitDetail, Insertions};

/// Copy of the ledger with each outlier's contribution subtracted from its
/// `{author, month}` cell. Outliers pointing at cells the ledger never built
/// are skipped silently.
pub fn derive_filtered(ledger: &AuthorLog, outliers: &[CommitDetail]) -> AuthorLog {
    let mut filtered = ledger.clone();
    for outlier in outliers {
        let Some(cell) = filtered
            .get_mut(&outlier.author)
            .and_then(|months| months.get_mut(outlier.month()))
        else {
            continue;
        };
        subtract_commit(cell, outlier);
    }
    filtered
}

fn subtract_commit(cell: &mut CommitData, outlier: &CommitDetail) {
    cell.commits = cell.commits.saturating_sub(1);
    cell.deletions = cell.deletions.saturating_sub(outlier.deletions);
    cell.insertions = subtract_insertions(&cell.insertions, &outlier.insertions);
}

fn subtract_insertions(base: &Insertions, taken: &Insertions) -> Insertions {
    Insertions {
        frontend: subtract_bucket(base.frontend.as_ref(), taken.frontend.as_ref()),
        backend: subtract_bucket(base.backend.as_ref(), taken.backend.as_ref()),
        infra: subtract_bucket(base.infra.as_ref(), taken.infra.as_ref()),
        // `others` has no omission semantics: present even at zero.
        others: base.others.saturating_sub(taken.others),
    }
}

/// Bucket subtraction with the collapse rules: a drained `test` goes absent
/// rather than zero, and a bucket left with `code == 0` and no `test` goes
/// absent as a whole. A bucket the outlier never touched passes through
/// verbatim, presence included.
fn subtract_bucket(base: Option<&BucketStats>, taken: Option<&BucketStats>) -> Option<BucketStats> {
    let base = base?;
    let Some(taken) = taken else {
        return Some(base.clone());
    };
    let code = base.code.saturating_sub(taken.code);
    let test = base.test.and_then(|t| {
        let left = t.saturating_sub(taken.test.unwrap_or(0));
        (left > 0).then_some(left)
    });
    if code == 0 && test.is_none() {
        None
    } else {
        Some(BucketStats { code, test })
    }
}
