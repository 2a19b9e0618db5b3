use super::{output, View};
use crate::cli::CommonArgs;
use crate::config::ProjectConfig;
use crate::filter::derive_filtered;
use crate::git::{resolve_windows, GitRepo, MonthWindow};
use crate::model::{AuthorLog, CommitDetail};
use crate::outlier::detect_outliers;
use crate::scan::process_log;
use anyhow::Context;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

pub struct ScanResult {
    pub ledger: AuthorLog,
    pub commits: Vec<CommitDetail>,
}

pub fn exec(common: CommonArgs, view: View, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let config = match common.config.as_deref() {
        Some(path) => ProjectConfig::load(path).context("Failed to load project config")?,
        None => ProjectConfig::default(),
    };

    let today = Local::now().date_naive();
    let windows = resolve_windows(common.months, common.since.as_deref(), common.until.as_deref(), today)
        .context("Failed to resolve month windows")?;

    // Keep machine-readable output free of progress noise
    let show_progress = !json && !ndjson;
    let scan = scan_repository(&repo, &config, &windows, show_progress)
        .context("Failed to scan repository history")?;

    let outliers = detect_outliers(&scan.commits);

    match view {
        View::Full => {
            if json {
                output::ledger_json(&scan.ledger, &repo, &common)?;
            } else if ndjson {
                output::ledger_ndjson(&scan.ledger)?;
            } else {
                output::ledger_table(&scan.ledger)?;
            }
        }
        View::Typical => {
            let filtered = derive_filtered(&scan.ledger, &outliers);
            if json {
                output::ledger_json(&filtered, &repo, &common)?;
            } else if ndjson {
                output::ledger_ndjson(&filtered)?;
            } else {
                output::ledger_table(&filtered)?;
            }
        }
        View::Outliers => {
            if json {
                output::outliers_json(&outliers, &repo, &common)?;
            } else if ndjson {
                output::outliers_ndjson(&outliers)?;
            } else {
                output::outliers_table(&outliers)?;
            }
        }
    }

    Ok(())
}

/// One pass over every window, sequentially. Each subprocess finishes and is
/// folded before the next starts; the ledger and commit list accumulate
/// across windows.
pub fn scan_repository(
    repo: &GitRepo,
    config: &ProjectConfig,
    windows: &[MonthWindow],
    show_progress: bool,
) -> anyhow::Result<ScanResult> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut ledger = AuthorLog::new();
    let mut commits = Vec::new();

    for window in windows {
        pb.set_message(format!("Scanning {}...", window.label()));
        let text = repo
            .log_window(window)
            .with_context(|| format!("Failed to read git log for {}", window.label()))?;
        process_log(&text, &mut ledger, &mut commits, config);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(ScanResult { ledger, commits })
}
