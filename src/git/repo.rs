use crate::error::{Result, TallyError};
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use std::process::Command;

/// One bounded slice of history, `[start, end)`. The log command is invoked
/// once per window to keep each subprocess's output small; windows run
/// sequentially, never in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.start.year(), self.start.month())
    }
}

pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);
        if !path.join(".git").exists() {
            return Err(TallyError::Git(format!(
                "not a git repository: {}",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw log text for one window: `<hash>,<author>,<date>` headers followed
    /// by numstat lines. Merge commits and reverts are excluded at the
    /// source. A failed or unreadable subprocess is this repository's
    /// failure, not the process's.
    pub fn log_window(&self, window: &MonthWindow) -> Result<String> {
        let output = Command::new("git")
            .arg("log")
            .arg("--no-merges")
            .arg("--invert-grep")
            .arg("--grep=^Revert")
            .arg("--pretty=format:%H,%an,%as")
            .arg("--numstat")
            .arg(format!("--since={}", window.start))
            .arg(format!("--until={}", window.end))
            .current_dir(&self.path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TallyError::Git(format!(
                "git log failed in {}: {}",
                self.path.display(),
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|_| {
            TallyError::Git(format!(
                "git log produced non-UTF-8 output in {}",
                self.path.display()
            ))
        })
    }
}

/// Calendar-month windows covering `[since, until]`, oldest first, so the
/// ledger folds chronologically.
pub fn resolve_windows(
    months: u32,
    since: Option<&str>,
    until: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<MonthWindow>> {
    let until_date = match until {
        Some(u) => parse_date(u)?,
        None => today,
    };
    let since_date = match since {
        Some(s) => parse_date(s)?,
        None => months_back(until_date, months),
    };
    if since_date > until_date {
        return Err(TallyError::InvalidDate(format!(
            "since ({since_date}) is after until ({until_date})"
        )));
    }
    Ok(month_windows(since_date, until_date))
}

pub fn month_windows(since: NaiveDate, until: NaiveDate) -> Vec<MonthWindow> {
    let mut windows = Vec::new();
    let mut start = first_of_month(since);
    let last = first_of_month(until);
    while start <= last {
        let end = next_month(start);
        windows.push(MonthWindow { start, end });
        start = end;
    }
    windows
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| TallyError::InvalidDate(format!("'{input}': {e}")))
}

fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    let mut start = first_of_month(date);
    for _ in 1..months.max(1) {
        start = previous_month(start);
    }
    start
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn previous_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn windows_cover_the_lookback_oldest_first() {
        let windows = resolve_windows(3, None, None, date(2025, 3, 14)).unwrap();
        let labels: Vec<String> = windows.iter().map(|w| w.label()).collect();
        assert_eq!(labels, vec!["2025-01", "2025-02", "2025-03"]);
        assert_eq!(windows[0].start, date(2025, 1, 1));
        assert_eq!(windows[0].end, date(2025, 2, 1));
        assert_eq!(windows[2].end, date(2025, 4, 1));
    }

    #[test]
    fn windows_cross_year_boundaries() {
        let windows = resolve_windows(3, None, None, date(2025, 1, 10)).unwrap();
        let labels: Vec<String> = windows.iter().map(|w| w.label()).collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01"]);
    }

    #[test]
    fn explicit_range_overrides_lookback() {
        let windows =
            resolve_windows(6, Some("2024-05-20"), Some("2024-07-02"), date(2025, 3, 1)).unwrap();
        let labels: Vec<String> = windows.iter().map(|w| w.label()).collect();
        assert_eq!(labels, vec!["2024-05", "2024-06", "2024-07"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = resolve_windows(6, Some("2025-02-01"), Some("2025-01-01"), date(2025, 3, 1))
            .unwrap_err();
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(resolve_windows(6, Some("01/02/2025"), None, date(2025, 3, 1)).is_err());
    }

    #[test]
    fn single_month_lookback_is_one_window() {
        let windows = resolve_windows(1, None, None, date(2025, 6, 30)).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].label(), "2025-06");
    }
}
