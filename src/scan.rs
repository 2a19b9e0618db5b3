use crate::classify::{classify_path, is_always_ignored};
use crate::config::ProjectConfig;
use crate::model::{AuthorLog, CommitDetail, CommitInfo, Insertions};
use chrono::NaiveDate;

/// One classified line of log output. Anything that is not a well-formed
/// commit header or numstat line is `Ignorable` — the scanner never fails on
/// garbage input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine<'a> {
    Commit(CommitHeader<'a>),
    Stat { added: u64, deleted: u64, path: &'a str },
    Ignorable,
}

/// A fully-parsed commit header. Either a line yields all of these fields or
/// it is not a commit line; no partially-populated header exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHeader<'a> {
    pub hash: &'a str,
    pub author: &'a str,
    pub date: &'a str,
}

impl<'a> CommitHeader<'a> {
    /// Calendar month of the commit, `YYYY-MM`.
    pub fn ym(&self) -> &'a str {
        &self.date[..7]
    }
}

pub fn classify_line(line: &str) -> LogLine<'_> {
    if line.is_empty() {
        return LogLine::Ignorable;
    }
    if let Some(header) = parse_commit_header(line) {
        return LogLine::Commit(header);
    }
    if let Some((added, deleted, path)) = parse_stat(line) {
        return LogLine::Stat { added, deleted, path };
    }
    LogLine::Ignorable
}

/// `<hex-hash>,<author>,<YYYY-MM-DD>`. The date is the final comma-delimited
/// field, so author names containing commas survive.
fn parse_commit_header(line: &str) -> Option<CommitHeader<'_>> {
    let (rest, date) = line.rsplit_once(',')?;
    if !is_strict_date(date) {
        return None;
    }
    let (hash, author) = rest.split_once(',')?;
    if hash.is_empty() || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    if author.is_empty() {
        return None;
    }
    Some(CommitHeader { hash, author, date })
}

fn is_strict_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// `<added>\t<deleted>\t<path>`. Binary-file markers (`-\t-\tpath`) fail the
/// integer parse and fall out as ignorable.
fn parse_stat(line: &str) -> Option<(u64, u64, &str)> {
    let mut fields = line.splitn(3, '\t');
    let added = fields.next()?.parse().ok()?;
    let deleted = fields.next()?.parse().ok()?;
    let path = fields.next()?;
    if path.is_empty() {
        return None;
    }
    Some((added, deleted, path))
}

/// Single pass over one log invocation's output, folding finished commits
/// into the ledger and the flat commit list. Called once per time slice with
/// the same accumulators, so the overall ledger is the fold across slices.
pub fn process_log(
    text: &str,
    ledger: &mut AuthorLog,
    commits: &mut Vec<CommitDetail>,
    config: &ProjectConfig,
) {
    let mut current: Option<CommitInfo> = None;

    for line in text.lines() {
        match classify_line(line) {
            LogLine::Commit(header) => {
                if let Some(done) = current.take() {
                    close_commit(done, ledger, commits);
                }
                current = Some(CommitInfo {
                    hash: header.hash.to_string(),
                    author: header.author.to_string(),
                    date: header.date.to_string(),
                    ym: header.ym().to_string(),
                    insertions: Insertions::default(),
                    deletions: 0,
                });
            }
            LogLine::Stat { added, deleted, path } => {
                // A stat line with no open commit means truncated input;
                // drop it rather than abort.
                let Some(info) = current.as_mut() else {
                    continue;
                };
                if is_always_ignored(path) {
                    continue;
                }
                let classified = classify_path(path, added, config);
                info.insertions = info.insertions.merge(&classified);
                info.deletions += deleted;
            }
            LogLine::Ignorable => {}
        }
    }

    if let Some(done) = current.take() {
        close_commit(done, ledger, commits);
    }
}

fn close_commit(info: CommitInfo, ledger: &mut AuthorLog, commits: &mut Vec<CommitDetail>) {
    let cell = ledger
        .entry(info.author.clone())
        .or_default()
        .entry(info.ym.clone())
        .or_default();
    cell.absorb(&info.insertions, info.deletions);
    commits.push(info.into_detail());
}
