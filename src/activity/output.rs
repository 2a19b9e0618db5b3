use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{
    AuthorLog, BucketStats, CommitData, CommitDetail, LedgerOutput, OutlierOutput, SCHEMA_VERSION,
};
use anyhow::Result;
use chrono::Utc;
use console::style;
use serde::Serialize;

pub fn ledger_json(ledger: &AuthorLog, repo: &GitRepo, common: &CommonArgs) -> Result<()> {
    let output = LedgerOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        authors: ledger.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[derive(Serialize)]
struct LedgerRow<'a> {
    author: &'a str,
    month: &'a str,
    #[serde(flatten)]
    data: &'a CommitData,
}

pub fn ledger_ndjson(ledger: &AuthorLog) -> Result<()> {
    for (author, months) in ledger {
        for (month, data) in months {
            println!("{}", serde_json::to_string(&LedgerRow { author, month, data })?);
        }
    }
    Ok(())
}

pub fn ledger_table(ledger: &AuthorLog) -> Result<()> {
    if ledger.is_empty() {
        println!("No activity found");
        return Ok(());
    }

    println!(
        "{:<24} {:<8} {:>8} {:>9} {:>9} {:>9} {:>7} {:>7} {:>8}",
        style("Author").bold(),
        style("Month").bold(),
        style("Commits").bold(),
        style("Frontend").bold(),
        style("Backend").bold(),
        style("Infra").bold(),
        style("Tests").bold(),
        style("Others").bold(),
        style("Deleted").bold()
    );
    println!("{}", "─".repeat(96));

    for (author, months) in ledger {
        for (month, data) in months {
            println!(
                "{:<24} {:<8} {:>8} {:>9} {:>9} {:>9} {:>7} {:>7} {:>8}",
                author,
                month,
                data.commits,
                bucket_code(&data.insertions.frontend),
                bucket_code(&data.insertions.backend),
                bucket_code(&data.insertions.infra),
                data.insertions.total_tests(),
                data.insertions.others,
                data.deletions
            );
        }
    }

    Ok(())
}

fn bucket_code(bucket: &Option<BucketStats>) -> u64 {
    bucket.as_ref().map(|b| b.code).unwrap_or(0)
}

pub fn outliers_json(outliers: &[CommitDetail], repo: &GitRepo, common: &CommonArgs) -> Result<()> {
    let output = OutlierOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        commits: outliers.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn outliers_ndjson(outliers: &[CommitDetail]) -> Result<()> {
    for commit in outliers {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

pub fn outliers_table(outliers: &[CommitDetail]) -> Result<()> {
    if outliers.is_empty() {
        println!("No outlier commits found");
        return Ok(());
    }

    println!(
        "{:<12} {:<24} {:<12} {:>9} {:>9}",
        style("Hash").bold(),
        style("Author").bold(),
        style("Date").bold(),
        style("Inserted").bold(),
        style("Deleted").bold()
    );
    println!("{}", "─".repeat(70));

    for commit in outliers {
        let short_hash: String = commit.hash.chars().take(10).collect();
        println!(
            "{:<12} {:<24} {:<12} {:>9} {:>9}",
            short_hash,
            commit.author,
            commit.date,
            commit.insertions.total(),
            commit.deletions
        );
    }

    Ok(())
}
