pub mod exec;
pub mod output;

pub use exec::{exec, scan_repository, ScanResult};
pub use output::{ledger_json, ledger_ndjson, ledger_table, outliers_json, outliers_ndjson, outliers_table};

/// Which slice of the pipeline result a command renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Full,
    Typical,
    Outliers,
}
