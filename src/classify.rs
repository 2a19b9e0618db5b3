use crate::config::{DirType, ProjectConfig};
use crate::model::{BucketStats, Insertions};

/// Files that never count toward any bucket, regardless of configuration.
/// Lockfiles and generated artifacts dominate diff noise in most repos.
const ALWAYS_IGNORED_NAMES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "Gemfile.lock",
    "composer.lock",
    "go.sum",
    "CHANGELOG",
];

const GENERATED_EXTENSIONS: &[&str] = &["json", "csv", "md"];

pub fn is_always_ignored(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    if ALWAYS_IGNORED_NAMES.contains(&name) {
        return true;
    }
    match name.rsplit_once('.') {
        Some((_, ext)) => GENERATED_EXTENSIONS.iter().any(|g| ext.eq_ignore_ascii_case(g)),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    Frontend,
    Backend,
    Infra,
}

/// Evaluation order for claiming a file; first match wins. Reports are only
/// reproducible if this order never changes.
pub const CLAIM_ORDER: [DirKind; 3] = [DirKind::Frontend, DirKind::Backend, DirKind::Infra];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Code,
    Test,
}

/// A file path matches a configured path `p` iff it contains `/p/` or starts
/// with `p`. Loose on purpose: the taxonomy is a configuration-driven
/// heuristic, not a glob engine.
fn path_matches(path: &str, configured: &str) -> bool {
    path.starts_with(configured) || path.contains(&format!("/{configured}/"))
}

fn matches_any(path: &str, configured: &[String]) -> bool {
    configured.iter().any(|p| path_matches(path, p))
}

/// What one directory type claims for a file, if anything. An exclude match
/// means the type stays silent and the next one gets a look.
pub fn claim(path: &str, dir_type: &DirType) -> Option<Claim> {
    if let Some(exclude) = &dir_type.exclude {
        if matches_any(path, exclude) {
            return None;
        }
    }
    if let Some(tests) = &dir_type.tests {
        if matches_any(path, tests) {
            return Some(Claim::Test);
        }
    }
    if matches_any(path, &dir_type.paths) {
        Some(Claim::Code)
    } else {
        None
    }
}

fn dir_type<'a>(config: &'a ProjectConfig, kind: DirKind) -> Option<&'a DirType> {
    match kind {
        DirKind::Frontend => config.dir_types.frontend.as_ref(),
        DirKind::Backend => config.dir_types.backend.as_ref(),
        DirKind::Infra => config.dir_types.infra.as_ref(),
    }
}

/// Attribute one file's inserted lines to exactly one bucket.
pub fn classify_path(path: &str, added: u64, config: &ProjectConfig) -> Insertions {
    for kind in CLAIM_ORDER {
        let Some(dir_type) = dir_type(config, kind) else {
            continue;
        };
        let Some(claim) = claim(path, dir_type) else {
            continue;
        };
        let bucket = match claim {
            Claim::Code => BucketStats { code: added, test: None },
            Claim::Test => BucketStats { code: 0, test: Some(added) },
        };
        let mut insertions = Insertions::default();
        match kind {
            DirKind::Frontend => insertions.frontend = Some(bucket),
            DirKind::Backend => insertions.backend = Some(bucket),
            DirKind::Infra => insertions.infra = Some(bucket),
        }
        return insertions;
    }
    Insertions { others: added, ..Default::default() }
}
