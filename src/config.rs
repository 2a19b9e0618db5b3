use crate::error::{Result, TallyError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Taxonomy configuration for one project. Loaded once, read-only for the
/// duration of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub dir_types: DirTypes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirTypes {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frontend: Option<DirType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub backend: Option<DirType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub infra: Option<DirType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirType {
    pub paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exclude: Option<Vec<String>>,
}

impl ProjectConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ProjectConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let types = [
            ("frontend", &self.dir_types.frontend),
            ("backend", &self.dir_types.backend),
            ("infra", &self.dir_types.infra),
        ];
        for (name, dir_type) in types {
            if let Some(dir_type) = dir_type {
                if dir_type.paths.is_empty() {
                    return Err(TallyError::Config(format!(
                        "dirTypes.{name}.paths must not be empty"
                    )));
                }
            }
        }
        Ok(())
    }
}
