use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use xpl_gate::GateConfig;
use xpl_grants::GrantPolicy;

const DEFAULT_CONFIG_FILE: &str = "xpl.toml";

/// Contents of `xpl.toml`. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XplConfig {
    pub gate: GateConfig,
    pub grants: GrantPolicy,
}

impl XplConfig {
    /// Load `path`, or `./xpl.toml` when no path is given and the file
    /// exists, or the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.gate.validate()?;
        config.grants.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use xpl_types::{CostSchedule, TalentId};

    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = XplConfig::from_toml("").unwrap();
        assert_eq!(config, XplConfig::default());
        assert_eq!(config.gate.costs, CostSchedule::standard());
    }

    #[test]
    fn partial_overrides() {
        let config = XplConfig::from_toml(
            r#"
            [gate]
            stackable_talents = ["Sturdy"]

            [gate.costs]
            skill_improve_20 = 300

            [grants]
            cross_group_duplicates = true
            "#,
        )
        .unwrap();
        assert!(config.gate.stackable_talents.contains(&TalentId::new("Sturdy")));
        assert_eq!(config.gate.costs.skill_improve_20, 300);
        assert_eq!(config.gate.costs.skill_improve_10, 100);
        assert!(config.grants.cross_group_duplicates);
        assert!(!config.grants.non_stackable_talents);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(XplConfig::from_toml("[gate.costs]\nmain_step = 0\n").is_err());
        assert!(XplConfig::from_toml("[grants]\nstackable_talents = [\"\"]\n").is_err());
        assert!(XplConfig::from_toml("gate = 3").is_err());
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[grants]\nnon_stackable_talents = true\n").unwrap();

        let config = XplConfig::load(Some(&path)).unwrap();
        assert!(config.grants.non_stackable_talents);

        assert!(XplConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
