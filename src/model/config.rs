use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::readme::splice::Markers;

/// Overlay picked up from the repository root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "build-readme.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuilderConfig {
    pub paths: PathsConfig,
    pub markers: Markers,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub readme: String,
    pub plugins_dir: String,
    pub plugin_doc: String,
}

impl BuilderConfig {
    /// Load configuration with layering: defaults → overlay file.
    ///
    /// An explicit overlay must exist. Without one, `build-readme.toml` under
    /// `root` is merged in when present.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        let mut merged: toml::Table =
            toml::from_str(defaults).context("built-in default config is invalid")?;

        let overlay_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        if let Some(path) = overlay_path {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let overlay: toml::Table = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            tracing::debug!("merging config overlay {}", path.display());
            merge_tables(&mut merged, overlay);
        }

        let config: BuilderConfig = toml::Value::Table(merged)
            .try_into()
            .context("invalid build-readme configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn readme_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.readme)
    }

    pub fn plugins_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.plugins_dir)
    }

    /// Relative link prefix used in rendered section headings, e.g. `./plugins`.
    pub fn link_prefix(&self) -> String {
        format!("./{}", self.paths.link_dir())
    }

    fn validate(&self) -> Result<()> {
        let Markers { start, end } = &self.markers;
        if start.trim().is_empty() || end.trim().is_empty() {
            bail!("markers must not be empty");
        }
        if start.contains(end.as_str()) || end.contains(start.as_str()) {
            bail!("start and end markers must not contain one another");
        }
        let plugins_dir = &self.paths.plugins_dir;
        if plugins_dir.starts_with('/') || Path::new(plugins_dir).is_absolute() {
            bail!("paths.plugins_dir must be relative to the repository root: {plugins_dir}");
        }
        if matches!(self.paths.link_dir(), "" | ".") {
            bail!("paths.plugins_dir must name a subdirectory: {plugins_dir:?}");
        }
        if self.paths.plugin_doc.trim().is_empty() {
            bail!("paths.plugin_doc must not be empty");
        }
        Ok(())
    }
}

impl PathsConfig {
    /// `plugins_dir` without leading `./` or trailing `/`.
    fn link_dir(&self) -> &str {
        self.plugins_dir
            .trim_start_matches("./")
            .trim_end_matches('/')
    }
}

/// Recursively overlay `overlay` onto `base`; non-table values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(nested) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, nested);
                } else {
                    base.insert(key, toml::Value::Table(nested));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}
