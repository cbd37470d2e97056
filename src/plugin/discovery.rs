use anyhow::{Context, Result, anyhow, bail};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDir {
    pub name: String,
    pub path: PathBuf,
}

impl PluginDir {
    pub fn doc_path(&self, plugin_doc: &str) -> PathBuf {
        self.path.join(plugin_doc)
    }
}

/// List the immediate subdirectories of `plugins_root`, sorted by name.
///
/// This is a plain listing: hidden and git-ignored directories are included.
pub fn discover_plugins(plugins_root: &Path) -> Result<Vec<PluginDir>> {
    if !plugins_root.is_dir() {
        bail!("plugins directory not found: {}", plugins_root.display());
    }

    let mut plugins = Vec::new();
    for entry in WalkBuilder::new(plugins_root)
        .max_depth(Some(1))
        .standard_filters(false)
        .build()
    {
        let entry =
            entry.with_context(|| format!("failed to list {}", plugins_root.display()))?;
        if entry.depth() == 0 {
            continue;
        }

        if !entry.file_type().is_some_and(|kind| kind.is_dir()) {
            continue;
        }

        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| {
                anyhow!(
                    "plugin directory name is not valid UTF-8: {}",
                    entry.path().display()
                )
            })?
            .to_string();

        plugins.push(PluginDir {
            name,
            path: entry.into_path(),
        });
    }

    plugins.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(plugins)
}
