use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::BuilderConfig;
use crate::plugin::{PluginSummary, discover_plugins};
use crate::readme::render::render_sections;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Updated { plugins: usize },
    Unchanged { plugins: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate { plugins: usize },
    Stale { plugins: usize },
}

/// Regenerates the marked region of the root README from plugin docs.
#[derive(Debug, Clone)]
pub struct ReadmeBuilder {
    root: PathBuf,
    config: BuilderConfig,
}

impl ReadmeBuilder {
    pub fn new(root: impl Into<PathBuf>, config: BuilderConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn readme_path(&self) -> PathBuf {
        self.config.readme_path(&self.root)
    }

    /// File name used in user-facing messages, e.g. `README.md`.
    pub fn readme_name(&self) -> String {
        Path::new(&self.config.paths.readme)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.paths.readme.clone())
    }

    pub fn collect_summaries(&self) -> Result<Vec<PluginSummary>> {
        let plugins = discover_plugins(&self.config.plugins_path(&self.root))?;
        let mut summaries = Vec::with_capacity(plugins.len());

        for plugin in &plugins {
            let doc_path = plugin.doc_path(&self.config.paths.plugin_doc);
            let summary = PluginSummary::extract(&plugin.name, &doc_path)?;

            if summary.one_liner.is_empty() {
                tracing::warn!("plugin {}: no one-liner after title", plugin.name);
            }
            if summary.visual.is_empty() {
                tracing::warn!("plugin {}: no fenced code block", plugin.name);
            }
            tracing::debug!("extracted plugin {} from {}", plugin.name, doc_path.display());

            summaries.push(summary);
        }

        Ok(summaries)
    }

    /// Rewrite the README in place. The new content is assembled fully in
    /// memory, so any failure leaves the file untouched.
    pub fn update(&self) -> Result<BuildOutcome> {
        let readme_path = self.readme_path();
        let (current, next, plugins) = self.generate(&readme_path)?;

        if current == next {
            tracing::debug!("{} already current, skipping write", readme_path.display());
            return Ok(BuildOutcome::Unchanged { plugins });
        }

        fs::write(&readme_path, next)
            .with_context(|| format!("failed to write {}", readme_path.display()))?;
        tracing::info!("wrote {} ({plugins} plugins)", readme_path.display());

        Ok(BuildOutcome::Updated { plugins })
    }

    /// Compare the README's generated region with what `update` would write.
    pub fn check(&self) -> Result<CheckOutcome> {
        let readme_path = self.readme_path();
        let current = read_readme(&readme_path)?;
        let summaries = self.collect_summaries()?;
        let plugins = summaries.len();
        let sections = render_sections(&summaries, &self.config.link_prefix());

        let markers = &self.config.markers;
        let region = markers
            .region(&current)
            .and_then(|region| markers.ensure_absent(&sections).map(|()| region))
            .with_context(|| format!("invalid markers in {}", readme_path.display()))?;

        if region == format!("\n\n{sections}\n\n") {
            Ok(CheckOutcome::UpToDate { plugins })
        } else {
            tracing::warn!("{} generated region is stale", readme_path.display());
            Ok(CheckOutcome::Stale { plugins })
        }
    }

    fn generate(&self, readme_path: &Path) -> Result<(String, String, usize)> {
        let current = read_readme(readme_path)?;
        let summaries = self.collect_summaries()?;
        let sections = render_sections(&summaries, &self.config.link_prefix());

        let next = self
            .config
            .markers
            .splice(&current, &sections)
            .with_context(|| format!("invalid markers in {}", readme_path.display()))?;

        Ok((current, next, summaries.len()))
    }
}

fn read_readme(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
