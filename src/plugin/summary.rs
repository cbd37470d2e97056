use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid fenced block regex"));

/// The excerpt of one plugin's documentation that goes into the root README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSummary {
    pub name: String,
    /// First non-blank line after the `# ` title, trimmed. Empty if absent.
    pub one_liner: String,
    /// First fenced code block, fences included. Empty if absent.
    pub visual: String,
}

impl PluginSummary {
    pub fn extract(name: &str, doc_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(doc_path)
            .with_context(|| format!("failed to read plugin doc {}", doc_path.display()))?;

        Ok(Self::from_document(name, &content))
    }

    pub fn from_document(name: impl Into<String>, content: &str) -> Self {
        Self {
            name: name.into(),
            one_liner: one_liner(content).to_string(),
            visual: first_fenced_block(content).to_string(),
        }
    }
}

fn one_liner(content: &str) -> &str {
    let mut found_title = false;

    for line in content.split('\n') {
        if line.starts_with("# ") {
            found_title = true;
            continue;
        }

        let trimmed = line.trim();
        if found_title && !trimmed.is_empty() {
            return trimmed;
        }
    }

    ""
}

fn first_fenced_block(content: &str) -> &str {
    FENCED_BLOCK_RE
        .find(content)
        .map_or("", |block| block.as_str())
}
