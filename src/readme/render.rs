use crate::plugin::PluginSummary;

/// One `### [name](link)` section: heading, one-liner, visual.
pub fn render_section(summary: &PluginSummary, link_prefix: &str) -> String {
    let name = &summary.name;
    format!(
        "### [{name}]({link_prefix}/{name}/)\n\n{}\n\n{}",
        summary.one_liner, summary.visual
    )
}

pub fn render_sections(summaries: &[PluginSummary], link_prefix: &str) -> String {
    summaries
        .iter()
        .map(|summary| render_section(summary, link_prefix))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, one_liner: &str, visual: &str) -> PluginSummary {
        PluginSummary {
            name: name.to_string(),
            one_liner: one_liner.to_string(),
            visual: visual.to_string(),
        }
    }

    #[test]
    fn section_layout() {
        let rendered = render_section(&summary("foo", "Does a thing.", "```\nART\n```"), "./plugins");
        assert_eq!(
            rendered,
            "### [foo](./plugins/foo/)\n\nDoes a thing.\n\n```\nART\n```"
        );
    }

    #[test]
    fn empty_fields_still_render_heading() {
        let rendered = render_section(&summary("bare", "", ""), "./plugins");
        assert_eq!(rendered, "### [bare](./plugins/bare/)\n\n\n\n");
    }

    #[test]
    fn sections_are_separated_by_blank_line() {
        let rendered = render_sections(
            &[summary("a", "First.", "```\n1\n```"), summary("b", "Second.", "```\n2\n```")],
            "./plugins",
        );
        assert_eq!(
            rendered,
            "### [a](./plugins/a/)\n\nFirst.\n\n```\n1\n```\n\n### [b](./plugins/b/)\n\nSecond.\n\n```\n2\n```"
        );
    }

    #[test]
    fn no_summaries_render_nothing() {
        assert_eq!(render_sections(&[], "./plugins"), "");
    }
}
