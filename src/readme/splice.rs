use serde::Deserialize;
use thiserror::Error;

/// Ways the root document can fail the marker precondition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("marker not found: {0}")]
    MissingMarker(String),
    #[error("marker appears {count} times, expected exactly once: {marker}")]
    DuplicateMarker { marker: String, count: usize },
    #[error("end marker appears before start marker")]
    MarkersOutOfOrder,
    #[error("generated content contains marker: {0}")]
    MarkerInContent(String),
}

/// The pair of sentinel strings delimiting the generated region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    /// Replace everything between the markers with `sections`, padded by a
    /// blank line on each side. Text outside the markers is kept verbatim.
    ///
    /// `sections` must not contain either marker, otherwise the output could
    /// not be spliced again.
    pub fn splice(&self, text: &str, sections: &str) -> Result<String, SpliceError> {
        let (start, end) = self.locate(text)?;
        self.ensure_absent(sections)?;
        let before = &text[..start];
        let after = &text[end + self.end.len()..];

        Ok(format!(
            "{before}{}\n\n{sections}\n\n{}{after}",
            self.start, self.end
        ))
    }

    /// Text strictly between the two markers.
    pub fn region<'a>(&self, text: &'a str) -> Result<&'a str, SpliceError> {
        let (start, end) = self.locate(text)?;
        Ok(&text[start + self.start.len()..end])
    }

    /// Reject generated content that quotes either marker.
    pub fn ensure_absent(&self, sections: &str) -> Result<(), SpliceError> {
        for marker in [&self.start, &self.end] {
            if sections.contains(marker.as_str()) {
                return Err(SpliceError::MarkerInContent(marker.clone()));
            }
        }
        Ok(())
    }

    fn locate(&self, text: &str) -> Result<(usize, usize), SpliceError> {
        let start = find_once(text, &self.start)?;
        let end = find_once(text, &self.end)?;

        if end < start + self.start.len() {
            return Err(SpliceError::MarkersOutOfOrder);
        }

        Ok((start, end))
    }
}

fn find_once(text: &str, marker: &str) -> Result<usize, SpliceError> {
    let mut hits = text.match_indices(marker).map(|(idx, _)| idx);
    let first = hits
        .next()
        .ok_or_else(|| SpliceError::MissingMarker(marker.to_string()))?;

    let extra = hits.count();
    if extra > 0 {
        return Err(SpliceError::DuplicateMarker {
            marker: marker.to_string(),
            count: extra + 1,
        });
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers {
            start: "START".to_string(),
            end: "END".to_string(),
        }
    }

    #[test]
    fn splice_replaces_old_region() {
        let sections = "### [foo](./plugins/foo/)\n\nDoes a thing.\n\n```\nART\n```";
        let out = markers().splice("A\nSTART\nold\nEND\nB", sections).unwrap();

        assert_eq!(
            out,
            "A\nSTART\n\n### [foo](./plugins/foo/)\n\nDoes a thing.\n\n```\nART\n```\n\nEND\nB"
        );
    }

    #[test]
    fn splice_with_no_sections_leaves_blank_lines() {
        let out = markers().splice("A\nSTART\nold\nEND\nB", "").unwrap();
        assert_eq!(out, "A\nSTART\n\n\n\nEND\nB");
    }

    #[test]
    fn splice_is_idempotent() {
        let markers = markers();
        let sections = "### [bar](./plugins/bar/)\n\nBars.\n\n";
        let once = markers.splice("intro\nSTART\nEND\noutro\n", sections).unwrap();
        let twice = markers.splice(&once, sections).unwrap();

        assert_eq!(once, twice);
        assert_eq!(markers.region(&once).unwrap(), format!("\n\n{sections}\n\n"));
    }

    #[test]
    fn markers_at_file_edges() {
        let out = markers().splice("STARTEND", "x").unwrap();
        assert_eq!(out, "START\n\nx\n\nEND");
    }

    #[test]
    fn missing_end_marker() {
        let err = markers().splice("A\nSTART\nold\nB", "x").unwrap_err();
        assert_eq!(err, SpliceError::MissingMarker("END".to_string()));
    }

    #[test]
    fn missing_start_marker() {
        let err = markers().region("A\nold\nEND\nB").unwrap_err();
        assert_eq!(err, SpliceError::MissingMarker("START".to_string()));
    }

    #[test]
    fn duplicate_marker() {
        let err = markers().splice("START\nEND\nEND\n", "x").unwrap_err();
        assert_eq!(
            err,
            SpliceError::DuplicateMarker {
                marker: "END".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn sections_containing_a_marker_are_rejected() {
        let markers = markers();
        let text = "A\nSTART\nold\nEND\nB";

        let err = markers.splice(text, "```\nEND\n```").unwrap_err();
        assert_eq!(err, SpliceError::MarkerInContent("END".to_string()));

        let err = markers.splice(text, "see START here").unwrap_err();
        assert_eq!(err, SpliceError::MarkerInContent("START".to_string()));
    }

    #[test]
    fn end_before_start() {
        let err = markers().splice("END\nold\nSTART\n", "x").unwrap_err();
        assert_eq!(err, SpliceError::MarkersOutOfOrder);
    }
}
