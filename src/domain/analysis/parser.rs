//! Parsing of provider completions into structured reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Template section headings recognized in completions.
const SECTION_HEADINGS: [&str; 8] = [
    "EXISTING SOLUTIONS REVIEW",
    "COMPARATIVE ANALYSIS TABLE",
    "INNOVATIVE SOLUTIONS",
    "RECOMMENDED SOLUTION",
    "SOFTWARE IMPLEMENTATION PLAN",
    "HARDWARE CONSIDERATIONS",
    "PRACTICAL FEASIBILITY ASSESSMENT",
    "IMPLEMENTATION ROADMAP",
];

/// A structured analysis result parsed from a provider completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The completion text as returned by the provider.
    pub raw_response: String,
    /// Recognized template sections, keyed by heading.
    pub sections: BTreeMap<String, String>,
}

impl AnalysisReport {
    /// Builds a report by parsing the raw completion text.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        ResponseParser::parse(&raw.into())
    }

    /// Returns the content of a recognized section, if present.
    pub fn section(&self, heading: &str) -> Option<&str> {
        self.sections.get(heading).map(String::as_str)
    }

    /// True when the completion contained none of the expected headings.
    pub fn is_unstructured(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Splits completion markdown into the template's sections.
///
/// Heading matching is case-insensitive and tolerant of numbering; a line
/// counts as a section boundary when it is a markdown heading (`##`/`###`)
/// containing one of the known section names.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses the completion into an [`AnalysisReport`].
    pub fn parse(response_text: &str) -> AnalysisReport {
        let mut sections: BTreeMap<String, String> = BTreeMap::new();
        let mut current_section: Option<&str> = None;
        let mut section_content: Vec<&str> = Vec::new();

        for line in response_text.lines() {
            let line = line.trim();

            let heading = if line.contains("##") {
                SECTION_HEADINGS
                    .iter()
                    .find(|h| line.to_lowercase().contains(&h.to_lowercase()))
                    .copied()
            } else {
                None
            };

            if let Some(heading) = heading {
                if let Some(previous) = current_section.take() {
                    sections.insert(previous.to_string(), section_content.join("\n"));
                }
                current_section = Some(heading);
                section_content.clear();
            } else if current_section.is_some() {
                section_content.push(line);
            }
        }

        if let Some(last) = current_section {
            sections.insert(last.to_string(), section_content.join("\n"));
        }

        AnalysisReport {
            raw_response: response_text.to_string(),
            sections,
        }
    }
}
