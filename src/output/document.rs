//! Aggregated document assembly
//!
//! Pages contribute sections in visitation order; the builder collects
//! them and the finalized document renders the whole crawl as one
//! markdown text.

use url::Url;

/// One page's contribution to the aggregated output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The page the text came from
    pub url: Url,

    /// The page's converted text, non-empty by construction
    pub text: String,
}

/// Accumulates sections while the crawl runs
///
/// Owned exclusively by the orchestrator during a run. Sections keep the
/// order they were added in, which the orchestrator guarantees is
/// visitation order.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    sections: Vec<Section>,
}

impl DocumentBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section for `url` if `text` is non-empty; no-op otherwise
    pub fn add_section(&mut self, url: &Url, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.sections.push(Section {
            url: url.clone(),
            text: text.to_string(),
        });
    }

    /// Number of sections collected so far
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns whether no sections have been collected
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders the sections collected so far without consuming the builder
    ///
    /// Calling this before the crawl loop ends is legal and yields a valid
    /// partial document; streaming consumers may rely on that.
    pub fn snapshot(&self) -> String {
        render(&self.sections)
    }

    /// Consumes the builder into the immutable finalized document
    pub fn finalize(self) -> AggregatedDocument {
        AggregatedDocument {
            sections: self.sections,
        }
    }
}

/// The finalized crawl output: ordered sections, immutable
#[derive(Debug, Default)]
pub struct AggregatedDocument {
    sections: Vec<Section>,
}

impl AggregatedDocument {
    /// The sections in visitation order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns whether the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders the document as markdown
    ///
    /// Each section is introduced by a `## <url>` header line followed by
    /// the page's converted text; sections are separated by a blank line.
    pub fn render(&self) -> String {
        render(&self.sections)
    }
}

fn render(sections: &[Section]) -> String {
    let mut out = String::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n{}\n", section.url, section.text));
    }

    out
}
