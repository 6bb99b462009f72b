//! Document file output

use crate::output::document::AggregatedDocument;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the rendered document to a file
///
/// Callers are expected to check [`AggregatedDocument::is_empty`] first
/// and skip the write (surfacing a warning) when the crawl produced no
/// sections; an empty document passed here is still written faithfully.
///
/// # Arguments
///
/// * `document` - The finalized document
/// * `output_path` - Path the rendered markdown is written to
pub fn write_document(document: &AggregatedDocument, output_path: &Path) -> OutputResult<()> {
    let rendered = document.render();

    let mut file = File::create(output_path)?;
    file.write_all(rendered.as_bytes())?;

    Ok(())
}
