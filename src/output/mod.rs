//! Output module: document aggregation and file writing
//!
//! Pages contribute text sections in visitation order; this module owns
//! the aggregated document and persists the rendered result.

mod document;
mod writer;

pub use document::{AggregatedDocument, DocumentBuilder, Section};
pub use writer::write_document;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
