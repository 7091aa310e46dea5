//! Serialization and deserialization for design files.
//!
//! Implements save/load for `.bdk` design files using JSON. The shape
//! schema is the one the persistence collaborator owns: field names and
//! nesting round-trip exactly as stored
//! (`faceData.FRONT.tenons[].{x,y,w,h,depth,inset}` etc.).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use boardkit_core::error::DesignError;

use crate::document::Document;
use crate::model::Shape;

/// Design file format version.
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete design file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    pub version: String,
    pub metadata: DesignMetadata,
    pub shapes: Vec<Shape>,
}

/// Design metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl DesignFile {
    /// Builds a design file snapshot of a document.
    pub fn from_document(doc: &Document) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DesignMetadata {
                name: doc.name().to_string(),
                created: now,
                modified: now,
                description: String::new(),
            },
            shapes: doc.shapes().to_vec(),
        }
    }

    /// Applies a loaded file to a document, replacing its shape list.
    pub fn into_document(self) -> Document {
        let mut doc = Document::new(&self.metadata.name);
        doc.set_shapes(self.shapes);
        doc
    }
}

/// Saves a document to a JSON design file.
pub fn save_design(doc: &Document, path: &Path) -> Result<()> {
    let file = DesignFile::from_document(doc);
    let json = serde_json::to_string_pretty(&file).context("Failed to serialize design")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write design file: {}", path.display()))?;
    Ok(())
}

/// Loads a document from a JSON design file.
///
/// Malformed JSON or an unsupported version surfaces as an error; this is
/// the one channel where the core propagates rather than no-ops.
pub fn load_design(path: &Path) -> Result<Document> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read design file: {}", path.display()))?;
    let file: DesignFile =
        serde_json::from_str(&json).context("Failed to parse design file")?;
    if file.version != FILE_FORMAT_VERSION {
        return Err(DesignError::UnsupportedVersion {
            version: file.version,
        }
        .into());
    }
    Ok(file.into_document())
}

/// Serializes a single shape to the wire schema (for the persistence
/// collaborator's incremental writes).
pub fn shape_to_json(shape: &Shape) -> Result<String> {
    serde_json::to_string(shape).context("Failed to serialize shape")
}

/// Parses a single shape from the wire schema.
pub fn shape_from_json(json: &str) -> Result<Shape> {
    serde_json::from_str(json).context("Failed to parse shape")
}
