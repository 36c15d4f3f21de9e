//! OCR response model
//!
//! Mirrors the JSON shape of a document text annotation: pages contain
//! blocks, blocks contain paragraphs, paragraphs contain words and words
//! contain symbols. Every level below the page carries a bounding polygon
//! and a confidence score.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::{Detection, Point, Polygon};

/// Granularity at which detections are collected from a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Page,
    Block,
    Paragraph,
    #[default]
    Word,
    Symbol,
}

impl std::str::FromStr for FeatureType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "page" => Ok(Self::Page),
            "block" => Ok(Self::Block),
            "para" | "paragraph" => Ok(Self::Paragraph),
            "word" => Ok(Self::Word),
            "symbol" => Ok(Self::Symbol),
            other => anyhow::bail!("unknown feature type: {other}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Point>,
}

impl BoundingPoly {
    fn to_polygon(&self) -> Polygon {
        Polygon::new(self.vertices.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub confidence: f32,
}

impl Word {
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub confidence: f32,
}

impl Paragraph {
    pub fn text(&self) -> String {
        join(self.words.iter().map(Word::text), " ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub confidence: f32,
}

impl Block {
    pub fn text(&self) -> String {
        join(self.paragraphs.iter().map(Paragraph::text), " ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub bounding_box: Option<BoundingPoly>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub confidence: f32,
}

impl Page {
    pub fn text(&self) -> String {
        join(self.blocks.iter().map(Block::text), "\n")
    }

    /// Page outline; falls back to the full page rectangle
    pub fn polygon(&self) -> Polygon {
        match &self.bounding_box {
            Some(bounds) => bounds.to_polygon(),
            None => Polygon::rectangle(0, 0, self.width, self.height),
        }
    }
}

/// Full text annotation for one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
}

#[derive(Deserialize)]
struct BatchResponse {
    responses: Vec<AnnotateResponse>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseShape {
    Batch(BatchResponse),
    Single(AnnotateResponse),
}

impl TextAnnotation {
    /// Parse a saved OCR response.
    ///
    /// Accepts a batch (`{"responses": [...]}`, first entry used), a single
    /// response wrapping `fullTextAnnotation`, or a bare annotation. A
    /// response without an annotation means no text was found.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Failed to parse OCR response JSON")?;

        let is_wrapped = value.get("responses").is_some() || value.get("fullTextAnnotation").is_some();
        if !is_wrapped {
            return serde_json::from_value(value).context("Invalid text annotation");
        }

        let shape: ResponseShape =
            serde_json::from_value(value).context("Invalid OCR response structure")?;
        let response = match shape {
            ResponseShape::Batch(batch) => batch.responses.into_iter().next(),
            ResponseShape::Single(single) => Some(single),
        };

        Ok(response
            .and_then(|r| r.full_text_annotation)
            .unwrap_or_default())
    }

    /// Flatten the document into detections at the requested granularity,
    /// in document order
    pub fn collect_features(&self, feature: FeatureType) -> Vec<Detection> {
        let mut out = Vec::new();

        for page in &self.pages {
            if feature == FeatureType::Page {
                out.push(Detection::new(page.polygon(), page.text(), page.confidence));
                continue;
            }
            for block in &page.blocks {
                if feature == FeatureType::Block {
                    out.push(detection(&block.bounding_box, block.text(), block.confidence));
                    continue;
                }
                for paragraph in &block.paragraphs {
                    if feature == FeatureType::Paragraph {
                        out.push(detection(
                            &paragraph.bounding_box,
                            paragraph.text(),
                            paragraph.confidence,
                        ));
                        continue;
                    }
                    for word in &paragraph.words {
                        if feature == FeatureType::Word {
                            out.push(detection(&word.bounding_box, word.text(), word.confidence));
                            continue;
                        }
                        for symbol in &word.symbols {
                            out.push(detection(
                                &symbol.bounding_box,
                                symbol.text.clone(),
                                symbol.confidence,
                            ));
                        }
                    }
                }
            }
        }

        debug!("Collected {} {:?} features", out.len(), feature);
        out
    }
}

fn detection(bounds: &BoundingPoly, label: String, confidence: f32) -> Detection {
    Detection::new(bounds.to_polygon(), label, confidence)
}

fn join(parts: impl Iterator<Item = String>, sep: &str) -> String {
    parts.collect::<Vec<_>>().join(sep)
}
