//! The label request: entered product fields plus per-size quantities.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::FormDefaults;

/// Stock UK shoe sizes, in emission order.
pub const CANONICAL_SIZES: [&str; 6] = ["6uk", "7uk", "8uk", "9uk", "10uk", "11uk"];

/// One row of the size table. The quantity is already parsed; raw form
/// input goes through [`SizeQuantity::from_input`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeQuantity {
    pub size: String,
    pub quantity: u32,
}

impl SizeQuantity {
    pub fn new(size: impl Into<String>, quantity: u32) -> Self {
        Self {
            size: size.into(),
            quantity,
        }
    }

    pub fn from_input(size: impl Into<String>, raw_quantity: &str) -> Self {
        Self::new(size, parse_quantity(raw_quantity))
    }
}

/// Quantity parsing rule: trimmed ASCII digits make a count, everything
/// else (empty, signs, words, overflow) counts as zero. Never an error.
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return 0;
    }
    trimmed.parse().unwrap_or(0)
}

/// Everything the shell collects for one generation job. Immutable from
/// the core's point of view; preview and generate take it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub article_no: String,
    pub color: String,
    pub mrp: String,
    pub firm_name: String,
    pub address: String,
    pub marketed_by: String,
    pub contact: String,
    pub website: String,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    pub size_quantities: Vec<SizeQuantity>,
}

impl Default for LabelRequest {
    fn default() -> Self {
        Self {
            article_no: String::new(),
            color: String::new(),
            mrp: String::new(),
            firm_name: String::new(),
            address: String::new(),
            marketed_by: String::new(),
            contact: String::new(),
            website: String::new(),
            image_path: None,
            size_quantities: CANONICAL_SIZES
                .iter()
                .map(|size| SizeQuantity::new(*size, 0))
                .collect(),
        }
    }
}

impl LabelRequest {
    /// Fresh request prefilled with the configured firm identity and size
    /// list, quantities all zero.
    pub fn from_defaults(defaults: &FormDefaults) -> Self {
        Self {
            firm_name: defaults.firm_name.clone(),
            address: defaults.address.clone(),
            marketed_by: defaults.marketed_by.clone(),
            contact: defaults.contact.clone(),
            website: defaults.website.clone(),
            size_quantities: defaults
                .sizes
                .iter()
                .map(|size| SizeQuantity::new(size.clone(), 0))
                .collect(),
            ..Self::default()
        }
    }

    pub fn has_article_no(&self) -> bool {
        !self.article_no.trim().is_empty()
    }

    /// Payload encoded into each label's barcode.
    pub fn barcode_payload(&self, size: &str) -> String {
        format!("{}-{}", self.article_no, size)
    }

    /// Text lines printed in a label cell, top to bottom. The first line
    /// is set in bold by the renderer.
    pub fn printed_lines(&self, size: &str) -> Vec<String> {
        vec![
            format!("Article No: {}", self.article_no),
            format!("Color: {}", self.color),
            format!("Size: {}", size),
            format!("MRP: \u{20B9}{}", self.mrp),
            format!("Marketed by: {}", self.marketed_by),
            format!("Contact: {} | {}", self.contact, self.website),
        ]
    }

    /// Italic line near the cell bottom.
    pub fn firm_line(&self) -> String {
        format!("{} | {}", self.firm_name, self.address)
    }

    /// Text lines for one preview card, ending with the firm line. The
    /// shell joins them with newlines.
    pub fn preview_lines(&self, size: &str) -> Vec<String> {
        vec![
            format!("Article: {}", self.article_no),
            format!("Color: {}", self.color),
            format!("Size: {}", size),
            format!("MRP: \u{20B9}{}", self.mrp),
            format!("Marketed by: {}", self.marketed_by),
            format!("Contact: {}", self.contact),
            format!("Web: {}", self.website),
            self.firm_line(),
        ]
    }
}
