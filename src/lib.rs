//! Shoe-label sheet generation: expands per-size quantities into label
//! instances, paginates them onto a fixed A4 grid, and renders each cell
//! with border, product image, text block, and Code 128 barcode into a
//! saved PDF, alongside an on-screen preview model.
//!
//! This crate is everything behind a form shell's Preview and Generate
//! buttons. Collecting the field values and painting the preview stays
//! in application code.

pub mod actions;
pub mod barcode;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod notification;
pub mod output;
pub mod pagination;
pub mod render;
pub mod request;

pub use actions::{generate_labels, preview_labels, GenerateOptions, GenerateOutcome};
pub use error::{GenerateError, GenerateResult};
pub use output::OutputService;
pub use request::{LabelRequest, SizeQuantity};
