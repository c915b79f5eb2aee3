//! Code 128 encoding, treated as a black box producing a bar pattern.

use barcoders::sym::code128::Code128;
use thiserror::Error;

/// Charset selector `barcoders` expects as the first character of the
/// data string. Set B covers the printable ASCII the payloads use.
const CHARSET_B: char = '\u{0181}';

pub type BarcodeResult<T> = Result<T, BarcodeError>;

#[derive(Debug, Error)]
pub enum BarcodeError {
    #[error("cannot encode {value:?} as Code 128: {reason}")]
    Unencodable { value: String, reason: String },
}

/// Encoded barcode as a left-to-right module pattern, 1 = bar, 0 = space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodePattern {
    modules: Vec<u8>,
}

impl BarcodePattern {
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Printed width for a given module width, same length unit out as in.
    pub fn width(&self, module_width: f32) -> f32 {
        self.modules.len() as f32 * module_width
    }

    /// Maximal runs of set modules as `(start_module, length)`, so each
    /// run draws as one filled rectangle.
    pub fn bar_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut current_start = None;
        for (index, module) in self.modules.iter().enumerate() {
            match (*module == 1, current_start) {
                (true, None) => current_start = Some(index),
                (false, Some(start)) => {
                    runs.push((start, index - start));
                    current_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = current_start {
            runs.push((start, self.modules.len() - start));
        }
        runs
    }
}

/// Encodes a payload such as `AX-204-8uk`. Fails on characters outside
/// the symbology; callers drop the barcode and keep the label.
pub fn encode(payload: &str) -> BarcodeResult<BarcodePattern> {
    let data = format!("{CHARSET_B}{payload}");
    let barcode = Code128::new(&data).map_err(|err| BarcodeError::Unencodable {
        value: payload.to_string(),
        reason: err.to_string(),
    })?;
    Ok(BarcodePattern {
        modules: barcode.encode(),
    })
}
