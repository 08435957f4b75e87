use crate::error::{Result, SelectorError};
use crate::selector::PixelSelector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Pixel grid input: one 8-char hex string per pixel in row-major order,
/// three color bytes plus the pixel's column index byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<String>,
}

impl ImageData {
    /// Read and validate a pixel data file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let image: ImageData = serde_json::from_str(&raw)?;
        image.validate()?;
        Ok(image)
    }

    /// Structural checks: grid dimensions, pixel count, per-pixel hex shape,
    /// column byte consistency, and selector uniqueness. A duplicate
    /// selector is rejected outright rather than silently recolored; the
    /// source image is the thing to fix.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SelectorError::InvalidPixelData(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > 256 {
            return Err(SelectorError::InvalidPixelData(format!(
                "column index must fit one byte, got width {}",
                self.width
            )));
        }
        if self.pixels.len() != self.width * self.height {
            return Err(SelectorError::InvalidPixelData(format!(
                "expected {} pixels for a {}x{} grid, got {}",
                self.width * self.height,
                self.width,
                self.height,
                self.pixels.len()
            )));
        }

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(self.pixels.len());
        for (i, value) in self.pixels.iter().enumerate() {
            let selector = PixelSelector::from_hex(i, value)?;
            let expected_column = (i % self.width) as u8;
            if selector.column() != expected_column {
                return Err(SelectorError::InvalidPixelData(format!(
                    "pixel {i} carries column byte {:#04x}, expected {:#04x}",
                    selector.column(),
                    expected_column
                )));
            }
            if let Some(&first) = seen.get(&selector.to_hex()) {
                return Err(SelectorError::DuplicatePixel {
                    selector: selector.to_hex(),
                    first,
                    second: i,
                });
            }
            seen.insert(selector.to_hex(), i);
        }
        Ok(())
    }

    /// Derive the ordered target list for a mining run. Targets are fresh
    /// every run; persisted copies in the ledger are a point-in-time mirror.
    pub fn derive_targets(&self) -> Result<Vec<PixelSelector>> {
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, value)| PixelSelector::from_hex(i, value))
            .collect()
    }

    /// Source row of the pixel at `index` in row-major order.
    pub fn source_row(&self, index: usize) -> usize {
        index / self.width
    }
}
