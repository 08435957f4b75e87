use crate::error::{Result, SelectorError};
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

/// A 4-byte selector target derived from one pixel: three color bytes plus
/// the pixel's column index byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelSelector {
    /// Position of the pixel in row-major order within the source grid.
    pub index: usize,
    bytes: [u8; 4],
}

impl PixelSelector {
    pub fn new(index: usize, bytes: [u8; 4]) -> Self {
        Self { index, bytes }
    }

    /// Parse a selector from its 8-char hex rendering (`0x` prefix optional).
    pub fn from_hex(index: usize, value: &str) -> Result<Self> {
        let raw = value.strip_prefix("0x").unwrap_or(value);
        if raw.len() != 8 {
            return Err(SelectorError::MalformedPixel {
                index,
                value: value.to_string(),
            });
        }
        let decoded = hex::decode(raw).map_err(|_| SelectorError::MalformedPixel {
            index,
            value: value.to_string(),
        })?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&decoded);
        Ok(Self { index, bytes })
    }

    pub fn bytes(&self) -> [u8; 4] {
        self.bytes
    }

    pub fn red(&self) -> u8 {
        self.bytes[0]
    }

    pub fn green(&self) -> u8 {
        self.bytes[1]
    }

    pub fn blue(&self) -> u8 {
        self.bytes[2]
    }

    /// The column index byte (last byte of the selector).
    pub fn column(&self) -> u8 {
        self.bytes[3]
    }

    /// Full numeric value, used to rank selectors within a column.
    pub fn value(&self) -> u32 {
        u32::from_be_bytes(self.bytes)
    }

    /// 24-bit color key (`r << 16 | g << 8 | b`), the lookup key the proxy
    /// contract matches on within a column.
    pub fn color_key(&self) -> u32 {
        (u32::from(self.bytes[0]) << 16) | (u32::from(self.bytes[1]) << 8) | u32::from(self.bytes[2])
    }

    /// Lowercase hex rendering without the `0x` prefix, as stored in the
    /// cache and progress files.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// `0x`-prefixed hex rendering, as passed to the worker CLI.
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

impl fmt::Display for PixelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}

/// keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// The 4-byte function selector for a signature like `name()`.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[..4]);
    selector
}
