//! Codec generation parameters.
//!
//! Defaults can be overridden through the environment. Each variable is read
//! once per process:
//!
//! - `CARDSCAN_QR_EC_LEVEL`: `L`, `M`, `Q` or `H`
//! - `CARDSCAN_QR_MODULE_PX`: pixels per module, 3-64
//! - `CARDSCAN_QR_BORDER`: quiet zone width in modules, 0-16

use std::sync::OnceLock;

use crate::models::ECLevel;

const DEFAULT_MODULE_PX: u32 = 10;
const DEFAULT_BORDER: u32 = 4;

/// Smallest module the reader resolves reliably
pub const MIN_MODULE_PX: u32 = 3;
/// Largest module edge; keeps a version 40 raster well inside `u32`
pub const MAX_MODULE_PX: u32 = 64;
/// Widest quiet zone, in modules
pub const MAX_BORDER: u32 = 16;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_ec_level(name: &str, default: ECLevel) -> ECLevel {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<ECLevel>().ok())
        .unwrap_or(default)
}

static EC_LEVEL: OnceLock<ECLevel> = OnceLock::new();

fn env_ec_level() -> ECLevel {
    *EC_LEVEL.get_or_init(|| parse_env_ec_level("CARDSCAN_QR_EC_LEVEL", ECLevel::L))
}

static MODULE_PX: OnceLock<u32> = OnceLock::new();

fn env_module_px() -> u32 {
    *MODULE_PX
        .get_or_init(|| parse_env_u32("CARDSCAN_QR_MODULE_PX", DEFAULT_MODULE_PX).clamp(MIN_MODULE_PX, MAX_MODULE_PX))
}

static BORDER: OnceLock<u32> = OnceLock::new();

fn env_border() -> u32 {
    *BORDER.get_or_init(|| parse_env_u32("CARDSCAN_QR_BORDER", DEFAULT_BORDER).min(MAX_BORDER))
}

/// Parameters used when rendering QR symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Pixels per module edge
    pub module_px: u32,
    /// Quiet zone width in modules
    pub border: u32,
}

impl CodecConfig {
    /// Fixed defaults (level L, 10 px modules, 4-module border), ignoring the environment
    pub const fn fixed() -> Self {
        Self {
            ec_level: ECLevel::L,
            module_px: DEFAULT_MODULE_PX,
            border: DEFAULT_BORDER,
        }
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self {
            ec_level: env_ec_level(),
            module_px: env_module_px(),
            border: env_border(),
        }
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Set pixels per module, clamped to 3-64
    pub fn with_module_px(mut self, module_px: u32) -> Self {
        self.module_px = module_px.clamp(MIN_MODULE_PX, MAX_MODULE_PX);
        self
    }

    /// Set the quiet zone width in modules, at most 16
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border.min(MAX_BORDER);
        self
    }

    /// Raster edge length in pixels for a symbol of `size` modules
    pub fn image_size(&self, size: usize) -> u32 {
        (size as u32 + 2 * self.border) * self.module_px
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
