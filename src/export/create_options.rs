//! GeoTIFF creation options
//!
//! Creation options are `KEY=VALUE` strings handed to the GeoTIFF writer.
//! Keys are matched case-insensitively. Known keys have their values
//! checked; unknown keys are passed through with a warning, since writers
//! routinely accept options newer than any fixed list.

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::errors::{ExportError, ExportResult};

lazy_static! {
    static ref OPTION_PATTERN: Regex = Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*=\s*(\S(?:.*\S)?)\s*$")
        .expect("creation option pattern is a valid regex");
}

/// Suffix carried by the overview variants of creation options
const OVERVIEW_SUFFIX: &str = "_OVERVIEW";

/// Allowed values for a known key
enum OptionRule {
    Choice(&'static [&'static str]),
    IntRange(i64, i64),
    ThreadCount,
}

fn rule_for(key: &str) -> Option<OptionRule> {
    let rule = match key {
        "COMPRESS" => OptionRule::Choice(&[
            "NONE", "LZW", "PACKBITS", "DEFLATE", "JPEG", "LZMA", "ZSTD", "WEBP", "LERC",
            "LERC_DEFLATE", "LERC_ZSTD",
        ]),
        "PREDICTOR" => OptionRule::IntRange(1, 3),
        "TILED" | "SPARSE_OK" => OptionRule::Choice(&["YES", "NO", "TRUE", "FALSE", "ON", "OFF"]),
        "BLOCKXSIZE" | "BLOCKYSIZE" => OptionRule::IntRange(1, i32::MAX as i64),
        "ZLEVEL" => OptionRule::IntRange(1, 12),
        "ZSTD_LEVEL" => OptionRule::IntRange(1, 22),
        "JPEG_QUALITY" | "WEBP_LEVEL" => OptionRule::IntRange(1, 100),
        "INTERLEAVE" => OptionRule::Choice(&["BAND", "PIXEL"]),
        "BIGTIFF" => OptionRule::Choice(&["YES", "NO", "IF_NEEDED", "IF_SAFER"]),
        "PHOTOMETRIC" => OptionRule::Choice(&[
            "MINISBLACK", "MINISWHITE", "RGB", "CMYK", "YCBCR", "CIELAB", "ICCLAB", "ITULAB",
        ]),
        "PROFILE" => OptionRule::Choice(&["GDALGEOTIFF", "GEOTIFF", "BASELINE"]),
        "NUM_THREADS" => OptionRule::ThreadCount,
        _ => return None,
    };
    Some(rule)
}

/// Split "KEY=VALUE" into an upper-cased key and the trimmed value
fn split_option(option: &str) -> ExportResult<(String, String)> {
    let captures = OPTION_PATTERN.captures(option)
        .ok_or_else(|| ExportError::InvalidCreateOption(format!("'{}' is not of the form KEY=VALUE", option)))?;
    match (captures.get(1), captures.get(2)) {
        (Some(key), Some(value)) => Ok((key.as_str().to_uppercase(), value.as_str().to_string())),
        _ => Err(ExportError::InvalidCreateOption(format!("'{}' is not of the form KEY=VALUE", option))),
    }
}

/// Check a single creation option
///
/// Overview options (`COMPRESS_OVERVIEW=...`) are checked against the
/// rules of their base key.
pub fn validate_option(option: &str) -> ExportResult<()> {
    let (key, value) = split_option(option)?;
    let base_key = key.strip_suffix(OVERVIEW_SUFFIX).unwrap_or(&key);

    let rule = match rule_for(base_key) {
        Some(rule) => rule,
        None => {
            warn!("Unknown creation option {} passed through unchecked", key);
            return Ok(());
        },
    };

    let upper_value = value.to_uppercase();
    let valid = match rule {
        OptionRule::Choice(choices) => choices.contains(&upper_value.as_str()),
        OptionRule::IntRange(min, max) => value.parse::<i64>().map(|v| v >= min && v <= max).unwrap_or(false),
        OptionRule::ThreadCount => upper_value == "ALL_CPUS" || value.parse::<u32>().map(|v| v > 0).unwrap_or(false),
    };

    if valid {
        Ok(())
    } else {
        Err(ExportError::InvalidCreateOption(format!("{}: illegal value '{}'", key, value)))
    }
}

/// TIFF compression code for a COMPRESS value
pub fn compression_code(name: &str) -> Option<u16> {
    match name.trim().to_uppercase().as_str() {
        "NONE" => Some(1),
        "LZW" => Some(5),
        "JPEG" => Some(7),
        "DEFLATE" => Some(8),
        "PACKBITS" => Some(32773),
        "LZMA" => Some(34925),
        "LERC" | "LERC_DEFLATE" | "LERC_ZSTD" => Some(34887),
        "ZSTD" => Some(50000),
        "WEBP" => Some(50001),
        _ => None,
    }
}

/// Creation options group: a list of options and whether it is in use
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateOptions {
    enabled: bool,
    options: Vec<String>,
}

impl CreateOptions {
    /// Create an enabled group with the given options
    pub fn new(options: Vec<String>) -> Self {
        CreateOptions { enabled: true, options }
    }

    /// Parse a space separated profile such as "COMPRESS=LZW TILED=YES"
    pub fn from_profile(profile: &str) -> Self {
        Self::new(profile.split_whitespace().map(str::to_string).collect())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Replace the option list
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    /// Options to hand to the writer; empty while the group is disabled
    pub fn options(&self) -> Vec<String> {
        if self.enabled {
            self.options.clone()
        } else {
            Vec::new()
        }
    }

    /// Value of a key, looked up case-insensitively
    pub fn value(&self, key: &str) -> Option<String> {
        let key = key.to_uppercase();
        self.options.iter()
            .filter_map(|option| split_option(option).ok())
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Compression name and TIFF code, if a known COMPRESS option is set
    pub fn compression(&self) -> Option<(String, u16)> {
        let name = self.value("COMPRESS")?.to_uppercase();
        compression_code(&name).map(|code| (name, code))
    }

    /// Check every option plus rules spanning several options
    ///
    /// Tiled output needs block sizes that are multiples of 16.
    pub fn validate(&self) -> ExportResult<()> {
        for option in &self.options {
            validate_option(option)?;
        }

        let tiled = self.value("TILED")
            .map(|v| matches!(v.to_uppercase().as_str(), "YES" | "TRUE" | "ON"))
            .unwrap_or(false);
        if tiled {
            for key in ["BLOCKXSIZE", "BLOCKYSIZE"] {
                if let Some(size) = self.value(key).and_then(|v| v.parse::<i64>().ok()) {
                    if size % 16 != 0 {
                        return Err(ExportError::InvalidCreateOption(format!(
                            "{}={} must be a multiple of 16 for tiled output", key, size)));
                    }
                }
            }
        }

        debug!("{} creation options validated", self.options.len());
        Ok(())
    }
}
