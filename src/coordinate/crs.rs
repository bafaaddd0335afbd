//! Coordinate Reference System handling

use std::fmt;

use crate::errors::{ExportError, ExportResult};

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as u32
                } else {
                    32700 + *zone as u32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    format!("UTM Zone {}N (EPSG:{})", zone, self.epsg_code())
                } else {
                    format!("UTM Zone {}S (EPSG:{})", zone, self.epsg_code())
                }
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }

    /// Geographic systems measure resolution in degrees
    pub fn is_geographic(&self) -> bool {
        matches!(self, CoordinateSystem::WGS84)
    }

    /// Authority identifier, e.g. "EPSG:4326"
    pub fn auth_id(&self) -> String {
        format!("EPSG:{}", self.epsg_code())
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Factory for creating coordinate systems
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> ExportResult<CoordinateSystem> {
        match epsg {
            0 => Err(ExportError::InvalidInput("EPSG code 0 is not a coordinate system".to_string())),
            4326 => Ok(CoordinateSystem::WGS84),
            3857 => Ok(CoordinateSystem::WebMercator),
            32601..=32660 => Ok(CoordinateSystem::UTM((epsg - 32600) as u8, true)),
            32701..=32760 => Ok(CoordinateSystem::UTM((epsg - 32700) as u8, false)),
            32600 | 32661..=32699 | 32700 | 32761..=32799 => {
                Err(ExportError::InvalidInput(format!("Invalid UTM zone in EPSG:{}", epsg)))
            },
            _ => Ok(CoordinateSystem::Other(epsg)),
        }
    }

    /// Parse a coordinate system from a string (e.g. "EPSG:4326")
    pub fn from_string(crs_str: &str) -> ExportResult<CoordinateSystem> {
        let crs_str = crs_str.trim().to_uppercase();

        let code_str = crs_str.strip_prefix("EPSG:").unwrap_or(&crs_str);
        match code_str.trim().parse::<u32>() {
            Ok(epsg) => Self::from_epsg(epsg),
            Err(_) if crs_str.starts_with("EPSG:") => {
                Err(ExportError::InvalidInput(format!("Invalid EPSG code: {}", code_str)))
            },
            Err(_) => Err(ExportError::InvalidInput(format!("Unsupported CRS format: {}", crs_str))),
        }
    }
}
