//! User no-data ranges

use log::debug;

use crate::errors::{ExportError, ExportResult};
use crate::source::{RasterDataType, TransparentPixel};

/// Closed range of values written as no-data
///
/// A NaN bound means the cell was left empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoDataRange {
    pub min: f64,
    pub max: f64,
}

impl NoDataRange {
    pub fn new(min: f64, max: f64) -> Self {
        NoDataRange { min, max }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NoDataRow {
    from: String,
    to: String,
    /// Once "to" is edited it stops following "from"
    to_edited: bool,
}

/// Editable table of no-data ranges
///
/// Cells hold text exactly as entered. While the "to" cell of a row has
/// not been edited, typing into "from" copies the text across, so single
/// values only need to be entered once.
#[derive(Debug, Clone, PartialEq)]
pub struct NoDataTable {
    enabled: bool,
    data_type: RasterDataType,
    rows: Vec<NoDataRow>,
}

impl NoDataTable {
    /// Create an empty, disabled table for values of `data_type`
    pub fn new(data_type: RasterDataType) -> Self {
        NoDataTable {
            enabled: false,
            data_type,
            rows: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Text of the "from" and "to" cells of a row
    pub fn cells(&self, row: usize) -> Option<(&str, &str)> {
        self.rows.get(row).map(|r| (r.from.as_str(), r.to.as_str()))
    }

    /// Text shown for a value in a cell of this table's type
    ///
    /// Integers are truncated toward zero; floats use the shortest text
    /// that reads back to the same value; NaN leaves the cell empty.
    pub fn format_value(&self, value: f64) -> String {
        if value.is_nan() {
            String::new()
        } else if self.data_type.is_float() {
            format!("{}", value)
        } else {
            format!("{}", value.trunc() as i64)
        }
    }

    /// Append a row holding `min` and `max`
    pub fn add_row(&mut self, min: f64, max: f64) {
        let row = NoDataRow {
            from: self.format_value(min),
            to: self.format_value(max),
            to_edited: false,
        };
        self.rows.push(row);
    }

    /// Append an empty row
    pub fn add_empty_row(&mut self) {
        self.add_row(f64::NAN, f64::NAN);
    }

    fn check_text(&self, text: &str) -> ExportResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let valid = if self.data_type.is_float() {
            text.parse::<f64>().is_ok()
        } else {
            text.parse::<i64>().is_ok()
        };
        if valid {
            Ok(())
        } else {
            Err(ExportError::InvalidInput(format!(
                "'{}' is not a valid {} value", text, self.data_type)))
        }
    }

    fn row_mut(&mut self, row: usize) -> ExportResult<&mut NoDataRow> {
        let count = self.rows.len();
        self.rows.get_mut(row)
            .ok_or_else(|| ExportError::InvalidInput(format!("No-data row {} out of range (rows: {})", row, count)))
    }

    /// Edit the "from" cell; mirrors into "to" until that was edited
    pub fn edit_from(&mut self, row: usize, text: &str) -> ExportResult<()> {
        self.check_text(text)?;
        let r = self.row_mut(row)?;
        r.from = text.trim().to_string();
        if !r.to_edited {
            r.to = r.from.clone();
        }
        Ok(())
    }

    /// Edit the "to" cell
    pub fn edit_to(&mut self, row: usize, text: &str) -> ExportResult<()> {
        self.check_text(text)?;
        let r = self.row_mut(row)?;
        r.to = text.trim().to_string();
        r.to_edited = true;
        Ok(())
    }

    pub fn remove_row(&mut self, row: usize) -> ExportResult<()> {
        self.row_mut(row)?;
        self.rows.remove(row);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Import ranges the layer renders fully transparent
    ///
    /// Ranges covering more than one value are marked as edited so that
    /// later edits of "from" leave their upper bound alone.
    pub fn load_transparent(&mut self, pixels: &[TransparentPixel]) {
        for pixel in pixels.iter().filter(|p| p.percent_transparent == 100.0) {
            self.add_row(pixel.min, pixel.max);
            if pixel.min != pixel.max {
                if let Some(last) = self.rows.last_mut() {
                    last.to_edited = true;
                }
            }
        }
        debug!("No-data table has {} rows after loading transparency", self.rows.len());
    }

    /// Ranges to write; empty while the table is disabled
    pub fn ranges(&self) -> ExportResult<Vec<NoDataRange>> {
        if !self.enabled {
            return Ok(Vec::new());
        }

        let parse = |text: &str| -> ExportResult<f64> {
            if text.is_empty() {
                Ok(f64::NAN)
            } else {
                text.parse::<f64>()
                    .map_err(|_| ExportError::InvalidInput(format!("Invalid no-data value: {}", text)))
            }
        };

        self.rows.iter()
            .map(|r| Ok(NoDataRange::new(parse(&r.from)?, parse(&r.to)?)))
            .collect()
    }
}
