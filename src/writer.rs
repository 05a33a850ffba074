//! Writer for the exporter's text table format

use crate::error::Result;
use crate::table::{ColumnData, Table};
use std::io::Write;

/// Significant digits used for float fields
pub const FLOAT_PRECISION: usize = 12;

/// Write `table` as a `#`-prefixed header followed by one line per row
pub fn write_table<W: Write>(mut writer: W, table: &Table) -> Result<()> {
    writeln!(writer, "#{}", table.column_names().join(" "))?;

    for row in 0..table.row_count() {
        let fields: Vec<String> = table
            .columns()
            .map(|column| match &column.data {
                ColumnData::Float(values) => format_g(values[row], FLOAT_PRECISION),
                ColumnData::Categorical(values) => values[row].clone(),
            })
            .collect();
        writeln!(writer, "{}", fields.join(" "))?;
    }

    writer.flush()?;
    Ok(())
}

/// Render `value` like printf's `%.{precision}g`
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
