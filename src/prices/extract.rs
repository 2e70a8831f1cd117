use crate::error::ExtractionError;

use super::types::Reading;

pub const REQUIRED_FIELDS: usize = 3;

/// 要素テキスト `時刻\n燃料\nCO2` を解析する
///
/// 4行目以降は無視する。
pub fn extract(text: &str) -> Result<Reading, ExtractionError> {
    let fields: Vec<&str> = text.split('\n').collect();

    if fields.len() < REQUIRED_FIELDS {
        return Err(ExtractionError::InsufficientFields {
            found: fields.len(),
            raw: text.to_string(),
        });
    }

    Ok(Reading {
        timestamp: fields[0].trim_end_matches('\r').to_string(),
        fuel: parse_price(fields[1], 1, text)?,
        co2: parse_price(fields[2], 2, text)?,
    })
}

fn parse_price(field: &str, index: usize, raw: &str) -> Result<i64, ExtractionError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|_| ExtractionError::NonNumericField {
            field: index,
            value: field.to_string(),
            raw: raw.to_string(),
        })
}
