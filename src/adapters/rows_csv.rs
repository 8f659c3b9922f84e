//! CSV export of condition rows.

use crate::domain::error::SigcomposeError;
use crate::domain::rows::ConditionRow;
use std::io::Write;

pub const HEADER: [&str; 4] = ["index", "operator", "indicator", "condition"];

pub fn write_rows<W: Write>(rows: &[ConditionRow], writer: W) -> Result<(), SigcomposeError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(std::io::Error::from)?;

    for (index, row) in rows.iter().enumerate() {
        let index = index.to_string();
        let operator = row.operator.map(|op| op.keyword()).unwrap_or("");
        wtr.write_record([
            index.as_str(),
            operator,
            row.indicator_id.as_deref().unwrap_or(""),
            row.condition.as_deref().unwrap_or(""),
        ])
        .map_err(std::io::Error::from)?;
    }

    wtr.flush()?;
    Ok(())
}
