use crate::error::Result;
use std::io::Write;

/// Header of the starter table
pub const TEMPLATE_COLUMNS: &[&str] = &[
    "FileName",
    "[MANUFAC]",
    "[LUMCAT]",
    "[LAMPCAT]",
    "[LUMINAIRE]",
    "[TEST]",
    "[TESTLAB]",
    "[TESTDATE]",
    "[ISSUEDATE]",
    "[NEARFIELD]",
    "[LAMPPOSITION]",
    "[OTHER]",
];

const TEMPLATE_EXAMPLE: &[&str] = &[
    "example_file.ies",
    "LEDFLEX",
    "C01181523",
    "LAMP123",
    "C01181523",
    "REMOVE",
    "KEEP",
    "2023-08-15",
    "2023-08-15 15:09:11",
    "",
    "0,0",
    "KEEP",
];

/// Write the starter CSV: header plus one example row.
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TEMPLATE_COLUMNS)?;
    csv.write_record(TEMPLATE_EXAMPLE)?;
    csv.flush()?;
    Ok(())
}
