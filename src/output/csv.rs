//! POSIX-dialect CSV
//!
//! Every field is quoted, embedded quotes are doubled and rows end with a
//! bare `\n`.

use crate::output::OutputResult;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::io::Write;

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true);
    builder
}

/// Writes all rows to `writer` and flushes it
pub fn write_rows<'a, W, I>(writer: W, rows: I) -> OutputResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let mut wtr = writer_builder().from_writer(writer);
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders rows to a string
pub fn rows_to_string<'a, I>(rows: I) -> OutputResult<String>
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let mut buf: Vec<u8> = Vec::new();
    write_rows(&mut buf, rows)?;
    Ok(String::from_utf8(buf)?)
}

/// Parses CSV text back into rows; the first row is not treated as a header
pub fn parse_rows(text: &str) -> OutputResult<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
