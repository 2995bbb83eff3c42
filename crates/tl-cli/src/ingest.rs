//! Reading a schedule export into a [`Workload`].

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use tl_core::{RowParser, Workload, WorkloadBuilder};

use crate::config::InputConfig;

/// Reads and aggregates the schedule export at `path`.
pub fn read_workload(path: &Path, input: &InputConfig) -> Result<Workload> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_from(file, input).with_context(|| format!("failed to process {}", path.display()))
}

/// Like [`read_workload`] but accepts any `Read` source.
///
/// The first row that cannot be parsed aborts the whole run; the error names
/// its line number and raw content. Fields that are not valid UTF-8 are read
/// as Latin-1.
pub fn read_from<R: Read>(reader: R, input: &InputConfig) -> Result<Workload> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(input.delimiter_byte()?)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let parser = RowParser::new(input.columns, input.comment);
    let separator = input.delimiter.to_string();
    let mut builder = WorkloadBuilder::new();
    let mut skipped = 0_usize;

    for result in csv_reader.byte_records() {
        let record = result.context("failed to read schedule row")?;
        let line = record.position().map_or(0, csv::Position::line);
        let fields: Vec<Cow<'_, str>> = record.iter().map(decode_field).collect();

        let event = parser
            .parse(&fields)
            .with_context(|| format!("line {line}: {}", fields.join(&separator)))?;
        match event {
            Some(event) => builder.add(&event),
            None => skipped += 1,
        }
    }

    tracing::debug!(events = builder.event_count(), skipped, "schedule read");
    Ok(builder.finish())
}

fn decode_field(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().copied().map(char::from).collect()),
    }
}
