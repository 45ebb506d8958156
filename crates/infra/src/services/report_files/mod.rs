//! Decoding of uploaded attendance report files into a plain string grid.
//!
//! Teams hands out the same report in several shapes: an .xlsx workbook, a
//! UTF-16LE tab-separated .csv, or a plain UTF-8 comma-separated file. All
//! of them funnel through [`decode_report_bytes`] so the parser above only
//! ever sees `Vec<Vec<String>>`.

use anyhow::Context;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

pub fn decode_report_bytes(bytes: &[u8], filename: &str) -> anyhow::Result<Vec<Vec<String>>> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
        return decode_workbook(bytes);
    }
    let text = decode_text(bytes);
    parse_delimited(&text)
}

fn decode_workbook(bytes: &[u8]) -> anyhow::Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .context("Unable to open attendance report workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("Attendance report workbook has no sheets")?
        .context("Unable to read attendance report sheet")?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => {
            if value.fract() == 0.0 {
                format!("{}", *value as i64)
            } else {
                value.to_string()
            }
        }
        Data::Bool(value) => if *value { "TRUE" } else { "FALSE" }.to_string(),
        // Date cells are rendered in the locale form the timestamp parser
        // accepts, duration cells as a clock string
        Data::DateTime(value) => {
            if value.is_duration() {
                value
                    .as_duration()
                    .map(|duration| {
                        let secs = duration.num_seconds();
                        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
                    })
                    .unwrap_or_default()
            } else {
                value
                    .as_datetime()
                    .map(|dt| dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
                    .unwrap_or_default()
            }
        }
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
    }
}

fn decode_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (text, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return text.into_owned();
    }
    let without_bom = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return text.to_string();
    }
    // A NUL-heavy prefix means UTF-16 without a BOM
    let probe = &bytes[..bytes.len().min(512)];
    if probe.iter().filter(|byte| **byte == 0).count() > probe.len() / 4 {
        let (text, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return text.into_owned();
    }
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(without_bom);
    text.into_owned()
}

/// Tab wins over comma on the first line carrying either. Commas show up
/// inside timestamps and titles, so a tie goes to tab as well.
fn sniff_delimiter(text: &str) -> u8 {
    for line in text.lines() {
        let tabs = line.matches('\t').count();
        let commas = line.matches(',').count();
        if tabs == 0 && commas == 0 {
            continue;
        }
        return if tabs >= commas { b'\t' } else { b',' };
    }
    b','
}

fn parse_delimited(text: &str) -> anyhow::Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(text))
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed row in attendance report")?;
        rows.push(record.iter().map(|value| value.to_string()).collect());
    }
    Ok(rows)
}
