//! Parquet catalogs.
//!
//! Same layout as the published Copic color table: one row per marker with
//! `marker_name` (or `name`), `hex` and an optional `lab` list of three
//! doubles.

use bytes::Bytes;
use lab_match::{Lab, ReferenceColor};
use parquet::basic::Compression;
use parquet::data_type::{ByteArray, ByteArrayType, DoubleType};
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::file::writer::SerializedFileWriter;
use parquet::record::Field;
use parquet::schema::parser::parse_message_type;
use std::io;
use std::sync::Arc;

use super::catalog_loader::entry;
use crate::error::CatalogLoadError;

/// Leading (and trailing) magic of every Parquet file
pub const PARQUET_MAGIC: &[u8] = b"PAR1";

const CATALOG_SCHEMA: &str = "
    message catalog {
        REQUIRED BYTE_ARRAY marker_name (UTF8);
        REQUIRED BYTE_ARRAY hex (UTF8);
        OPTIONAL group lab (LIST) {
            REPEATED group list {
                OPTIONAL DOUBLE element;
            }
        }
    }
";

pub fn is_parquet(bytes: &[u8]) -> bool {
    bytes.starts_with(PARQUET_MAGIC)
}

/// Read catalog rows from a Parquet file held in memory
pub fn parse_parquet(bytes: &[u8]) -> Result<Vec<ReferenceColor>, CatalogLoadError> {
    let reader = SerializedFileReader::new(Bytes::copy_from_slice(bytes))?;

    let mut entries = Vec::new();
    for (index, row) in reader.get_row_iter(None)?.enumerate() {
        let row = row?;
        let number = index + 1;

        let mut name = None;
        let mut hex = None;
        let mut lab = None;
        for (column, field) in row.get_column_iter() {
            match (column.as_str(), field) {
                ("marker_name" | "name", Field::Str(value)) => name = Some(value.clone()),
                ("hex", Field::Str(value)) => hex = Some(value.clone()),
                ("lab", Field::ListInternal(list)) => {
                    lab = Some(lab_from_fields(number, list.elements())?)
                }
                _ => {}
            }
        }

        let (Some(name), Some(hex)) = (name, hex) else {
            return Err(CatalogLoadError::InvalidRow {
                row: number,
                message: "marker_name and hex are required".to_string(),
            });
        };
        entries.push(entry(number, name, &hex, lab)?);
    }
    Ok(entries)
}

fn lab_from_fields(row: usize, fields: &[Field]) -> Result<Lab, CatalogLoadError> {
    let values: Vec<f64> = fields
        .iter()
        .filter_map(|field| match field {
            Field::Double(v) => Some(*v),
            Field::Float(v) => Some(f64::from(*v)),
            _ => None,
        })
        .collect();

    match values[..] {
        [l, a, b] if fields.len() == 3 => Ok(Lab::new(l, a, b)),
        _ => Err(CatalogLoadError::InvalidRow {
            row,
            message: format!("lab must hold 3 numbers, got {}", fields.len()),
        }),
    }
}

/// Write entries as a Snappy-compressed Parquet file with a `lab` list column
pub fn write_catalog_parquet<W: io::Write + Send>(
    entries: &[ReferenceColor],
    writer: W,
) -> Result<W, ParquetError> {
    let schema = Arc::new(parse_message_type(CATALOG_SCHEMA)?);
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build(),
    );

    let names: Vec<ByteArray> = entries.iter().map(|e| e.name.as_str().into()).collect();
    let hexes: Vec<ByteArray> = entries.iter().map(|e| e.hex.as_str().into()).collect();
    let labs: Vec<f64> = entries
        .iter()
        .flat_map(|e| [e.lab.l, e.lab.a, e.lab.b])
        .collect();
    // Every list is present with three present elements
    let def_levels = vec![3i16; labs.len()];
    let rep_levels: Vec<i16> = entries.iter().flat_map(|_| [0i16, 1, 1]).collect();

    let mut file = SerializedFileWriter::new(writer, schema, props)?;
    let mut row_group = file.next_row_group()?;
    let mut column_index = 0;
    while let Some(mut column) = row_group.next_column()? {
        match column_index {
            0 => {
                column.typed::<ByteArrayType>().write_batch(&names, None, None)?;
            }
            1 => {
                column.typed::<ByteArrayType>().write_batch(&hexes, None, None)?;
            }
            _ => {
                column.typed::<DoubleType>().write_batch(
                    &labs,
                    Some(&def_levels[..]),
                    Some(&rep_levels[..]),
                )?;
            }
        }
        column.close()?;
        column_index += 1;
    }
    row_group.close()?;
    file.into_inner()
}
