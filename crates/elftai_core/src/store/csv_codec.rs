//! Record <-> CSV row codec.
//!
//! # Responsibility
//! - Read records from a row cursor until the rows run out.
//! - Write each record as its fixed group of tagged rows.
//!
//! # Invariants
//! - One record is exactly three rows: `title`, `comments`, `items`.
//! - The first field of each row is its tag; row length is otherwise free.
//! - End of data is only valid on a record boundary.

use crate::error::{CatalogError, CatalogResult};
use crate::model::record::Record;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};

const TITLE_TAG: &str = "title";
const COMMENTS_TAG: &str = "comments";
const ITEMS_TAG: &str = "items";

/// Row cursor that yields one `Record` per call.
pub struct RecordReader<R: Read> {
    rows: csv::Reader<R>,
    row: StringRecord,
    records_read: usize,
}

impl<R: Read> RecordReader<R> {
    pub fn new(source: R) -> Self {
        let rows = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);
        Self {
            rows,
            row: StringRecord::new(),
            records_read: 0,
        }
    }

    /// Reads the next record, or `None` once the rows are exhausted.
    ///
    /// # Errors
    /// - `Csv` when the underlying rows cannot be read.
    /// - `InvalidData` when the rows do not follow the record layout.
    pub fn next_record(&mut self) -> CatalogResult<Option<Record>> {
        let Some(mut head) = self.next_row()? else {
            return Ok(None);
        };
        let position = self.records_read + 1;

        self.expect_tag(&head, TITLE_TAG, position)?;
        let title = match head.get(1) {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => {
                return Err(CatalogError::InvalidData(format!(
                    "record {position} has a blank title"
                )));
            }
        };
        let aliases = head.split_off(2);

        let comments = self.tagged_row(COMMENTS_TAG, position)?;
        let items = self.tagged_row(ITEMS_TAG, position)?;

        self.records_read = position;
        Ok(Some(Record::from_parts(title, aliases, comments, items)))
    }

    /// Reads every remaining record in file order.
    pub fn read_all(&mut self) -> CatalogResult<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }

    fn next_row(&mut self) -> CatalogResult<Option<Vec<String>>> {
        if !self.rows.read_record(&mut self.row)? {
            return Ok(None);
        }
        Ok(Some(self.row.iter().map(str::to_string).collect()))
    }

    fn tagged_row(&mut self, tag: &str, position: usize) -> CatalogResult<Vec<String>> {
        let mut row = self.next_row()?.ok_or_else(|| {
            CatalogError::InvalidData(format!(
                "record {position} ends before its `{tag}` row"
            ))
        })?;
        self.expect_tag(&row, tag, position)?;
        Ok(row.split_off(1))
    }

    fn expect_tag(&self, row: &[String], tag: &str, position: usize) -> CatalogResult<()> {
        match row.first() {
            Some(found) if found == tag => Ok(()),
            Some(found) => Err(CatalogError::InvalidData(format!(
                "record {position} expected `{tag}` row, found `{found}`"
            ))),
            None => Err(CatalogError::InvalidData(format!(
                "record {position} has an empty `{tag}` row"
            ))),
        }
    }
}

/// Row sink that serializes records in their tagged layout.
pub struct RecordWriter<W: Write> {
    rows: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> Self {
        let rows = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(sink);
        Self { rows }
    }

    pub fn write(&mut self, record: &Record) -> CatalogResult<()> {
        self.rows.write_record(
            [TITLE_TAG, record.title()]
                .into_iter()
                .chain(record.aliases().iter().map(String::as_str)),
        )?;
        self.rows.write_record(
            std::iter::once(COMMENTS_TAG).chain(record.comments().iter().map(String::as_str)),
        )?;
        self.rows.write_record(
            std::iter::once(ITEMS_TAG).chain(record.items().iter().map(String::as_str)),
        )?;
        Ok(())
    }

    /// Flushes buffered rows and returns the underlying sink.
    pub fn finish(self) -> CatalogResult<W> {
        self.rows
            .into_inner()
            .map_err(|err| CatalogError::Csv(err.into_error().into()))
    }
}

/// Writes every record to `sink` and returns the flushed sink.
pub fn write_records<'a, W: Write>(
    sink: W,
    records: impl IntoIterator<Item = &'a Record>,
) -> CatalogResult<W> {
    let mut writer = RecordWriter::new(sink);
    for record in records {
        writer.write(record)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::{write_records, RecordReader};
    use crate::error::ErrorKind;
    use crate::model::record::Record;

    #[test]
    fn quoted_fields_survive_separators_and_newlines() {
        let mut record = Record::new("Foo, the \"sequel\"");
        record.add_alias("bar").unwrap();
        record.add_comment("line one\nline two");
        record.add_item("ep,1").unwrap();

        let bytes = write_records(Vec::<u8>::new(), [&record]).unwrap();
        let decoded = RecordReader::new(bytes.as_slice()).read_all().unwrap();
        assert_eq!(decoded, vec![record]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        let mut reader = RecordReader::new("".as_bytes());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn encoded_layout_uses_tagged_rows() {
        let mut record = Record::new("Foo");
        record.add_alias("bar").unwrap();
        let bytes = write_records(Vec::<u8>::new(), [&record]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "title,Foo,bar\ncomments\nitems\n");
    }

    #[test]
    fn truncated_record_is_invalid_data() {
        let mut reader = RecordReader::new("title,Foo\ncomments\n".as_bytes());
        let err = reader.next_record().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.to_string().contains("items"));
    }

    #[test]
    fn unexpected_tag_is_invalid_data() {
        let mut reader = RecordReader::new("comments,x\n".as_bytes());
        let err = reader.next_record().unwrap_err();
        assert!(err.to_string().contains("expected `title`"));
    }

    #[test]
    fn blank_title_is_invalid_data() {
        let mut reader = RecordReader::new("title,\"  \"\ncomments\nitems\n".as_bytes());
        assert!(reader.next_record().is_err());
    }
}
