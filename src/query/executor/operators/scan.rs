// CSV Scan Operator
//
// Streams the data rows of a CSV file, one record per `next` call. The file
// stays open only between `init` and exhaustion or `close`.

use std::fs::File;
use std::sync::Arc;

use log::{debug, info};

use crate::catalog::{CsvSource, Table};
use crate::query::executor::operators::Operator;
use crate::query::executor::result::{QueryError, QueryResult, Row};

/// A scan operator that reads every data row of a CSV table
pub struct CsvScanOperator {
    /// Where the table is read from
    source: CsvSource,
    /// Table name as written in the FROM clause
    table_name: String,
    /// Open reader, present between init and close
    reader: Option<csv::Reader<File>>,
    /// Header of the table, loaded during init
    schema: Option<Arc<Table>>,
    /// Reused record buffer
    record: csv::StringRecord,
    /// Data rows read so far
    rows_read: usize,
}

impl CsvScanOperator {
    /// Create a new scan operator
    pub fn new(source: CsvSource, table_name: &str) -> Self {
        CsvScanOperator {
            source,
            table_name: table_name.to_string(),
            reader: None,
            schema: None,
            record: csv::StringRecord::new(),
            rows_read: 0,
        }
    }

    /// Number of data rows read since init
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    fn finish(&mut self) {
        if self.reader.take().is_some() {
            info!("scan of '{}' finished after {} row(s)", self.table_name, self.rows_read);
        }
    }
}

impl Operator for CsvScanOperator {
    fn init(&mut self) -> QueryResult<()> {
        let mut reader = self.source.open_reader(&self.table_name)?;
        let table = self.source.read_header(&self.table_name, &mut reader)?;
        info!("scan of '{}' started, {} column(s)", self.table_name, table.column_count());

        self.schema = Some(Arc::new(table));
        self.reader = Some(reader);
        self.rows_read = 0;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        let schema = self
            .schema
            .clone()
            .ok_or_else(|| QueryError::Execution("Operator not initialized".to_string()))?;

        let Some(reader) = self.reader.as_mut() else {
            // exhausted or closed
            return Ok(None);
        };

        if !reader.read_record(&mut self.record)? {
            self.finish();
            return Ok(None);
        }
        self.rows_read += 1;

        // Cells beyond the header are dropped; a short record stays short
        let values: Vec<String> = self
            .record
            .iter()
            .take(schema.column_count())
            .map(str::to_string)
            .collect();
        if values.len() < schema.column_count() {
            debug!(
                "row {} of '{}' has {} of {} cells",
                self.rows_read,
                self.table_name,
                values.len(),
                schema.column_count()
            );
        }

        Ok(Some(Row::new(schema, values)))
    }

    fn close(&mut self) -> QueryResult<()> {
        self.finish();
        Ok(())
    }

    fn schema(&self) -> QueryResult<Arc<Table>> {
        self.schema
            .clone()
            .ok_or_else(|| QueryError::Execution("Operator not initialized".to_string()))
    }
}
