//! Streaming CSV batch processing.
//!
//! Each input row is parsed, computed, and written out before the next one is
//! read. Rows that fail keep their place in the output with the `error` column
//! filled in, so output row N always answers input row N.

use crate::calculator::DiscountResult;
use crate::error::Result;
use crate::record::CalculationRecord;
use csv::{ReaderBuilder, Trim, Writer};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::io::{Read, Write};

/// Output CSV header.
pub const OUTPUT_HEADER: [&str; 9] = [
    "type",
    "base",
    "discount",
    "tax",
    "base_subtotal",
    "discount_subtotal",
    "tax_subtotal",
    "total",
    "error",
];

/// Runs calculation requests from CSV and writes one result row per request.
#[derive(Debug, Default)]
pub struct BatchProcessor {
    succeeded: usize,
    failed: usize,
}

impl BatchProcessor {
    /// Creates a processor with zeroed counters.
    pub fn new() -> Self {
        BatchProcessor::default()
    }

    /// Number of rows computed successfully so far.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of rows rejected so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Reads requests from `reader` and streams results to `writer`.
    ///
    /// Invalid rows are logged at warn level and reported in the `error`
    /// column. Only I/O and CSV writer failures abort the batch.
    pub fn process_csv<R: Read, W: Write>(&mut self, reader: R, writer: W) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record(OUTPUT_HEADER)?;

        for (row_idx, result) in csv_reader
            .deserialize::<CalculationRecord>()
            .enumerate()
        {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let fields = match result {
                Ok(record) => self.process_record(&record, row_num),
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    self.failed += 1;
                    failure_row(&CalculationRecord::default(), &e.to_string())
                }
            };

            csv_writer.write_record(&fields)?;
        }

        csv_writer.flush()?;
        debug!(
            "Batch finished: {} succeeded, {} failed",
            self.succeeded, self.failed
        );
        Ok(())
    }

    fn process_record(&mut self, record: &CalculationRecord, row: usize) -> Vec<String> {
        let request = match record.parse(row) {
            Ok(request) => request,
            Err(e) => {
                warn!("{}", e);
                self.failed += 1;
                return failure_row(record, &e.to_string());
            }
        };

        match request.compute() {
            Ok(result) => {
                debug!(
                    "Row {}: {} on {} gives total {}",
                    row,
                    result.discount_type(),
                    result.base(),
                    result.total()
                );
                self.succeeded += 1;
                success_row(&result)
            }
            Err(e) => {
                warn!("Row {}: {}", row, e);
                self.failed += 1;
                failure_row(record, &e.to_string())
            }
        }
    }
}

fn success_row(result: &DiscountResult) -> Vec<String> {
    let precision = result.precision() as usize;
    let amount = |value: Decimal| format!("{:.*}", precision, value);

    vec![
        result.discount_type().to_string(),
        result.base().to_string(),
        result.discount().to_string(),
        result.tax().to_string(),
        amount(result.base_subtotal()),
        amount(result.discount_subtotal()),
        amount(result.tax_subtotal()),
        amount(result.total()),
        String::new(),
    ]
}

/// Echoes the raw inputs so the failing row can be found in the output.
fn failure_row(record: &CalculationRecord, message: &str) -> Vec<String> {
    vec![
        record.discount_type.clone(),
        record.base.clone(),
        record.discount.clone(),
        record.tax.clone().unwrap_or_default(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        message.to_string(),
    ]
}
