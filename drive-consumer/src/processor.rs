use fare_core::{DriveFare, FareResult, Sample};

use crate::segmenter::DriveBatch;

/// Computes the total fare for one sealed drive batch.
///
/// Unparsable records are skipped. Returns `None` for degenerate batches
/// with fewer than two valid samples, which produce no result line.
pub fn process_batch(batch: &DriveBatch) -> Option<FareResult> {
    let mut fare = DriveFare::new();
    for record in &batch.records {
        if let Some(sample) = Sample::parse(record) {
            fare.push(sample);
        }
    }
    fare.finish()
}
