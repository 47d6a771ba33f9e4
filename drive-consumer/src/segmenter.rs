use fare_core::{DriveId, Sample};
use tracing::warn;

/// One contiguous run of records sharing a drive id, sealed and ready for
/// fare computation. A batch is exclusively owned by the task processing it.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveBatch {
    pub drive_id: DriveId,
    pub records: Vec<String>,
}

/// Partitions the ordered input stream into contiguous same-drive runs.
///
/// Grouping is purely stream-positional: a drive id reappearing after a
/// different id has intervened starts a new batch, it is never merged into
/// the earlier one. Only the leading drive_id field is parsed here, the full
/// sample parse happens in the fare task.
#[derive(Debug, Default)]
pub struct DriveSegmenter {
    current: Option<(DriveId, Vec<String>)>,
}

impl DriveSegmenter {
    pub fn new() -> DriveSegmenter {
        DriveSegmenter { current: None }
    }

    /// Feeds one record, returning the sealed batch when the record's drive
    /// id ends the current run. Records without a parsable leading drive id
    /// are dropped.
    pub fn push(&mut self, record: String) -> Option<DriveBatch> {
        let Some(drive_id) = Sample::leading_drive_id(&record) else {
            warn!("skipping record without a parsable drive id: '{record}'");
            return None;
        };

        match self.current.take() {
            None => {
                self.current = Some((drive_id, vec![record]));
                None
            }
            Some((current_id, mut records)) if current_id == drive_id => {
                records.push(record);
                self.current = Some((current_id, records));
                None
            }
            Some((current_id, records)) => {
                self.current = Some((drive_id, vec![record]));
                Some(DriveBatch {
                    drive_id: current_id,
                    records,
                })
            }
        }
    }

    /// Seals the final accumulation at end of stream.
    pub fn finish(self) -> Option<DriveBatch> {
        self.current.map(|(drive_id, records)| DriveBatch {
            drive_id,
            records,
        })
    }
}
