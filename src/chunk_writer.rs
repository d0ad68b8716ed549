use std::fs;
use std::path::{Path, PathBuf};
use std::slice;

use log::info;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::CleanError;
use crate::source::Record;

/// Indentation used for every emitted artifact.
const INDENT: &[u8] = b"    ";

/// What one closed chunk became on disk.
#[derive(Clone, Debug)]
pub struct ArtifactSummary {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: usize,
}

/// Serialize `value` pretty-printed with the artifact indentation.
fn to_pretty_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CleanError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Byte cost of one record, measured with the exact output formatter as a
/// one-element artifact array. Array context matters: every line of the
/// record picks up one indent level inside an artifact, so measuring the
/// bare record would undercount and let artifacts drift past the ceiling.
/// Summed costs always bound the real artifact size from above.
pub fn record_cost(record: &Record) -> Result<usize, CleanError> {
    Ok(to_pretty_vec(slice::from_ref(record))?.len())
}

/// Partitions a record sequence into chunks honoring a byte ceiling and
/// writes each chunk as `{stem}_{index}.json` under `folder`.
///
/// Greedy and single-pass: a chunk is closed as soon as the next record
/// would push it past the ceiling. A record bigger than the ceiling on its
/// own is never split; it lands alone in its own chunk, over the ceiling.
pub struct ChunkWriter<'a> {
    folder: &'a Path,
    stem: &'a str,
    max_bytes: usize,
    chunk: Vec<Record>,
    chunk_bytes: usize,
    index: usize,
    written: Vec<ArtifactSummary>,
}

impl<'a> ChunkWriter<'a> {
    pub fn new(folder: &'a Path, stem: &'a str, max_bytes: usize) -> Self {
        Self {
            folder,
            stem,
            max_bytes,
            chunk: Vec::new(),
            chunk_bytes: 0,
            index: 1,
            written: Vec::new(),
        }
    }

    /// Add one record, closing the current chunk first if the record would
    /// push it past the ceiling.
    pub fn push(&mut self, record: Record) -> Result<(), CleanError> {
        let record_bytes = record_cost(&record)?;
        if self.chunk_bytes + record_bytes > self.max_bytes && !self.chunk.is_empty() {
            self.close_chunk()?;
        }
        self.chunk_bytes += record_bytes;
        self.chunk.push(record);
        Ok(())
    }

    /// Flush the trailing chunk and return a summary per written artifact.
    pub fn finish(mut self) -> Result<Vec<ArtifactSummary>, CleanError> {
        if !self.chunk.is_empty() {
            self.close_chunk()?;
        }
        Ok(self.written)
    }

    fn close_chunk(&mut self) -> Result<(), CleanError> {
        let path = self
            .folder
            .join(format!("{}_{}.json", self.stem, self.index));
        let bytes = to_pretty_vec(&self.chunk)?;
        fs::write(&path, &bytes).map_err(|source| CleanError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Written {} records to {}", self.chunk.len(), path.display());

        self.written.push(ArtifactSummary {
            path,
            records: self.chunk.len(),
            bytes: bytes.len(),
        });
        self.index += 1;
        self.chunk.clear();
        self.chunk_bytes = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::{record_cost, ChunkWriter};
    use crate::source::Record;

    /// A record whose serialized size is controlled by the padding length.
    fn padded_record(id: usize, pad: usize) -> Record {
        match json!({
            "spotify_track_uri": format!("spotify:track:{id}"),
            "master_metadata_track_name": "x".repeat(pad),
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn two_records_fit_and_the_third_rolls_over() {
        let dir = tempdir().unwrap();
        let records: Vec<Record> = (0..3).map(|id| padded_record(id, 64)).collect();
        let cost = record_cost(&records[0]).unwrap();

        // Ceiling admits two records but not three
        let mut writer = ChunkWriter::new(dir.path(), "out", cost * 2);
        for record in records {
            writer.push(record).unwrap();
        }
        let written = writer.finish().unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0].records, 2);
        assert_eq!(written[1].records, 1);
        assert!(written[0].path.ends_with("out_1.json"));
        assert!(written[1].path.ends_with("out_2.json"));
        assert!(written[0].bytes <= cost * 2);
    }

    #[test]
    fn an_oversized_record_is_written_alone() {
        let dir = tempdir().unwrap();
        let small = padded_record(0, 8);
        let huge = padded_record(1, 4096);
        let ceiling = record_cost(&small).unwrap() * 2;

        let mut writer = ChunkWriter::new(dir.path(), "out", ceiling);
        writer.push(small.clone()).unwrap();
        writer.push(huge).unwrap();
        writer.push(small).unwrap();
        let written = writer.finish().unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(written[1].records, 1);
        assert!(written[1].bytes > ceiling);
        assert!(written[0].bytes <= ceiling);
        assert!(written[2].bytes <= ceiling);
    }

    #[test]
    fn no_records_means_no_artifacts() {
        let dir = tempdir().unwrap();
        let writer = ChunkWriter::new(dir.path(), "out", 1024);
        let written = writer.finish().unwrap();

        assert!(written.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn concatenated_artifacts_reproduce_the_input_sequence() {
        let dir = tempdir().unwrap();
        let records: Vec<Record> = (0..25).map(|id| padded_record(id, id % 7)).collect();
        let ceiling = record_cost(&records[0]).unwrap() * 4;

        let mut writer = ChunkWriter::new(dir.path(), "out", ceiling);
        for record in records.clone() {
            writer.push(record).unwrap();
        }
        let written = writer.finish().unwrap();

        let mut replayed = Vec::new();
        for artifact in &written {
            let contents = std::fs::read_to_string(&artifact.path).unwrap();
            let mut chunk: Vec<Record> = serde_json::from_str(&contents).unwrap();
            replayed.append(&mut chunk);
        }
        assert_eq!(replayed, records);
    }
}
