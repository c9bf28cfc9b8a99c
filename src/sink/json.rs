use crate::records::Dataset;
use std::io::Write;

pub fn write_document(dataset: &Dataset, mut out: impl Write) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut out, dataset)?;
    writeln!(out).map_err(serde_json::Error::io)
}
