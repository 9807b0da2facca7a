use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pitchorder_core::{LotteryResult, Partner};

use crate::errors::DrawError;
use crate::groups::PartnerIndex;

/// Write a draw result as CSV, one row per position (1-based).
pub fn write_sequence_csv(
    path: &Path,
    result: &LotteryResult,
    partners: &[Partner],
) -> Result<u64, DrawError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);
    let index = PartnerIndex::new(partners);

    writer.write_record(["position", "team", "partner", "case"])?;

    for (position, team) in result.sequence.iter().enumerate() {
        let position = (position + 1).to_string();
        let partner = index
            .name(&team.partner_id)
            .unwrap_or(team.partner_id.as_str());
        let case = team.case_name.as_deref().unwrap_or_default();
        writer.write_record([position.as_str(), team.name.as_str(), partner, case])?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
