//! Merged JSONL output.
//!
//! Results are written to `<file>.partial` and renamed into place once the
//! whole run has been flushed, so a failed run never leaves a truncated
//! artifact under the final name.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use xref_recon::{PairResult, XrefError};

pub struct JsonlWriter {
    target: PathBuf,
    partial: PathBuf,
    out: BufWriter<File>,
    written: u64,
}

impl JsonlWriter {
    pub fn create(target: &Path) -> Result<Self, XrefError> {
        let mut partial = target.as_os_str().to_owned();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        let file = File::create(&partial)
            .map_err(|e| XrefError::Io(format!("cannot create {}: {e}", partial.display())))?;

        Ok(Self {
            target: target.to_path_buf(),
            partial,
            out: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn write_all(&mut self, results: &[PairResult]) -> Result<(), XrefError> {
        for result in results {
            serde_json::to_writer(&mut self.out, result)
                .map_err(|e| XrefError::Io(format!("cannot serialize result: {e}")))?;
            self.out.write_all(b"\n").map_err(|e| self.io_err(e))?;
            self.written += 1;
        }
        Ok(())
    }

    /// Flush and move the partial file to its final name.
    pub fn finish(mut self) -> Result<u64, XrefError> {
        self.out.flush().map_err(|e| self.io_err(e))?;
        std::fs::rename(&self.partial, &self.target).map_err(|e| {
            XrefError::Io(format!("cannot move output to {}: {e}", self.target.display()))
        })?;
        Ok(self.written)
    }

    /// Drop the partial file after a failed run.
    pub fn discard(self) {
        let JsonlWriter { partial, out, .. } = self;
        drop(out);
        if let Err(e) = std::fs::remove_file(&partial) {
            log::warn!("cannot remove {}: {e}", partial.display());
        }
    }

    fn io_err(&self, e: std::io::Error) -> XrefError {
        XrefError::Io(format!("cannot write {}: {e}", self.partial.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xref_recon::Evidence;

    fn result(left_id: i64) -> PairResult {
        PairResult {
            left_id,
            right_id: 7,
            matches: vec![Evidence::NameToName { left_name: "A".into(), right_name: "a".into() }],
        }
    }

    #[test]
    fn writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.jsonl");

        let mut writer = JsonlWriter::create(&target).unwrap();
        writer.write_all(&[result(1)]).unwrap();
        writer.write_all(&[result(2)]).unwrap();
        assert!(!target.exists());
        assert_eq!(writer.finish().unwrap(), 2);

        let text = std::fs::read_to_string(&target).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"gbr_id":1,"ofac_id":7,"matches":[{"gbr_name":"A","ofac_name":"a"}]}"#
        );
        assert!(!dir.path().join("out.jsonl.partial").exists());
    }

    #[test]
    fn discard_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.jsonl");
        let mut writer = JsonlWriter::create(&target).unwrap();
        writer.write_all(&[result(1)]).unwrap();
        writer.discard();
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
