use super::Record;
use crate::IO_BUFFER_BYTES;
use crate::MAX_PLAYERS;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// File of depth-sorted records, re-read once per solver sweep.
///
/// An 8-byte signature and the player count precede fixed-width records.
pub struct Stream {
    players: usize,
    reader: BufReader<File>,
    failed: bool,
}

impl Stream {
    fn signature() -> &'static [u8; 8] {
        b"FARKLE\x01\0"
    }

    /// Write every record to `path`, returning how many were written.
    pub fn save<I>(path: &Path, players: usize, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        assert!((1..=MAX_PLAYERS).contains(&players));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let ref mut writer = BufWriter::with_capacity(IO_BUFFER_BYTES, file);
        writer.write_all(Self::signature())?;
        writer.write_u8(players as u8)?;
        let mut count = 0;
        for record in records {
            assert!(record.as_ref().map_or(true, |r| r.state.players() == players));
            record?.write(writer)?;
            count += 1;
        }
        writer.flush()?;
        log::info!("saved {} states to {}", count, path.display());
        Ok(count)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let mut reader = BufReader::with_capacity(IO_BUFFER_BYTES, file);
        let mut signature = [0u8; 8];
        reader
            .read_exact(&mut signature)
            .with_context(|| format!("read header of {}", path.display()))?;
        if &signature != Self::signature() {
            bail!("{} is not a state stream", path.display());
        }
        let players = reader.read_u8()? as usize;
        if !(1..=MAX_PLAYERS).contains(&players) {
            bail!("{} declares {} players", path.display(), players);
        }
        Ok(Self {
            players,
            reader,
            failed: false,
        })
    }
    pub fn players(&self) -> usize {
        self.players
    }
}

impl Iterator for Stream {
    type Item = Result<Record>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match Record::read(&mut self.reader, self.players) {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e).context("read state stream"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::State;

    #[test]
    fn save_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.bin");
        let records = vec![
            Record::from((3, State::new(&[0, 7, 9], 2, 4))),
            Record::from((1, State::initial(3))),
        ];
        let count = Stream::save(&path, 3, records.iter().copied().map(Ok)).unwrap();
        let stream = Stream::open(&path).unwrap();
        assert!(count == 2);
        assert!(stream.players() == 3);
        assert!(stream.collect::<Result<Vec<_>>>().unwrap() == records);
    }

    #[test]
    fn rejects_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        std::fs::write(&path, b"not a stream at all").unwrap();
        assert!(Stream::open(&path).is_err());
        assert!(Stream::open(&dir.path().join("missing.bin")).is_err());
    }

    #[test]
    fn truncated_stream_fails_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.bin");
        Stream::save(&path, 2, [Ok(Record::from((0, State::initial(2))))]).unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.pop();
        std::fs::write(&path, bytes).unwrap();
        let mut stream = Stream::open(&path).unwrap();
        assert!(matches!(stream.next(), Some(Err(_))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn upstream_errors_abort_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.bin");
        let records = vec![
            Ok(Record::from((0, State::initial(2)))),
            Err(anyhow::anyhow!("disk on fire")),
        ];
        assert!(Stream::save(&path, 2, records).is_err());
    }
}
