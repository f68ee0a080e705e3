use super::Record;
use crate::IO_BUFFER_BYTES;
use anyhow::Context;
use anyhow::Result;
use rayon::slice::ParallelSliceMut;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// External merge sort of depth-tagged states, deepest first.
///
/// Records collect in memory until the buffer fills, then the buffer is
/// sorted and spilled as a run into a scratch directory. `finish` spills
/// the remainder and merges the runs lazily.
pub struct Sorter {
    players: usize,
    capacity: usize,
    buffer: Vec<Record>,
    runs: Vec<PathBuf>,
    scratch: TempDir,
}

impl Sorter {
    pub fn new(workdir: &Path, players: usize, capacity: usize) -> Result<Self> {
        assert!(capacity > 0);
        std::fs::create_dir_all(workdir)
            .with_context(|| format!("create work directory {}", workdir.display()))?;
        let scratch = tempfile::Builder::new()
            .prefix("farkle-sort-")
            .tempdir_in(workdir)
            .with_context(|| format!("create scratch directory in {}", workdir.display()))?;
        Ok(Self {
            players,
            capacity,
            buffer: Vec::with_capacity(capacity),
            runs: Vec::new(),
            scratch,
        })
    }
    /// sort a whole stream of records with one call
    pub fn sort<I>(workdir: &Path, players: usize, capacity: usize, records: I) -> Result<Merge>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut sorter = Self::new(workdir, players, capacity)?;
        for record in records {
            sorter.push(record)?;
        }
        sorter.finish()
    }

    pub fn push(&mut self, record: Record) -> Result<()> {
        self.buffer.push(record);
        if self.buffer.len() >= self.capacity {
            self.spill()?;
        }
        Ok(())
    }
    fn spill(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.buffer.par_sort_unstable();
        let path = self
            .scratch
            .path()
            .join(format!("run-{:05}.bin", self.runs.len()));
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let ref mut writer = BufWriter::with_capacity(IO_BUFFER_BYTES, file);
        for record in self.buffer.drain(..) {
            record
                .write(writer)
                .with_context(|| format!("write {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("flush {}", path.display()))?;
        log::debug!("spilled sorted run {}", path.display());
        self.runs.push(path);
        Ok(())
    }
    /// spill what remains and merge every run
    pub fn finish(mut self) -> Result<Merge> {
        self.spill()?;
        log::info!("merging {} sorted runs", self.runs.len());
        let share = (IO_BUFFER_BYTES / self.runs.len().max(1)).max(1 << 12);
        let mut readers = self
            .runs
            .iter()
            .map(|path| {
                File::open(path)
                    .map(|f| BufReader::with_capacity(share, f))
                    .with_context(|| format!("open {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut heap = BinaryHeap::with_capacity(readers.len());
        for (run, reader) in readers.iter_mut().enumerate() {
            if let Some(record) = Record::read(reader, self.players).context("read sorted run")? {
                heap.push(Reverse((record, run)));
            }
        }
        Ok(Merge {
            players: self.players,
            readers,
            heap,
            failed: false,
            _scratch: self.scratch,
        })
    }
}

/// Lazy k-way merge of sorted runs. The scratch directory lives as long as the merge.
pub struct Merge {
    players: usize,
    readers: Vec<BufReader<File>>,
    heap: BinaryHeap<Reverse<(Record, usize)>>,
    failed: bool,
    _scratch: TempDir,
}

impl Iterator for Merge {
    type Item = Result<Record>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let Reverse((record, run)) = self.heap.pop()?;
        match Record::read(&mut self.readers[run], self.players) {
            Ok(Some(next)) => self.heap.push(Reverse((next, run))),
            Ok(None) => {}
            Err(e) => {
                self.failed = true;
                return Some(Err(e).context("read sorted run"));
            }
        }
        Some(Ok(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::Enumerator;
    use crate::game::Rules;

    fn sorted(capacity: usize) -> Vec<Record> {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let workdir = tempfile::tempdir().unwrap();
        Sorter::sort(
            workdir.path(),
            2,
            capacity,
            Enumerator::new(rules).map(Record::from),
        )
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap()
    }

    #[test]
    fn depth_descending() {
        let records = sorted(97);
        assert!(records.windows(2).all(|w| w[0].depth >= w[1].depth));
        assert!(records.windows(2).all(|w| w[0] <= w[1]));
        assert!(records.last().map(|r| r.depth) == Some(0));
    }

    #[test]
    fn permutation_of_input() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let mut input = Enumerator::new(rules).map(Record::from).collect::<Vec<_>>();
        input.sort();
        assert!(sorted(50) == input);
    }

    #[test]
    fn independent_of_buffer_size() {
        assert!(sorted(3) == sorted(1 << 20));
        assert!(sorted(13) == sorted(1000));
    }

    #[test]
    fn empty_input() {
        let workdir = tempfile::tempdir().unwrap();
        let merge = Sorter::sort(workdir.path(), 2, 8, std::iter::empty()).unwrap();
        assert!(merge.count() == 0);
    }
}
