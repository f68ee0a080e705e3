use super::Database;
use super::Lookup;
use crate::IO_BUFFER_BYTES;
use crate::MAX_PLAYERS;
use crate::Probability;
use crate::game::Probabilities;
use crate::game::Rules;
use crate::game::Space;
use crate::game::State;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use byteorder::LittleEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;

/// Dense in-memory solution table, one vector per canonical state id.
///
/// Only the first `players` entries of each vector are stored.
pub struct Table {
    space: Space,
    values: RwLock<Vec<Probability>>,
}

impl Table {
    pub fn new(rules: Rules) -> Self {
        let space = Space::new(rules);
        let values = vec![0.; space.capacity() * rules.players()];
        log::info!(
            "allocated table of {} states ({} MB)",
            space.capacity(),
            values.len() * std::mem::size_of::<Probability>() >> 20
        );
        Self {
            space,
            values: RwLock::new(values),
        }
    }
    pub fn rules(&self) -> &Rules {
        self.space.rules()
    }
    pub fn space(&self) -> &Space {
        &self.space
    }
    /// consistent view for many lookups
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            space: &self.space,
            values: self.values.read().expect("table lock poisoned"),
        }
    }
    fn stride(&self) -> usize {
        self.rules().players()
    }
}

// persistence
impl Table {
    fn signature() -> &'static [u8; 8] {
        b"FARKLE\x02\0"
    }

    /// signature, JSON rules header, value count, then every value
    pub fn save(&self, path: &Path) -> Result<()> {
        log::info!("saving solution table to {}", path.display());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let ref mut writer = BufWriter::with_capacity(IO_BUFFER_BYTES, file);
        let header = serde_json::to_vec(self.rules())?;
        let values = self.values.read().map_err(|_| anyhow!("table lock poisoned"))?;
        writer.write_all(Self::signature())?;
        writer.write_u32::<LittleEndian>(header.len() as u32)?;
        writer.write_all(&header)?;
        writer.write_u64::<LittleEndian>(values.len() as u64)?;
        for value in values.iter() {
            writer.write_f64::<LittleEndian>(*value)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        log::info!("loading solution table from {}", path.display());
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let ref mut reader = BufReader::with_capacity(IO_BUFFER_BYTES, file);
        let mut signature = [0u8; 8];
        reader
            .read_exact(&mut signature)
            .with_context(|| format!("read header of {}", path.display()))?;
        if &signature != Self::signature() {
            bail!("{} is not a solution table", path.display());
        }
        let length = reader.read_u32::<LittleEndian>()? as usize;
        if length > 1 << 12 {
            bail!("{} declares a {} byte header", path.display(), length);
        }
        let mut header = vec![0u8; length];
        reader.read_exact(&mut header)?;
        let rules = serde_json::from_slice::<Rules>(&header).context("parse rules header")?;
        let rules = Rules::new(rules.players(), rules.target(), rules.entry(), rules.ceiling())
            .context("invalid rules header")?;
        let space = Space::new(rules);
        let count = reader.read_u64::<LittleEndian>()? as usize;
        if count != space.capacity() * rules.players() {
            bail!(
                "{} holds {} values, expected {} for {}",
                path.display(),
                count,
                space.capacity() * rules.players(),
                rules
            );
        }
        let mut values = vec![0.; count];
        reader
            .read_f64_into::<LittleEndian>(&mut values)
            .with_context(|| format!("read values of {}", path.display()))?;
        Ok(Self {
            space,
            values: RwLock::new(values),
        })
    }
}

impl Lookup for Table {
    fn get(&self, state: &State) -> Probabilities {
        self.snapshot().get(state)
    }
}

impl Database for Table {
    type Reader<'a> = Snapshot<'a>;
    fn reader(&self) -> Self::Reader<'_> {
        self.snapshot()
    }
    fn commit(&self, batch: &[(State, Probabilities)]) -> Result<()> {
        let stride = self.stride();
        let ids = batch
            .iter()
            .map(|(state, _)| self.space.index(state))
            .collect::<Vec<usize>>();
        let mut values = self.values.write().map_err(|_| anyhow!("table lock poisoned"))?;
        for (id, (_, p)) in ids.into_iter().zip(batch) {
            values[id * stride..(id + 1) * stride].copy_from_slice(&p.values()[..stride]);
        }
        Ok(())
    }
}

/// Shared read section over a `Table`.
pub struct Snapshot<'a> {
    space: &'a Space,
    values: RwLockReadGuard<'a, Vec<Probability>>,
}

impl Lookup for Snapshot<'_> {
    fn get(&self, state: &State) -> Probabilities {
        match self.space.find(state) {
            None => Probabilities::zero(),
            Some(id) => {
                let stride = self.space.rules().players();
                let mut p = [0.; MAX_PLAYERS];
                p[..stride].copy_from_slice(&self.values[id * stride..(id + 1) * stride]);
                Probabilities::from(p)
            }
        }
    }
}
