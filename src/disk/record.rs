use crate::Depth;
use crate::MAX_PLAYERS;
use crate::Score;
use crate::game::State;
use byteorder::LittleEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::cmp::Ordering;
use std::io::Read;
use std::io::Write;

/// A state tagged with its enumeration depth, as stored on disk.
///
/// Layout: u16 depth (little endian), one byte per banked score,
/// one byte round score, one byte dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record {
    pub depth: Depth,
    pub state: State,
}

impl Record {
    /// bytes per record for a table of this size
    pub fn width(players: usize) -> usize {
        std::mem::size_of::<Depth>() + players + 2
    }
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u16::<LittleEndian>(self.depth)?;
        writer.write_all(self.state.banked())?;
        writer.write_u8(self.state.round())?;
        writer.write_u8(self.state.dice() as u8)?;
        Ok(())
    }
    /// Next record, or None at a clean end of stream.
    /// A record cut short is an error.
    pub fn read<R: Read>(reader: &mut R, players: usize) -> std::io::Result<Option<Self>> {
        assert!((1..=MAX_PLAYERS).contains(&players));
        let mut buffer = [0u8; 2 + MAX_PLAYERS + 2];
        let buffer = &mut buffer[..Self::width(players)];
        let filled = Self::fill(reader, buffer)?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < buffer.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("truncated record: {} of {} bytes", filled, buffer.len()),
            ));
        }
        let ref mut bytes = &buffer[..];
        let depth = bytes.read_u16::<LittleEndian>()?;
        let mut banked = [0 as Score; MAX_PLAYERS];
        bytes.read_exact(&mut banked[..players])?;
        let round = bytes.read_u8()?;
        let dice = bytes.read_u8()?;
        if !(1..=crate::MAX_DICE as u8).contains(&dice) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("record with {} dice", dice),
            ));
        }
        Ok(Some(Self {
            depth,
            state: State::new(&banked[..players], round, dice),
        }))
    }
    fn fill<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buffer.len() {
            match reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

/// deepest first, then by state so that equal depths have one order
impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .depth
            .cmp(&self.depth)
            .then_with(|| self.state.cmp(&other.state))
    }
}
impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(Depth, State)> for Record {
    fn from((depth, state): (Depth, State)) -> Self {
        Self { depth, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::Enumerator;
    use crate::game::Rules;

    #[test]
    fn layout() {
        let record = Record::from((0x0102, State::new(&[7, 8, 9], 4, 5)));
        let mut bytes = Vec::new();
        record.write(&mut bytes).unwrap();
        assert!(bytes == vec![0x02, 0x01, 7, 8, 9, 4, 5]);
        assert!(bytes.len() == Record::width(3));
    }

    #[test]
    fn reachable_states_survive_encoding() {
        let rules = Rules::new(2, 8, 7, 10).unwrap();
        let records = Enumerator::new(rules).map(Record::from).collect::<Vec<_>>();
        let mut bytes = Vec::new();
        records.iter().for_each(|r| r.write(&mut bytes).unwrap());
        let ref mut reader = bytes.as_slice();
        let decoded = std::iter::from_fn(|| Record::read(reader, 2).unwrap()).collect::<Vec<_>>();
        assert!(decoded == records);
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut bytes = Vec::new();
        Record::from((3, State::initial(2))).write(&mut bytes).unwrap();
        bytes.pop();
        assert!(Record::read(&mut bytes.as_slice(), 2).is_err());
    }

    #[test]
    fn deeper_sorts_first() {
        let shallow = Record::from((1, State::initial(2)));
        let deep = Record::from((9, State::initial(2)));
        assert!(deep < shallow);
        let a = Record::from((4, State::new(&[0, 0], 1, 5)));
        let b = Record::from((4, State::new(&[0, 0], 2, 5)));
        assert!(a < b);
    }
}
