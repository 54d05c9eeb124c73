//! Roster saving.
//!
//! [`RosterWriter`] streams actors to any `Write` sink, one four-line
//! record each: kind code, x, y, name. Alive flags are not stored; a
//! loaded roster starts everyone alive.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use skirmish_core::{Actor, ActorSet};

use crate::error::RosterError;

/// Writes roster records to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
pub struct RosterWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> RosterWriter<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Append one record.
    ///
    /// Fails with [`RosterError::UnwritableName`] when the name could not
    /// be read back unchanged.
    pub fn write_actor(&mut self, actor: &Actor) -> Result<(), RosterError> {
        let name = actor.name();
        if name.is_empty() || name.trim() != name || name.contains(['\n', '\r']) {
            return Err(RosterError::UnwritableName {
                name: name.to_string(),
            });
        }
        let pos = actor.position();
        writeln!(self.writer, "{}", actor.kind().code())?;
        writeln!(self.writer, "{}", pos.x)?;
        writeln!(self.writer, "{}", pos.y)?;
        writeln!(self.writer, "{name}")?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W, RosterError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write every actor in `actors`, in set order. Returns the record count.
pub fn write_roster<W: Write>(writer: W, actors: &ActorSet) -> Result<usize, RosterError> {
    let mut out = RosterWriter::new(writer);
    for actor in actors {
        out.write_actor(actor)?;
    }
    let n = out.records_written();
    out.finish()?;
    Ok(n)
}

/// Save `actors` to `path`, replacing any existing file.
pub fn save_file(path: impl AsRef<Path>, actors: &ActorSet) -> Result<usize, RosterError> {
    write_roster(BufWriter::new(File::create(path)?), actors)
}
