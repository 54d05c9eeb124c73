//! Stock [`KillSink`] implementations.
//!
//! Line-oriented sinks ([`ConsoleSink`], [`WriterSink`]) write one
//! `"{attacker} killed {defender}"` line per confirmed kill and ignore
//! events with `won == false`. [`ChannelSink`] and [`TracingSink`] see
//! every event.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::hub::{KillEvent, KillSink, SinkError};

/// Write the kill line for `event` to `out`, if it was a kill.
fn write_kill_line<W: Write + ?Sized>(out: &mut W, event: &KillEvent) -> io::Result<()> {
    if event.won {
        writeln!(out, "{event}")?;
        out.flush()?;
    }
    Ok(())
}

// ── ConsoleSink ──────────────────────────────────────────────────

/// Prints confirmed kills to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl KillSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
        write_kill_line(&mut io::stdout().lock(), event)?;
        Ok(())
    }
}

// ── WriterSink ───────────────────────────────────────────────────

/// Writes confirmed kills to any [`Write`] implementation.
#[derive(Debug)]
pub struct WriterSink<W> {
    out: Mutex<W>,
    label: String,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            label: "writer".to_string(),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl WriterSink<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn append_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: Mutex::new(file),
            label: format!("file:{}", path.display()),
        })
    }
}

impl<W: Write + Send> KillSink for WriterSink<W> {
    fn name(&self) -> &str {
        &self.label
    }

    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
        write_kill_line(&mut *self.out.lock(), event)?;
        Ok(())
    }
}

// ── ChannelSink ──────────────────────────────────────────────────

/// Forwards every event over a crossbeam channel.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<KillEvent>,
}

impl ChannelSink {
    /// Forward into an existing sender.
    pub fn new(tx: Sender<KillEvent>) -> Self {
        Self { tx }
    }

    /// A sink paired with the receiving end of a fresh unbounded channel.
    pub fn unbounded() -> (Self, Receiver<KillEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl KillSink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
        self.tx
            .send(event.clone())
            .map_err(|_| SinkError::Disconnected)
    }
}

// ── TracingSink ──────────────────────────────────────────────────

/// Emits every event as a `tracing` event on target `skirmish::kills`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl KillSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
        tracing::info!(
            target: "skirmish::kills",
            attacker = %event.attacker.name,
            defender = %event.defender.name,
            won = event.won,
            "{event}"
        );
        Ok(())
    }
}
