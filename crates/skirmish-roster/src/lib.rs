//! Roster persistence and seeding for Skirmish.
//!
//! # Format
//!
//! ```text
//! <kind code>
//! <x>
//! <y>
//! <name>
//! ...
//! ```
//!
//! Kind codes are 1 (melee), 2 (serpent) and 3 (flyer). The reader is more
//! lenient than the writer; see [`reader`] for the accepted layouts.
//!
//! - [`RosterWriter`] / [`save_file`] store an [`ActorSet`](skirmish_core::ActorSet)
//! - [`read_roster`] / [`load_file`] restore one, reporting skipped records
//! - [`seed`] creates fresh rosters with generated names

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod reader;
pub mod seed;
pub mod writer;

pub use error::RosterError;
pub use reader::{load_file, parse_roster, read_roster, LoadReport, SkippedRecord};
pub use seed::{fresh_roster, generate_name, place, random_roster, seeded_roster};
pub use writer::{save_file, write_roster, RosterWriter};
