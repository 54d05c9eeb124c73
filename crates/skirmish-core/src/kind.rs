//! The closed set of actor kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::KindError;

/// An actor's immutable category, which determines combat capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Armoured foot fighter. Hunts serpents.
    Melee,
    /// Large winged serpent. Hunts flyers.
    Serpent,
    /// Fast winged mount. Hunts nothing.
    Flyer,
}

impl Kind {
    /// Every kind, in persistence-code order.
    pub const ALL: [Kind; 3] = [Kind::Melee, Kind::Serpent, Kind::Flyer];

    /// Numeric code used by the roster format.
    ///
    /// Code `0` is reserved for "unknown" and is never produced.
    pub const fn code(self) -> u8 {
        match self {
            Self::Melee => 1,
            Self::Serpent => 2,
            Self::Flyer => 3,
        }
    }

    /// Decode a roster code.
    pub fn from_code(code: i64) -> Result<Self, KindError> {
        match code {
            1 => Ok(Self::Melee),
            2 => Ok(Self::Serpent),
            3 => Ok(Self::Flyer),
            _ => Err(KindError::UnknownKind { code }),
        }
    }

    /// Dense index into per-kind tables.
    pub const fn index(self) -> usize {
        self.code() as usize - 1
    }

    /// Default random-walk step length per movement tick.
    pub const fn default_move_distance(self) -> u32 {
        match self {
            Self::Melee => 30,
            Self::Serpent => 50,
            Self::Flyer => 30,
        }
    }

    /// Default engagement radius: other actors this close become fight
    /// candidates with this actor as the attacker.
    pub const fn default_kill_distance(self) -> u32 {
        match self {
            Self::Melee => 10,
            Self::Serpent => 30,
            Self::Flyer => 10,
        }
    }

    /// Lower-case label used in presentation output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Serpent => "serpent",
            Self::Flyer => "flyer",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for Kind {
    type Error = KindError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl FromStr for Kind {
    type Err = KindError;

    /// Accepts either the numeric roster code or the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| KindError::UnknownLabel {
                label: s.to_string(),
            })
    }
}
