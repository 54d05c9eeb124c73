//! Strongly-typed identifiers and the [`Position`]/[`Bounds`] geometry types.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ActorId`] allocation.
static ACTOR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-actor identity, fixed at construction.
///
/// Allocated from a monotonic atomic counter via [`ActorId::next`]. Two
/// distinct actors always have different IDs, even if they share a name
/// and position. The ordering of IDs is the canonical lock-acquisition
/// order used whenever two actors must be locked together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    /// Allocate a fresh, unique actor ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(ACTOR_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An integer map position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Computed in `i64` so that the full `i32` range cannot overflow.
    pub fn distance_sq(self, other: Position) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Clamp each axis independently into `[0, bounds]`.
    ///
    /// Negative maxima count as zero, as in [`Bounds::new`].
    pub fn clamped(self, bounds: Bounds) -> Self {
        let bounds = bounds.normalized();
        Self {
            x: self.x.clamp(0, bounds.max_x),
            y: self.y.clamp(0, bounds.max_y),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive bounding rectangle `[0, max_x] x [0, max_y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Largest legal x coordinate.
    pub max_x: i32,
    /// Largest legal y coordinate.
    pub max_y: i32,
}

impl Bounds {
    /// Construct bounds. Negative maxima are treated as zero.
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self {
            max_x: max_x.max(0),
            max_y: max_y.max(0),
        }
    }

    /// These bounds with negative maxima raised to zero.
    ///
    /// The fields are public, so a literal can bypass [`Bounds::new`].
    pub fn normalized(self) -> Self {
        Self::new(self.max_x, self.max_y)
    }

    /// Whether `pos` lies inside the rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        let b = self.normalized();
        (0..=b.max_x).contains(&pos.x) && (0..=b.max_y).contains(&pos.y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            max_x: 100,
            max_y: 100,
        }
    }
}
