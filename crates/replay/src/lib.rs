//! Reference position mappers.
//!
//! These implementations favour obviousness over speed and exist to check
//! `remap` against:
//!
//! | Implementation | Storage | Query cost |
//! |----------------|---------|------------|
//! | `LinearMap` | `Vec` of edits | O(n) replay of every edit |
//! | `Tape` | one tag per byte | O(stream length) scan |
//!
//! `LinearMap` replays the same arithmetic as `remap` without any pruning.
//! `Tape` shares no arithmetic at all: it materialises the stream as a list
//! of byte tags and physically inserts and removes them.
//!
//! # Example
//!
//! ```
//! use replay::{LinearMap, Mapper, Tape};
//!
//! let mut linear = LinearMap::new();
//! let mut tape = Tape::new();
//! for m in [&mut linear as &mut dyn Mapper, &mut tape] {
//!     m.delete(3, 2);
//!     m.insert(4, 2);
//! }
//!
//! assert_eq!(linear.forward(5), Some(3));
//! assert_eq!(tape.forward(5), Some(3));
//! assert_eq!(tape.backward(4), None);
//! ```

pub mod linear;
pub mod tape;

pub use linear::LinearMap;
pub use tape::Tape;

/// Common interface over the reference mappers.
pub trait Mapper {
    /// Record `len` bytes inserted at `pos` of the current stream.
    fn insert(&mut self, pos: u64, len: u64);

    /// Record `len` bytes deleted at `pos` of the current stream.
    fn delete(&mut self, pos: u64, len: u64);

    /// Origin position to current position.
    fn forward(&self, pos: u64) -> Option<u64>;

    /// Current position to origin position.
    fn backward(&self, pos: u64) -> Option<u64>;
}
