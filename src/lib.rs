//! Remap - byte position mapping between the origin and current views of an
//! edited stream.
//!
//! Record inserts and deletes as they happen, then ask where a byte of the
//! original stream ended up, or where a byte of the edited stream came from.
//!
//! # Quick Start
//!
//! ```
//! use remap::{Direction, PositionMap};
//!
//! let mut map = PositionMap::new();
//! map.delete(3, 2).unwrap();
//! map.insert(4, 2).unwrap();
//!
//! assert_eq!(map.map(Direction::OriginToCurrent, 1), Some(1));
//! assert_eq!(map.map(Direction::OriginToCurrent, 3), None);
//! assert_eq!(map.map(Direction::OriginToCurrent, 5), Some(3));
//! assert_eq!(map.map(Direction::CurrentToOrigin, 4), None);
//! ```
//!
//! # Structure
//!
//! - `edit`: edit records and query directions
//! - `tree`: red-black tree of edits keyed by order, augmented with the
//!   minimum position of each subtree
//! - `mapper`: forward and backward replay with subtree pruning
//! - `map`: [`PositionMap`], the handle owning one tree

pub mod edit;
pub mod error;
pub mod map;
pub mod mapper;
pub mod tree;

pub use edit::{Direction, Edit, EditKind};
pub use error::AppendError;
pub use map::{PositionMap, UNMAPPED};
pub use mapper::MapStats;
