//! Byte-level simulation of the edited stream.
//!
//! Every byte of the current stream carries a tag: the origin position it
//! came from, or `None` if it was inserted. Edits physically splice the tag
//! list. Only the prefix touched by some edit is materialised; everything
//! past it is an untouched run of origin bytes.

use crate::Mapper;

/// Tag-list reference mapper.
#[derive(Clone, Debug, Default)]
pub struct Tape {
    tags: Vec<Option<u64>>,
    /// First origin position not yet materialised.
    next_origin: u64,
}

impl Tape {
    pub fn new() -> Tape {
        return Tape { tags: Vec::new(), next_origin: 0 };
    }

    /// Length of the materialised prefix of the current stream.
    pub fn materialised(&self) -> usize {
        return self.tags.len();
    }

    /// Materialise origin bytes until the prefix covers `len` bytes.
    fn ensure(&mut self, len: usize) {
        while self.tags.len() < len {
            self.tags.push(Some(self.next_origin));
            self.next_origin += 1;
        }
    }
}

impl Mapper for Tape {
    fn insert(&mut self, pos: u64, len: u64) {
        let pos = pos as usize;
        self.ensure(pos);
        self.tags.splice(pos..pos, std::iter::repeat_n(None, len as usize));
    }

    fn delete(&mut self, pos: u64, len: u64) {
        let pos = pos as usize;
        let end = pos + len as usize;
        self.ensure(end);
        self.tags.drain(pos..end);
    }

    fn forward(&self, pos: u64) -> Option<u64> {
        if pos >= self.next_origin {
            return Some(self.tags.len() as u64 + (pos - self.next_origin));
        }
        let index = self.tags.iter().position(|tag| *tag == Some(pos))?;
        return Some(index as u64);
    }

    fn backward(&self, pos: u64) -> Option<u64> {
        let len = self.tags.len() as u64;
        if pos >= len {
            return Some(self.next_origin + (pos - len));
        }
        return self.tags[pos as usize];
    }
}
