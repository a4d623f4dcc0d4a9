//! Edit history as a flat list, replayed in full on every query.

use crate::Mapper;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Insert { pos: u64, len: u64 },
    Delete { pos: u64, len: u64 },
}

/// Linear-time reference mapper.
#[derive(Clone, Debug, Default)]
pub struct LinearMap {
    ops: Vec<Op>,
}

impl LinearMap {
    pub fn new() -> LinearMap {
        return LinearMap { ops: Vec::new() };
    }

    pub fn len(&self) -> usize {
        return self.ops.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.ops.is_empty();
    }
}

impl Mapper for LinearMap {
    fn insert(&mut self, pos: u64, len: u64) {
        if len > 0 {
            self.ops.push(Op::Insert { pos, len });
        }
    }

    fn delete(&mut self, pos: u64, len: u64) {
        if len > 0 {
            self.ops.push(Op::Delete { pos, len });
        }
    }

    fn forward(&self, pos: u64) -> Option<u64> {
        let mut v = pos;
        for op in &self.ops {
            match *op {
                Op::Insert { pos, len } => {
                    if pos <= v {
                        v += len;
                    }
                }
                Op::Delete { pos, len } => {
                    if pos <= v && v < pos + len {
                        return None;
                    }
                    if v >= pos + len {
                        v -= len;
                    }
                }
            }
        }
        return Some(v);
    }

    fn backward(&self, pos: u64) -> Option<u64> {
        let mut v = pos;
        for op in self.ops.iter().rev() {
            match *op {
                Op::Insert { pos, len } => {
                    if pos <= v && v < pos + len {
                        return None;
                    }
                    if v >= pos + len {
                        v -= len;
                    }
                }
                Op::Delete { pos, len } => {
                    if pos <= v {
                        v += len;
                    }
                }
            }
        }
        return Some(v);
    }
}
