//! Cache line storage.

/// One line of cache storage: a block's bytes plus its tag and valid bit.
///
/// Lines start invalid and are overwritten in place; they are never
/// individually destroyed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    pub valid: bool,
    pub tag: u32,
    pub bytes: Vec<u8>,
}

impl CacheLine {
    /// Creates an invalid line of `line_size` zero bytes.
    pub fn new(line_size: usize) -> Self {
        Self {
            valid: false,
            tag: 0,
            bytes: vec![0; line_size],
        }
    }

    /// Returns `true` if the line currently holds `tag`.
    pub fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }

    /// Replaces the whole block with `block` and marks it valid.
    pub fn fill(&mut self, tag: u32, block: &[u8]) {
        self.bytes.copy_from_slice(block);
        self.tag = tag;
        self.valid = true;
    }
}
