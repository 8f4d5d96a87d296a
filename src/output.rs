//! The three output formats, fed by the three-way block chain.
//!
//! Emitters see files in command line order. The merge algorithm works in
//! internal order (common file last), so every access to a block's per
//! file data goes through `mapping`, and block kinds come out through
//! [`OutputConfig::mapped_kind`].

use std::io::{self, Write};

use crate::merge::Correspond;

pub(crate) mod ed;
pub(crate) mod merged;
pub(crate) mod report;

/// A three-way block's kind translated to command line file order:
/// either an overlap, or a change confined to the file at the given
/// command line position (0 based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MappedKind {
    All,
    Only(usize),
}

/// Everything the emitters need besides the blocks themselves. Built
/// once from the command line and never mutated.
pub(crate) struct OutputConfig {
    pub show_2nd: bool,
    pub flagging: bool,
    pub overlap_only: bool,
    pub simple_only: bool,
    pub finalwrite: bool,
    pub initial_tab: bool,
    /// Internal file index for each command line position.
    pub mapping: [usize; 3],
    /// Command line position for each internal file index.
    pub rev_mapping: [usize; 3],
    /// Labels to print for the files, in command line order.
    pub labels: [String; 3],
}

impl OutputConfig {
    pub(crate) fn mapped_kind(&self, correspond: Correspond) -> MappedKind {
        match correspond {
            Correspond::All => MappedKind::All,
            Correspond::Only1 => MappedKind::Only(self.rev_mapping[0]),
            Correspond::Only2 => MappedKind::Only(self.rev_mapping[1]),
            Correspond::Only3 => MappedKind::Only(self.rev_mapping[2]),
        }
    }
}

pub(crate) fn write_lines(out: &mut impl Write, lines: &[&[u8]]) -> io::Result<()> {
    for line in lines {
        out.write_all(line)?;
    }
    Ok(())
}
