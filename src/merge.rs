//! Fuses two two-way diffs that share a common file into one chain of
//! three-way blocks.
//!
//! Internally the three files are numbered 0, 1 and 2, with file 2 always
//! the common file. Each input thread is the diff of one of the other
//! files against the common file, ordered by the common file's line
//! numbers.

use crate::Res;
use crate::error::Error;
use crate::normal_diff;

pub(crate) const FILE0: usize = 0;
pub(crate) const FILE1: usize = 1;
pub(crate) const FILEC: usize = 2;

/// Sides of a two-way block: the changed file and the common file.
const OTHER: usize = 0;
const COMMON: usize = 1;

/// A two-way block with its captured lines resolved against the buffer
/// the subsidiary diff wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiffBlock<'a> {
    pub lo: [usize; 2],
    pub hi: [usize; 2],
    pub lines: [Vec<&'a [u8]>; 2],
}

/// Which file disagrees with the other two, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Correspond {
    /// The two changed files disagree with each other: an overlap.
    All,
    /// Only file 0 differs from the common file.
    Only1,
    /// Only file 1 differs from the common file.
    Only2,
    /// Files 0 and 1 both changed, line for line identically.
    Only3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Diff3Block<'a> {
    pub correspond: Correspond,
    /// Inclusive low line per file; an empty range has `lo == hi + 1`.
    pub lo: [usize; 3],
    /// Inclusive high line per file.
    pub hi: [usize; 3],
    pub lines: [Vec<&'a [u8]>; 3],
}

impl Diff3Block<'_> {
    pub(crate) fn numlines(&self, file: usize) -> usize {
        self.hi[file] + 1 - self.lo[file]
    }
}

/// Turns parsed blocks into [`DiffBlock`]s borrowing from `raw`.
pub(crate) fn resolve<'a>(raw: &'a [u8], blocks: Vec<normal_diff::Block>) -> Vec<DiffBlock<'a>> {
    blocks
        .into_iter()
        .map(|block| DiffBlock {
            lo: block.lo,
            hi: block.hi,
            lines: block
                .lines
                .map(|side| side.into_iter().map(|range| &raw[range]).collect()),
        })
        .collect()
}

/// Merges the two threads into a chain of three-way blocks whose common
/// file ranges are strictly increasing.
///
/// Each output block is built from a "using" group: a maximal run of
/// input blocks whose common file ranges transitively overlap or abut.
/// Two blocks that merely touch still land in the same group; edits
/// right next to each other come out as a single hunk.
pub(crate) fn make_3way_diff<'a>(
    thread0: &[DiffBlock<'a>],
    thread1: &[DiffBlock<'a>],
) -> Res<Vec<Diff3Block<'a>>> {
    for thread in [thread0, thread1] {
        if !well_ordered(thread) {
            return Err(Error::BadDiffFormat("blocks out of order".to_string()));
        }
    }

    let threads = [thread0, thread1];
    let mut next = [0usize; 2];
    let mut result: Vec<Diff3Block> = Vec::new();
    // High lines of the block before the first one; line 0 on every side.
    let mut prev_hi = [0usize; 3];

    loop {
        // Base selection: start the group with whichever thread's head
        // sits lowest in the common file. Ties go to thread 0.
        let base = match (threads[0].get(next[0]), threads[1].get(next[1])) {
            (Some(head0), Some(head1)) => usize::from(head0.lo[COMMON] > head1.lo[COMMON]),
            (Some(_), None) => 0,
            (None, Some(_)) => 1,
            (None, None) => break,
        };
        let head = &threads[base][next[base]];
        next[base] += 1;

        let mut using: [Vec<&DiffBlock>; 2] = [Vec::new(), Vec::new()];
        using[base].push(head);
        let lowc = head.lo[COMMON];
        let mut hw_mark = head.hi[COMMON];
        let mut hw_thread = base;

        // High-water extension: as long as the other thread's head
        // overlaps or abuts the group so far, pull it in too.
        loop {
            let other = hw_thread ^ 1;
            let Some(block) = threads[other].get(next[other]) else {
                break;
            };
            if block.lo[COMMON] > hw_mark + 1 {
                break;
            }
            next[other] += 1;
            using[other].push(block);
            if hw_mark < block.hi[COMMON] {
                hw_mark = block.hi[COMMON];
                hw_thread = other;
            }
        }

        let block = fabricate(&using, lowc, hw_mark, &prev_hi)?;
        prev_hi = block.hi;
        result.push(block);
    }

    Ok(result)
}

/// Builds one three-way block out of a using group covering common lines
/// `lowc..=highc`.
fn fabricate<'a>(
    using: &[Vec<&DiffBlock<'a>>; 2],
    lowc: usize,
    highc: usize,
    prev_hi: &[usize; 3],
) -> Res<Diff3Block<'a>> {
    let mut lo = [0usize; 3];
    let mut hi = [0usize; 3];
    lo[FILEC] = lowc;
    hi[FILEC] = highc;

    // Ranges for the two changed files. A thread that contributed no
    // block is identical to the common file here, so its range follows
    // from the previous block's high lines; otherwise the edges of the
    // first and last contributed blocks anchor the mapping.
    for d in 0..2 {
        match (using[d].first(), using[d].last()) {
            (Some(first), Some(last)) => {
                lo[d] = mapline(lowc, first.lo[COMMON], first.lo[OTHER])?;
                hi[d] = mapline(highc, last.hi[COMMON], last.hi[OTHER])?;
            }
            _ => {
                lo[d] = prev_hi[d] + (lowc - prev_hi[FILEC]);
                hi[d] = prev_hi[d] + (highc - prev_hi[FILEC]);
            }
        }
        if lo[d] == 0 || lo[d] > hi[d] + 1 {
            return Err(Error::CommonLineMismatch);
        }
    }

    // The common file's lines, asserted by any block of either thread.
    // Both threads may assert the same line; the assertions must agree
    // byte for byte, or the subsidiary diffs contradict each other.
    let numc = highc + 1 - lowc;
    let mut common: Vec<Option<&[u8]>> = vec![None; numc];
    for d in 0..2 {
        for block in &using[d] {
            for (i, &line) in block.lines[COMMON].iter().enumerate() {
                let slot = common
                    .get_mut(block.lo[COMMON] - lowc + i)
                    .ok_or(Error::HoleInMergedBlock)?;
                match *slot {
                    Some(first) => {
                        if first != line {
                            return Err(Error::CommonLineMismatch);
                        }
                    }
                    None => *slot = Some(line),
                }
            }
        }
    }
    let common = unwrap_filled(common)?;

    // The changed files' lines: contributed blocks supply their own
    // lines, and the stretches between them are equal to the common
    // file, so those slots alias the common lines.
    let mut sides: [Vec<&[u8]>; 2] = [Vec::new(), Vec::new()];
    for d in 0..2 {
        if using[d].is_empty() {
            sides[d] = common.clone();
            continue;
        }
        let num = hi[d] + 1 - lo[d];
        let mut filled: Vec<Option<&[u8]>> = vec![None; num];
        for i in 0..using[d][0].lo[OTHER] - lo[d] {
            filled[i] = Some(common[i]);
        }
        for (b, block) in using[d].iter().enumerate() {
            let offset = block.lo[OTHER] - lo[d];
            for (i, &line) in block.lines[OTHER].iter().enumerate() {
                *filled
                    .get_mut(offset + i)
                    .ok_or(Error::HoleInMergedBlock)? = Some(line);
            }
            let until = match using[d].get(b + 1) {
                Some(following) => following.lo[OTHER] - lo[d],
                None => num,
            };
            let mut linec = block.hi[COMMON] + 1 - lowc;
            for i in block.hi[OTHER] + 1 - lo[d]..until {
                *filled.get_mut(i).ok_or(Error::HoleInMergedBlock)? =
                    Some(*common.get(linec).ok_or(Error::HoleInMergedBlock)?);
                linec += 1;
            }
        }
        sides[d] = unwrap_filled(filled)?;
    }

    let correspond = if using[0].is_empty() {
        Correspond::Only2
    } else if using[1].is_empty() {
        Correspond::Only1
    } else if sides[0] == sides[1] {
        Correspond::Only3
    } else {
        Correspond::All
    };

    let [lines0, lines1] = sides;
    Ok(Diff3Block {
        correspond,
        lo,
        hi,
        lines: [lines0, lines1, common],
    })
}

/// A thread must advance strictly through both files for the merge's
/// line arithmetic to hold. The subsidiary diff always produces such
/// chains; anything else is malformed input.
fn well_ordered(thread: &[DiffBlock]) -> bool {
    thread
        .iter()
        .all(|block| (0..2).all(|s| block.lo[s] <= block.hi[s] + 1))
        && thread
            .windows(2)
            .all(|pair| (0..2).all(|s| pair[0].hi[s] < pair[1].lo[s]))
}

/// Maps a common file line to the corresponding changed file line, given
/// an anchor pair known to correspond outside any difference.
fn mapline(linec: usize, anchor_common: usize, anchor_other: usize) -> Res<usize> {
    (linec + anchor_other)
        .checked_sub(anchor_common)
        .ok_or(Error::CommonLineMismatch)
}

fn unwrap_filled(lines: Vec<Option<&[u8]>>) -> Res<Vec<&[u8]>> {
    lines
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::HoleInMergedBlock)
}
