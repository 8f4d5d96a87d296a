use std::io::{self, Write};

use super::{MappedKind, OutputConfig};
use crate::merge::Diff3Block;

/// Writes an ed script that applies the selected changes to the first
/// file. Returns whether any conflict was emitted.
///
/// Blocks are visited in reverse so that every command addresses line
/// numbers of the original file; edits further down never disturb the
/// addresses of edits above them.
pub(crate) fn write(
    out: &mut impl Write,
    blocks: &[Diff3Block],
    cfg: &OutputConfig,
) -> io::Result<bool> {
    let mut conflicts_found = false;

    for block in blocks.iter().rev() {
        let kind = cfg.mapped_kind(block.correspond);
        let conflict = match kind {
            // The first file already contains its own changes.
            MappedKind::Only(0) => continue,
            MappedKind::Only(1) => {
                if !cfg.show_2nd {
                    continue;
                }
                true
            }
            MappedKind::Only(_) => {
                if cfg.overlap_only {
                    continue;
                }
                false
            }
            MappedKind::All => {
                if cfg.simple_only {
                    continue;
                }
                cfg.flagging
            }
        };

        let low0 = block.lo[cfg.mapping[0]];
        let high0 = block.hi[cfg.mapping[0]];
        let num0 = block.numlines(cfg.mapping[0]);
        let num1 = block.numlines(cfg.mapping[1]);
        let num2 = block.numlines(cfg.mapping[2]);

        if conflict {
            conflicts_found = true;
            let all = kind == MappedKind::All;

            // Close the conflict: append the tail brackets after the
            // block's own lines, which stay in place.
            writeln!(out, "{}a", high0)?;
            let mut leading_dot = false;
            if all {
                if cfg.show_2nd {
                    writeln!(out, "||||||| {}", cfg.labels[1])?;
                    leading_dot |= dotlines(out, &block.lines[cfg.mapping[1]])?;
                }
                writeln!(out, "=======")?;
                leading_dot |= dotlines(out, &block.lines[cfg.mapping[2]])?;
            }
            writeln!(out, ">>>>>>> {}", cfg.labels[2])?;
            undotlines(out, leading_dot, high0 + 2, num1 + num2 + 1)?;

            // Open the conflict: prepend the head bracket. For a change
            // confined to the second file the bracketed lines are its
            // lines; the agreeing files need no copy of their own.
            writeln!(out, "{}a", low0 - 1)?;
            writeln!(out, "<<<<<<< {}", cfg.labels[if all { 0 } else { 1 }])?;
            let mut leading_dot = false;
            if !all {
                leading_dot = dotlines(out, &block.lines[cfg.mapping[1]])?;
                writeln!(out, "=======")?;
            }
            undotlines(out, leading_dot, low0 + 1, num1)?;
        } else if num2 == 0 {
            if low0 == high0 {
                writeln!(out, "{}d", low0)?;
            } else {
                writeln!(out, "{},{}d", low0, high0)?;
            }
        } else {
            match num0 {
                0 => writeln!(out, "{}a", high0)?,
                1 => writeln!(out, "{}c", high0)?,
                _ => writeln!(out, "{},{}c", low0, high0)?,
            }
            let leading_dot = dotlines(out, &block.lines[cfg.mapping[2]])?;
            undotlines(out, leading_dot, low0, num2)?;
        }
    }

    if cfg.finalwrite {
        write!(out, "w\nq\n")?;
    }

    Ok(conflicts_found)
}

/// Writes lines as ed append input, doubling any leading dot so that a
/// line consisting of `.` can't terminate the append early. Reports
/// whether any dot was doubled.
fn dotlines(out: &mut impl Write, lines: &[&[u8]]) -> io::Result<bool> {
    let mut leading_dot = false;

    for line in lines {
        if line.first() == Some(&b'.') {
            leading_dot = true;
            out.write_all(b".")?;
        }
        out.write_all(line)?;
    }

    Ok(leading_dot)
}

/// Terminates an append and, if any dot was doubled, follows up with a
/// substitute command undoing the doubling across the appended range.
fn undotlines(
    out: &mut impl Write,
    leading_dot: bool,
    start: usize,
    num: usize,
) -> io::Result<()> {
    writeln!(out, ".")?;
    if leading_dot {
        if num == 1 {
            writeln!(out, "{}s/^\\.//", start)?;
        } else {
            writeln!(out, "{},{}s/^\\.//", start, start + num - 1)?;
        }
    }
    Ok(())
}
