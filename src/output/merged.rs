use std::io::{BufRead, Write};

use super::{MappedKind, OutputConfig, write_lines};
use crate::Res;
use crate::error::Error;
use crate::merge::{Diff3Block, FILE0};

/// Streams the first file through to `out`, splicing in the selected
/// changes and conflict brackets as its line count runs past each block.
/// Returns whether any conflict was emitted.
///
/// Only blocks the policy selects touch the stream at all; a skipped
/// block's lines flow through as the first file has them.
pub(crate) fn write(
    out: &mut impl Write,
    infile: &mut impl BufRead,
    infile_name: &str,
    blocks: &[Diff3Block],
    cfg: &OutputConfig,
) -> Res<bool> {
    let mut conflicts_found = false;
    let mut linesread: usize = 0;
    let mut line = Vec::new();

    for (b, block) in blocks.iter().enumerate() {
        let kind = cfg.mapped_kind(block.correspond);
        let conflict = match kind {
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

        // Copy the untouched stretch before this block, byte for byte.
        let copy = block.lo[FILE0]
            .checked_sub(linesread + 1)
            .ok_or(Error::HoleInMergedBlock)?;
        for _ in 0..copy {
            line.clear();
            read_line(infile, &mut line, infile_name)?;
            out.write_all(&line).map_err(Error::Write)?;
            if line.last() != Some(&b'\n') {
                return Err(Error::InputFileShrank(infile_name.to_string()));
            }
        }
        linesread += copy;

        if conflict {
            conflicts_found = true;
            let all = kind == MappedKind::All;
            if all {
                writeln!(out, "<<<<<<< {}", cfg.labels[0]).map_err(Error::Write)?;
                write_lines(out, &block.lines[cfg.mapping[0]]).map_err(Error::Write)?;
            }
            if cfg.show_2nd {
                let marker = if all { "|||||||" } else { "<<<<<<<" };
                writeln!(out, "{} {}", marker, cfg.labels[1]).map_err(Error::Write)?;
                write_lines(out, &block.lines[cfg.mapping[1]]).map_err(Error::Write)?;
            }
            writeln!(out, "=======").map_err(Error::Write)?;
        }

        write_lines(out, &block.lines[cfg.mapping[2]]).map_err(Error::Write)?;

        if conflict {
            writeln!(out, ">>>>>>> {}", cfg.labels[2]).map_err(Error::Write)?;
        }

        // Discard the first file's own lines for this block; the output
        // above replaces them.
        let skip = block.numlines(FILE0);
        for i in 0..skip {
            line.clear();
            read_line(infile, &mut line, infile_name)?;
            if line.last() != Some(&b'\n') {
                // Early end of input is fine only while discarding the
                // final line of the final block.
                if i + 1 < skip || b + 1 < blocks.len() {
                    return Err(Error::InputFileShrank(infile_name.to_string()));
                }
                return Ok(conflicts_found);
            }
        }
        linesread += skip;
    }

    // Copy the rest of the first file, including a last line without a
    // newline.
    loop {
        let consumed = {
            let chunk = infile
                .fill_buf()
                .map_err(|err| Error::ReadInput(infile_name.to_string(), err))?;
            if chunk.is_empty() {
                break;
            }
            out.write_all(chunk).map_err(Error::Write)?;
            chunk.len()
        };
        infile.consume(consumed);
    }

    Ok(conflicts_found)
}

fn read_line(infile: &mut impl BufRead, line: &mut Vec<u8>, infile_name: &str) -> Res<()> {
    infile
        .read_until(b'\n', line)
        .map_err(|err| Error::ReadInput(infile_name.to_string(), err))?;
    Ok(())
}
