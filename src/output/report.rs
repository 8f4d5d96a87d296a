use std::io::{self, Write};

use super::{MappedKind, OutputConfig};
use crate::merge::Diff3Block;

/// Display order advances 0, 2, 1 instead of 0, 1, 2 when the odd file
/// out sits at display position 1, so the two agreeing files end up next
/// to each other.
const SKEW: [usize; 3] = [2, 3, 1];

/// Writes the tagged report: every block under a `====` separator, each
/// file's range on its own header line, the lines themselves indented.
pub(crate) fn write(
    out: &mut impl Write,
    blocks: &[Diff3Block],
    cfg: &OutputConfig,
) -> io::Result<()> {
    let prefix: &[u8] = if cfg.initial_tab { b"\t" } else { b"  " };

    for block in blocks {
        // For a change confined to one file, the two files that agree
        // print their (identical) lines only once, under the second of
        // them in display order.
        let (oddoneout, dontprint) = match cfg.mapped_kind(block.correspond) {
            MappedKind::All => {
                writeln!(out, "====")?;
                (3, 3)
            }
            MappedKind::Only(position) => {
                writeln!(out, "===={}", position + 1)?;
                (position, usize::from(position == 0))
            }
        };

        let mut i = 0;
        while i < 3 {
            let file = cfg.mapping[i];
            let (lowt, hight) = (block.lo[file], block.hi[file]);

            write!(out, "{}:", i + 1)?;
            if lowt == hight + 1 {
                writeln!(out, "{}a", lowt - 1)?;
            } else if lowt == hight {
                writeln!(out, "{}c", lowt)?;
            } else {
                writeln!(out, "{},{}c", lowt, hight)?;
            }

            if i != dontprint && lowt <= hight {
                let lines = &block.lines[file];
                for line in lines {
                    out.write_all(prefix)?;
                    out.write_all(line)?;
                }
                if let Some(last) = lines.last() {
                    if last.last() != Some(&b'\n') {
                        write!(out, "\n\\ No newline at end of file\n")?;
                    }
                }
            }

            i = if oddoneout == 1 { SKEW[i] } else { i + 1 };
        }
    }

    Ok(())
}
