//! mergu compares three files line by line, in the manner of diff3.
//!
//! The pipeline: run the external diff program twice, each time against
//! the common file (src/process.rs); parse each run's normal format
//! output into two-way blocks (src/normal_diff.rs); fuse the two chains
//! into three-way blocks (src/merge.rs); render those as a tagged
//! report, an ed script, or a merged file with conflict markers
//! (src/output/).

pub mod cli;
mod error;
mod merge;
pub mod normal_diff;
mod output;
mod process;
#[cfg(test)]
mod tests;

use std::fs;
use std::io::{self, Write};

pub use error::Error;

pub type Res<T> = Result<T, Error>;

pub const LOG_FILE_NAME: &str = "mergu.log";

use crate::merge::{FILE0, FILE1, FILEC};
use crate::output::OutputConfig;

/// Compares the three files named in `args` and writes the requested
/// output. Returns whether conflicts were found, which the caller turns
/// into exit code 1.
pub fn run(args: &cli::Args, out: &mut impl Write) -> Res<bool> {
    let files = [
        args.myfile.as_str(),
        args.oldfile.as_str(),
        args.yourfile.as_str(),
    ];

    if files.iter().filter(|file| **file == "-").count() > 1 {
        return Err(Error::StdinMultiplyUsed);
    }
    for file in files {
        if file != "-" && fs::metadata(file).is_ok_and(|meta| meta.is_dir()) {
            return Err(Error::InputIsDirectory(file.to_string()));
        }
    }
    if args.labels.len() > 3 {
        return Err(Error::TooManyLabels);
    }
    if !args.labels.is_empty() && !(args.show_all || args.show_overlap || args.flag_overlaps) {
        return Err(Error::LabelsRequireOverlapFormat);
    }

    let edscript = args.edit_script_selected() && !args.merge;

    // The common file is the right side of both subsidiary diffs: the
    // third operand for the report, the old file for ed scripts and
    // merges. Standard input can only feed one diff run, so a `-` there
    // swaps in the other candidate.
    let mut common = if edscript || args.merge { 1 } else { 2 };
    if files[common] == "-" {
        common = 3 - common;
    }
    let mapping = [0, 3 - common, common];
    let mut rev_mapping = [0; 3];
    for position in 0..3 {
        rev_mapping[mapping[position]] = position;
    }

    let commonname = files[rev_mapping[FILEC]];
    let raw1 = process::diff_output(
        &args.diff_program,
        args.text,
        args.strip_trailing_cr,
        files[rev_mapping[FILE1]],
        commonname,
    )?;
    let raw0 = process::diff_output(
        &args.diff_program,
        args.text,
        args.strip_trailing_cr,
        files[rev_mapping[FILE0]],
        commonname,
    )?;

    let thread1 = merge::resolve(&raw1, parse_diff(&raw1, edscript)?);
    let thread0 = merge::resolve(&raw0, parse_diff(&raw0, edscript)?);
    log::debug!(
        "parsed {} + {} two-way blocks",
        thread0.len(),
        thread1.len()
    );

    let diff3 = merge::make_3way_diff(&thread0, &thread1)?;
    log::debug!("merged into {} three-way blocks", diff3.len());

    let mut labels = files.map(str::to_string);
    for (slot, label) in labels.iter_mut().zip(&args.labels) {
        *slot = label.clone();
    }

    let cfg = OutputConfig {
        show_2nd: args.show_all,
        flagging: args.show_all
            || args.show_overlap
            || args.flag_overlaps
            || (args.merge && !args.edit_script_selected()),
        overlap_only: args.overlap_only || args.flag_overlaps,
        simple_only: args.easy_only,
        finalwrite: args.finalwrite,
        initial_tab: args.initial_tab,
        mapping,
        rev_mapping,
        labels,
    };

    let conflicts_found = if args.merge {
        let name = files[rev_mapping[FILE0]];
        let file =
            fs::File::open(name).map_err(|err| Error::ReadInput(name.to_string(), err))?;
        output::merged::write(out, &mut io::BufReader::new(file), name, &diff3, &cfg)?
    } else if edscript {
        output::ed::write(out, &diff3, &cfg).map_err(Error::Write)?
    } else {
        output::report::write(out, &diff3, &cfg).map_err(Error::Write)?;
        false
    };
    out.flush().map_err(Error::Write)?;

    Ok(conflicts_found)
}

fn parse_diff(raw: &[u8], edscript: bool) -> Res<Vec<normal_diff::Block>> {
    let mut parser = normal_diff::Parser::new(raw).keep_incomplete_newlines(edscript);
    let blocks = parser
        .parse_blocks()
        .map_err(|err| Error::BadDiffFormat(err.to_string()))?;
    // Ed scripts can't express a missing final newline; pass the diff
    // program's complaint on to the user instead.
    for note in parser.notes() {
        eprint!("mergu: {}", String::from_utf8_lossy(&raw[note.clone()]));
    }
    Ok(blocks)
}
