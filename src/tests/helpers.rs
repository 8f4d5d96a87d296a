use crate::merge::{self, Diff3Block, DiffBlock};
use crate::normal_diff::Parser;
use crate::output::{self, OutputConfig};

/// Parses a normal format diff and resolves its lines against the same
/// buffer, the way `run` does with a captured diff.
pub(crate) fn thread(raw: &'static [u8]) -> Vec<DiffBlock<'static>> {
    let blocks = Parser::new(raw).parse_blocks().unwrap();
    merge::resolve(raw, blocks)
}

/// Merges two raw diffs that share a common file. `raw0` is the diff of
/// the first changed file against the common one, `raw1` the second's.
pub(crate) fn merged_blocks(
    raw0: &'static [u8],
    raw1: &'static [u8],
) -> Vec<Diff3Block<'static>> {
    merge::make_3way_diff(&thread(raw0), &thread(raw1)).unwrap()
}

/// The configuration `run` builds for ed script and merge output: the
/// old file is the common one, so command line positions 1 and 2 swap
/// relative to internal order.
pub(crate) fn merge_config() -> OutputConfig {
    OutputConfig {
        show_2nd: false,
        flagging: true,
        overlap_only: false,
        simple_only: false,
        finalwrite: false,
        initial_tab: false,
        mapping: [0, 2, 1],
        rev_mapping: [0, 2, 1],
        labels: ["mine".into(), "older".into(), "yours".into()],
    }
}

/// The configuration for report output: the third operand is the common
/// file and no permutation happens.
pub(crate) fn report_config() -> OutputConfig {
    OutputConfig {
        flagging: false,
        mapping: [0, 1, 2],
        rev_mapping: [0, 1, 2],
        ..merge_config()
    }
}

pub(crate) fn report(blocks: &[Diff3Block], cfg: &OutputConfig) -> String {
    let mut out = Vec::new();
    output::report::write(&mut out, blocks, cfg).unwrap();
    String::from_utf8(out).unwrap()
}

pub(crate) fn ed_script(blocks: &[Diff3Block], cfg: &OutputConfig) -> (String, bool) {
    let mut out = Vec::new();
    let conflicts = output::ed::write(&mut out, blocks, cfg).unwrap();
    (String::from_utf8(out).unwrap(), conflicts)
}

pub(crate) fn merged(
    myfile: &[u8],
    blocks: &[Diff3Block],
    cfg: &OutputConfig,
) -> crate::Res<(String, bool)> {
    let mut out = Vec::new();
    let mut infile = myfile;
    let conflicts = output::merged::write(&mut out, &mut infile, "mine", blocks, cfg)?;
    Ok((String::from_utf8(out).unwrap(), conflicts))
}
