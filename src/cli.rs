use clap::{ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(name = "mergu", version)]
#[command(about = "Compare three files line by line and merge them")]
#[command(group(ArgGroup::new("format").args([
    "show_all",
    "show_overlap",
    "flag_overlaps",
    "overlap_only",
    "easy_only",
    "ed",
])))]
pub struct Args {
    /// Treat all files as text
    #[arg(short = 'a', long = "text")]
    pub text: bool,

    /// Output an ed script incorporating changes from OLDFILE to YOURFILE
    /// into MYFILE
    #[arg(short = 'e', long = "ed")]
    pub ed: bool,

    /// Like -e, but bracket conflicts
    #[arg(short = 'E', long = "show-overlap")]
    pub show_overlap: bool,

    /// Like -e, but incorporate only nonoverlapping changes
    #[arg(short = '3', long = "easy-only")]
    pub easy_only: bool,

    /// Like -e, but incorporate only overlapping changes
    #[arg(short = 'x', long = "overlap-only")]
    pub overlap_only: bool,

    /// Like -x, but bracket conflicts
    #[arg(short = 'X')]
    pub flag_overlaps: bool,

    /// Like -e, but bracket all changes, including ones both files agree on
    #[arg(short = 'A', long = "show-all")]
    pub show_all: bool,

    /// Append 'w' and 'q' commands to ed scripts
    #[arg(short = 'i', conflicts_with = "merge")]
    pub finalwrite: bool,

    /// Output the merged file instead of an ed script
    #[arg(short = 'm', long = "merge")]
    pub merge: bool,

    /// Make tabs line up by prefixing a tab to output lines
    #[arg(short = 'T', long = "initial-tab")]
    pub initial_tab: bool,

    /// Strip trailing carriage return on input
    #[arg(long = "strip-trailing-cr")]
    pub strip_trailing_cr: bool,

    /// Use LABEL instead of the file name for output (may be given up to
    /// three times, one per file)
    #[arg(short = 'L', long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Use PROGRAM to compare the files
    #[arg(long = "diff-program", value_name = "PROGRAM", default_value = "diff")]
    pub diff_program: String,

    /// Write debug output to mergu.log in the current directory
    #[arg(long)]
    pub log: bool,

    /// The file the merged changes go into
    #[arg(value_name = "MYFILE")]
    pub myfile: String,

    /// The common ancestor of the other two files
    #[arg(value_name = "OLDFILE")]
    pub oldfile: String,

    /// The file whose changes are merged in
    #[arg(value_name = "YOURFILE")]
    pub yourfile: String,
}

impl Args {
    /// Whether any of the ed script selectors was given. Without `-m`
    /// these switch the output to an ed script; with `-m` they pick
    /// which blocks the merge incorporates.
    pub(crate) fn edit_script_selected(&self) -> bool {
        self.ed
            || self.show_all
            || self.show_overlap
            || self.flag_overlaps
            || self.overlap_only
            || self.easy_only
    }
}
