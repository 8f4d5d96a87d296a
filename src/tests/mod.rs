//! Tests for the merge pipeline.
//!
//! The emitter tests (ed, merged, report) build three-way chains from
//! hand-written diff output. The scenario tests here write real files
//! into a temporary directory and exercise `run` end to end, subsidiary
//! diff program included.

use std::fs;

use clap::Parser;
use pretty_assertions::assert_eq;
use temp_dir::TempDir;

mod helpers;
mod merged;

use crate::{Error, Res, cli::Args};

fn scenario(contents: [&str; 3], flags: &[&str]) -> (String, Res<bool>) {
    let dir = TempDir::new().unwrap();
    let paths = ["MYFILE", "OLDFILE", "YOURFILE"].map(|name| dir.path().join(name));
    for (path, content) in paths.iter().zip(contents) {
        fs::write(path, content).unwrap();
    }

    let mut argv: Vec<String> = vec!["mergu".into()];
    argv.extend(flags.iter().map(|flag| flag.to_string()));
    argv.extend(paths.iter().map(|path| path.to_string_lossy().into_owned()));
    let args = Args::try_parse_from(&argv).unwrap();

    let mut out = Vec::new();
    let result = crate::run(&args, &mut out);
    (String::from_utf8(out).unwrap(), result)
}

const LABELS: [&str; 6] = ["-L", "MYFILE", "-L", "OLDFILE", "-L", "YOURFILE"];

#[test]
fn three_identical_files() {
    let (out, result) = scenario(["a\n", "a\n", "a\n"], &[]);
    assert_eq!(out, "");
    assert!(!result.unwrap());

    let (out, result) = scenario(["a\n", "a\n", "a\n"], &["-m"]);
    assert_eq!(out, "a\n");
    assert!(!result.unwrap());

    let (out, _) = scenario(["a\n", "a\n", "a\n"], &["-e"]);
    assert_eq!(out, "");

    let (out, _) = scenario(["a\n", "a\n", "a\n"], &["-e", "-i"]);
    assert_eq!(out, "w\nq\n");
}

#[test]
fn nonoverlapping_changes_merge_cleanly() {
    let (out, result) = scenario(["A\nb\nc\n", "a\nb\nc\n", "a\nb\nC\n"], &["-m"]);
    assert_eq!(out, "A\nb\nC\n");
    assert!(!result.unwrap());
}

#[test]
fn overlapping_changes_conflict() {
    let mut flags = vec!["-m", "-A"];
    flags.extend(LABELS);
    let (out, result) = scenario(["x\n", "a\n", "y\n"], &flags);
    assert_eq!(
        out,
        "<<<<<<< MYFILE\nx\n||||||| OLDFILE\na\n=======\ny\n>>>>>>> YOURFILE\n"
    );
    assert!(result.unwrap());
}

#[test]
fn identical_changes_merge_cleanly() {
    let (out, result) = scenario(["b\n", "a\n", "b\n"], &["-m"]);
    assert_eq!(out, "b\n");
    assert!(!result.unwrap());
}

#[test]
fn ed_script_quotes_leading_dots() {
    let (out, result) = scenario([".\n", ".\n", ".x\n"], &["-e"]);
    assert_eq!(out, "1c\n..x\n.\n1s/^\\.//\n");
    assert!(!result.unwrap());
}

#[test]
fn report_notes_missing_final_newline() {
    let (out, result) = scenario(["b", "a\n", "a\n"], &[]);
    assert_eq!(
        out,
        "====1\n1:1c\n  b\n\\ No newline at end of file\n2:1c\n3:1c\n  a\n"
    );
    assert!(!result.unwrap());
}

#[test]
fn show_overlap_ed_script_brackets_conflicts() {
    let mut flags = vec!["-E"];
    flags.extend(LABELS);
    let (out, result) = scenario(["x\n", "a\n", "y\n"], &flags);
    assert_eq!(
        out,
        "1a\n=======\ny\n>>>>>>> YOURFILE\n.\n0a\n<<<<<<< MYFILE\n.\n"
    );
    assert!(result.unwrap());
}

#[test]
fn stdin_for_more_than_one_file_is_rejected() {
    let args = Args::try_parse_from(["mergu", "-", "x", "-"]).unwrap();
    let mut out = Vec::new();
    assert!(matches!(
        crate::run(&args, &mut out),
        Err(Error::StdinMultiplyUsed)
    ));
}

#[test]
fn labels_require_an_overlap_format() {
    let args = Args::try_parse_from(["mergu", "-e", "-L", "mine", "a", "b", "c"]).unwrap();
    let mut out = Vec::new();
    assert!(matches!(
        crate::run(&args, &mut out),
        Err(Error::LabelsRequireOverlapFormat)
    ));
}

#[test]
fn output_formats_are_mutually_exclusive() {
    assert!(Args::try_parse_from(["mergu", "-e", "-A", "a", "b", "c"]).is_err());
    assert!(Args::try_parse_from(["mergu", "-x", "-3", "a", "b", "c"]).is_err());
    assert!(Args::try_parse_from(["mergu", "-i", "-m", "a", "b", "c"]).is_err());
    assert!(Args::try_parse_from(["mergu", "-m", "-A", "a", "b", "c"]).is_ok());
    assert!(Args::try_parse_from(["mergu", "-e", "-i", "a", "b", "c"]).is_ok());
}

#[test]
fn directories_are_rejected() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let sub = sub.to_string_lossy().into_owned();

    let args = Args::try_parse_from(["mergu", sub.as_str(), "b", "c"]).unwrap();
    let mut out = Vec::new();
    assert!(matches!(
        crate::run(&args, &mut out),
        Err(Error::InputIsDirectory(_))
    ));
}

#[test]
fn missing_diff_program_is_reported() {
    let (_, result) = scenario(
        ["a\n", "a\n", "a\n"],
        &["--diff-program", "mergu-no-such-diff"],
    );
    assert!(matches!(result, Err(Error::DiffNotFound(_))));
}
