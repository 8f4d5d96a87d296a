use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use super::helpers::{merge_config, merged, merged_blocks};
use crate::Error;

#[test]
fn distinct_changes_splice_together() {
    let blocks = merged_blocks(b"1c1\n< A\n---\n> a\n", b"3c3\n< C\n---\n> c\n");
    let (out, conflicts) = merged(b"A\nb\nc\n", &blocks, &merge_config()).unwrap();

    assert!(!conflicts);
    assert_eq!(out, "A\nb\nC\n");
}

#[test]
fn overlap_brackets_both_sides() {
    let blocks = merged_blocks(b"1c1\n< x\n---\n> a\n", b"1c1\n< y\n---\n> a\n");
    let mut cfg = merge_config();
    cfg.show_2nd = true;
    let (out, conflicts) = merged(b"x\n", &blocks, &cfg).unwrap();

    assert!(conflicts);
    assert_snapshot!(out, @r"
    <<<<<<< mine
    x
    ||||||| older
    a
    =======
    y
    >>>>>>> yours
    ");
}

#[test]
fn overlap_without_show_2nd_omits_the_base() {
    let blocks = merged_blocks(b"1c1\n< x\n---\n> a\n", b"1c1\n< y\n---\n> a\n");
    let (out, conflicts) = merged(b"x\n", &blocks, &merge_config()).unwrap();

    assert!(conflicts);
    assert_snapshot!(out, @r"
    <<<<<<< mine
    x
    =======
    y
    >>>>>>> yours
    ");
}

#[test]
fn identical_changes_pass_through_silently() {
    let blocks = merged_blocks(b"1c1\n< b\n---\n> a\n", b"1c1\n< b\n---\n> a\n");
    let (out, conflicts) = merged(b"b\n", &blocks, &merge_config()).unwrap();

    assert!(!conflicts);
    assert_eq!(out, "b\n");
}

#[test]
fn identical_changes_bracket_the_old_file_under_show_2nd() {
    let blocks = merged_blocks(b"1c1\n< b\n---\n> a\n", b"1c1\n< b\n---\n> a\n");
    let mut cfg = merge_config();
    cfg.show_2nd = true;
    let (out, conflicts) = merged(b"b\n", &blocks, &cfg).unwrap();

    assert!(conflicts);
    assert_snapshot!(out, @r"
    <<<<<<< older
    a
    =======
    b
    >>>>>>> yours
    ");
}

#[test]
fn changes_only_in_the_first_file_stream_through() {
    let blocks = merged_blocks(b"2c2\n< B\n---\n> b\n", b"");
    let (out, conflicts) = merged(b"a\nB\nc\n", &blocks, &merge_config()).unwrap();

    assert!(!conflicts);
    assert_eq!(out, "a\nB\nc\n");
}

#[test]
fn unflagged_overlap_takes_the_second_file() {
    let blocks = merged_blocks(b"1c1\n< x\n---\n> a\n", b"1c1\n< y\n---\n> a\n");
    let mut cfg = merge_config();
    cfg.flagging = false;
    let (out, conflicts) = merged(b"x\n", &blocks, &cfg).unwrap();

    assert!(!conflicts);
    assert_eq!(out, "y\n");
}

#[test]
fn easy_only_keeps_the_first_files_version_of_overlaps() {
    let blocks = merged_blocks(b"1c1\n< x\n---\n> a\n", b"1c1\n< y\n---\n> a\n");
    let mut cfg = merge_config();
    cfg.simple_only = true;
    let (out, conflicts) = merged(b"x\n", &blocks, &cfg).unwrap();

    assert!(!conflicts);
    assert_eq!(out, "x\n");
}

#[test]
fn the_tail_is_copied_verbatim() {
    let blocks = merged_blocks(b"1c1\n< A\n---\n> a\n", b"");
    let (out, _) = merged(b"A\nrest\nwithout newline", &blocks, &merge_config()).unwrap();

    assert_eq!(out, "A\nrest\nwithout newline");
}

#[test]
fn a_final_line_without_newline_can_be_replaced() {
    let blocks = merged_blocks(b"1c1\n< x\n---\n> a\n", b"1c1\n< y\n---\n> a\n");
    let (out, conflicts) = merged(b"x", &blocks, &merge_config()).unwrap();

    assert!(conflicts);
    assert_snapshot!(out, @r"
    <<<<<<< mine
    x
    =======
    y
    >>>>>>> yours
    ");
}

#[test]
fn a_shrunken_input_file_is_fatal() {
    let blocks = merged_blocks(b"", b"5c5\n< Y\n---\n> e\n");

    assert!(matches!(
        merged(b"a\n", &blocks, &merge_config()),
        Err(Error::InputFileShrank(_))
    ));
}
