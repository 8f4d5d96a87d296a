use std::{fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    StdinMultiplyUsed,
    InputIsDirectory(String),
    TooManyLabels,
    LabelsRequireOverlapFormat,
    OpenLogFile(io::Error),
    SpawnDiff(String, io::Error),
    DiffNotFound(String),
    DiffNotExecutable(String),
    DiffFailed(String, Option<i32>),
    BadDiffFormat(String),
    ReadInput(String, io::Error),
    InputFileShrank(String),
    Write(io::Error),
    CommonLineMismatch,
    HoleInMergedBlock,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StdinMultiplyUsed => f.write_str("'-' specified for more than one input file"),
            Error::InputIsDirectory(file) => {
                f.write_fmt(format_args!("{}: is a directory", file))
            }
            Error::TooManyLabels => f.write_str("too many file label options"),
            Error::LabelsRequireOverlapFormat => {
                f.write_str("'-L' requires one of '-A', '-E' or '-X'")
            }
            Error::OpenLogFile(e) => f.write_fmt(format_args!("Couldn't open log file: {}", e)),
            Error::SpawnDiff(program, e) => {
                f.write_fmt(format_args!("Couldn't run subsidiary program '{}': {}", program, e))
            }
            Error::DiffNotFound(program) => {
                f.write_fmt(format_args!("subsidiary program '{}' not found", program))
            }
            Error::DiffNotExecutable(program) => f.write_fmt(format_args!(
                "subsidiary program '{}' could not be invoked",
                program
            )),
            Error::DiffFailed(program, code) => f.write_fmt(format_args!(
                "subsidiary program '{}' failed (exit status: {})",
                program,
                code.map(|c| c.to_string())
                    .unwrap_or_else(|| "killed by signal".to_string())
            )),
            Error::BadDiffFormat(detail) => {
                f.write_fmt(format_args!("invalid diff format: {}", detail))
            }
            Error::ReadInput(file, e) => f.write_fmt(format_args!("{}: {}", file, e)),
            Error::InputFileShrank(file) => {
                f.write_fmt(format_args!("{}: input file shrank", file))
            }
            Error::Write(e) => f.write_fmt(format_args!("write failed: {}", e)),
            Error::CommonLineMismatch => {
                f.write_str("internal error: subsidiary diffs disagree about the common file")
            }
            Error::HoleInMergedBlock => f.write_str("internal error: hole in merged block"),
        }
    }
}
