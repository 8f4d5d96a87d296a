use std::io;
use std::process::{Command, Stdio};

use crate::Res;
use crate::error::Error;

/// Runs the subsidiary diff program on two files and captures its normal
/// format output. Exit status 0 (no differences) and 1 (differences) are
/// both fine; anything else is an error.
///
/// Stdin and stderr are inherited: a `-` operand makes diff read our
/// stdin, and its diagnostics go straight to our stderr.
pub(crate) fn diff_output(
    program: &str,
    text: bool,
    strip_trailing_cr: bool,
    file_a: &str,
    file_b: &str,
) -> Res<Vec<u8>> {
    let mut cmd = Command::new(program);
    if text {
        cmd.arg("-a");
    }
    if strip_trailing_cr {
        cmd.arg("--strip-trailing-cr");
    }
    // A wide horizon keeps hunks stable across the two diff runs.
    cmd.args(["--horizon-lines=100", "--", file_a, file_b]);
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    log::debug!("running subsidiary diff: {:?}", cmd);

    let output = cmd.output().map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::DiffNotFound(program.to_string()),
        io::ErrorKind::PermissionDenied => Error::DiffNotExecutable(program.to_string()),
        _ => Error::SpawnDiff(program.to_string(), err),
    })?;

    match output.status.code() {
        Some(0 | 1) => Ok(output.stdout),
        Some(126) => Err(Error::DiffNotExecutable(program.to_string())),
        Some(127) => Err(Error::DiffNotFound(program.to_string())),
        code => Err(Error::DiffFailed(program.to_string(), code)),
    }
}
