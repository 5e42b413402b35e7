//! Opening the output folder in the platform file manager.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Program and arguments that reveal `dir` in the file manager.
pub fn open_command(dir: &Path) -> (&'static str, Vec<OsString>) {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    // A bare file name has an empty parent; open the working directory instead
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    (program, vec![dir.as_os_str().to_os_string()])
}

/// Launches the file manager on `dir` without waiting for it to exit.
pub fn open_directory(dir: &Path) -> std::io::Result<()> {
    let (program, args) = open_command(dir);
    debug!(program, dir = %dir.display(), "Opening output directory");

    // The viewer outlives us; the handle is dropped without waiting
    let _child = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}
