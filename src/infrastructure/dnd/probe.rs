//! Shared helper for reading OS settings through command-line tools

use std::process::Stdio;

use tokio::process::Command;
use tracing::warn;

/// Run `program` and return its trimmed stdout.
///
/// Spawn failures and non-zero exits are logged and yield `None`.
pub(crate) async fn read_setting(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(output) => {
            warn!(program, status = %output.status, "Do-not-disturb probe exited with failure");
            None
        }
        Err(e) => {
            warn!(program, error = %e, "Do-not-disturb probe could not run");
            None
        }
    }
}
