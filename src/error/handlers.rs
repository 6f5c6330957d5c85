//! Error handlers
//!
//! Turns errors into user-facing diagnostics.

use log::debug;
use std::io::Write;

use crate::error::types::FxfError;

/// Exit status for usage and fatal errors
pub const EXIT_FAILURE: i32 = 1;

/// Log the error and write a one-line diagnostic to `out`
pub fn report_error<W: Write>(out: &mut W, err: &FxfError) {
    if err.is_fatal() {
        debug!("fatal: {err:?}");
    } else {
        debug!("{err:?}");
    }
    // Nothing sensible is left to do if stderr is gone.
    let _ = writeln!(out, "fxf: {err}");
}

/// Exit status for an error that ends the run
pub fn exit_code(err: &FxfError) -> i32 {
    match err {
        FxfError::Config(_) | FxfError::Resolve(_) => EXIT_FAILURE,
        FxfError::Transfer(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResolveError, TransferError};
    use std::path::PathBuf;

    #[test]
    fn diagnostic_is_prefixed_and_carries_the_message() {
        let err = FxfError::from(TransferError::OutsideTransferDir(PathBuf::from("/etc/passwd")));
        let mut out = Vec::new();
        report_error(&mut out, &err);

        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("fxf: Attempted to access file outside"));
        assert!(line.contains("/etc/passwd"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn only_fatal_errors_change_the_exit_status() {
        let fatal = FxfError::from(ResolveError::EntryNotFound {
            tag: "/vstation_fxf".into(),
            path: PathBuf::from("/etc/fstab"),
        });
        let item = FxfError::from(TransferError::InvalidPath("empty".into()));

        assert!(fatal.is_fatal());
        assert_eq!(exit_code(&fatal), EXIT_FAILURE);
        assert!(!item.is_fatal());
        assert_eq!(exit_code(&item), 0);
    }
}
