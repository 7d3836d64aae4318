//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Description                                          |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad args, no settings file configured)  |
//! | 3    | IO error (settings file unreadable or unwritable)    |
//! | 4    | Requested box or pair does not exist                 |
//! | 5    | Check failed (`fmt --check` differences, `lint` hits, non-UTF-8 file refused) |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, value not valid for `--as`, no file to act on.
pub const EXIT_USAGE: u8 = 2;

/// Settings or config file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// `get` / `unset` named a box or pair that is not in the file.
pub const EXIT_MISSING_KEY: u8 = 4;

/// `fmt --check` found a file that is not in canonical form, `lint` found
/// malformed lines, or a rewrite was refused because the file is not UTF-8.
pub const EXIT_CHECK_FAILED: u8 = 5;
