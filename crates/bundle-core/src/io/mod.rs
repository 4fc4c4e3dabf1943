//! All-or-nothing file I/O for bundle materialization
//!
//! - **Atomic persist**: content is staged in a temporary file in the target
//!   directory and renamed into place, so a target is never partially written
//! - **No-clobber mode**: the rename refuses to replace an existing file

pub mod atomic;

pub use atomic::{WriteMode, atomic_write};
