//! Constants and size limits shared across the interpreter.

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "liblisp 0.1.0";
pub const WELCOME_SUBTITLE: &str = "A small Lisp interpreter with mark-and-sweep garbage collection";

/// Ceiling on the number of bytes a single String cell may hold. The reader
/// aborts a string literal that grows past this.
pub const MAX_STRING_LEN: usize = 4096;

/// Ceiling on the number of live cells the allocator will track. Crossing it
/// is a fatal-to-process condition.
pub const MAX_CELLS: usize = 1 << 20;

pub const HISTORY_FILE: &str = ".liblisp_history";
