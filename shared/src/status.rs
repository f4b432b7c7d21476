//! Signed status codes shared by every core error type.
//!
//! Callers that cross an FFI or logging boundary can flatten any core error
//! into one of these through its `code()` accessor. `0` and positive values
//! are success codes; the step protocol of the packed view uses `1` for
//! "complete" and `0` for "pending".

pub const OK: i32 = 0;
pub const COMPLETE: i32 = 1;
pub const PENDING: i32 = 0;

pub const INVALID: i32 = -1;
pub const FULL: i32 = -2;
pub const EMPTY: i32 = -3;
pub const ID_MISMATCH: i32 = -4;
pub const SHAPE_MISMATCH: i32 = -5;
pub const INSUFFICIENT_CAPACITY: i32 = -6;
pub const UNSUPPORTED: i32 = -7;
