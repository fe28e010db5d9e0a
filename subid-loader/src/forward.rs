//! Calls through libsubid function pointers that were resolved elsewhere.
//!
//! Nothing here checks or translates results, whatever the resolved function
//! returns is what the caller gets.

use crate::ffi::{SubidGetRangesFn, SubidInitFn, SubidRange, stderr};
use libc::{c_char, c_int};
use std::ptr;

/// Initializes libsubid with no program name, logging to stderr.
///
/// The return value of the initializer is discarded.
///
/// # Safety
///
/// `func` must be libsubid's initializer, or a function with the same
/// signature and contract.
pub unsafe fn init(func: SubidInitFn) {
    unsafe {
        let logfd = ptr::addr_of!(stderr).read();
        func(ptr::null(), logfd);
    }
}

/// Looks up the ranges of `owner`, returning the lookup function's result
/// unchanged
///
/// # Safety
///
/// `func` must be one of libsubid's range lookup functions, or a function
/// with the same signature and contract. `owner` and `ranges` are passed as is,
/// so must satisfy whatever `func` requires of them.
pub unsafe fn get_id_ranges(
    func: SubidGetRangesFn,
    owner: *const c_char,
    ranges: *mut *mut SubidRange,
) -> c_int {
    unsafe { func(owner, ranges) }
}
