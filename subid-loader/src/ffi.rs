//! The C types libsubid's entry points use, from shadow-utils' `subid.h`

#![allow(non_camel_case_types)]

use libc::{c_char, c_int, c_ulong};

/// `struct subid_range`, a contiguous block of subordinate ids
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubidRange {
    pub start: c_ulong,
    pub count: c_ulong,
}

/// `bool subid_init(const char *progname, FILE *logfd)`
pub type SubidInitFn = unsafe extern "C" fn(progname: *const c_char, logfd: *mut libc::FILE) -> bool;

/// `int subid_get_{u,g}id_ranges(const char *owner, struct subid_range **ranges)`
///
/// Returns the number of ranges written to a `malloc`ed array, or a value
/// `<= 0` if there are none or the lookup failed.
pub type SubidGetRangesFn =
    unsafe extern "C" fn(owner: *const c_char, ranges: *mut *mut SubidRange) -> c_int;

unsafe extern "C" {
    /// The C runtime's standard error stream
    pub(crate) static mut stderr: *mut libc::FILE;
}
