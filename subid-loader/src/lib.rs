//! Describes the optional libsubid shared library from shadow-utils and
//! forwards calls into it.
//!
//! libsubid answers which subordinate uid and gid ranges, as configured in
//! `/etc/subuid` and `/etc/subgid` or a remote provider, are delegated to an
//! account. Not every host has it, so rather than linking it this crate
//! describes where it is ([`LIBSUBID`]) and what its entry points are called
//! ([`SUBID_INIT`], [`SUBID_GET_GID_RANGES_SYMBOL`],
//! [`SUBID_GET_UID_RANGES_SYMBOL`]), so it can be loaded at runtime.
//!
//! The names depend on the libsubid ABI version, which is picked at build
//! time via the `SUBID_ABI_VERSION` environment variable, defaulting to
//! `3.0.0`.
//!
//! Once the entry points are resolved, the functions in [`forward`] call
//! through them. On Linux, [`Library`] does the resolving with `dlopen`, and
//! [`validate_subid_ranges`] uses it to check an account has subordinate ids.

#![allow(unsafe_code)]

mod abi;
mod error;

pub use abi::{
    ABI_MAJOR, ABI_VERSION, Descriptor, IdKind, LIBSUBID, LIBSUBID_C, LIBSUBID_INIT,
    SUBID_GET_GID_RANGES_SYMBOL, SUBID_GET_UID_RANGES_SYMBOL, SUBID_INIT, Symbol, abi_major,
};
pub use error::Error;

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        pub mod ffi;
        pub mod forward;
        mod library;
        mod ranges;

        pub use library::{Library, validate_subid_ranges};
        pub use ranges::{IdRanges, Resolver, id_ranges, init, validate_with};
    }
}
