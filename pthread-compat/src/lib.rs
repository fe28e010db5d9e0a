//! Binds `pthread_sigmask`, `pthread_create`, `pthread_detach` and
//! `pthread_attr_getstacksize` to fixed historical glibc symbol versions.
//!
//! glibc 2.34 moved libpthread into libc, giving these functions new symbol
//! versions. A binary linked against 2.34 or later therefore refuses to load
//! on anything older, even though the functions themselves didn't change. The
//! `__wrap_` shims in this crate call the old versions instead, and with the
//! linker's `--wrap` option (see [`link`]) every reference in the final binary
//! goes through them.
//!
//! The shims are pure forwarding calls, arguments and return values pass
//! through untouched, including error codes.
//!
//! # Supported targets
//!
//! The shims only exist on `linux-gnu` targets. The symbol table in
//! [`Arch`] covers `aarch64`, `arm`, `x86`, `powerpc64le`, `s390x` and
//! `x86_64`; building for any other `linux-gnu` architecture is a compile
//! error, as guessing a version would produce a binary that fails to load, or
//! worse, silently binds to the wrong implementation.

#![allow(unsafe_code)]

mod versions;

pub use versions::{Arch, Function};

pub mod link;

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", target_env = "gnu"))] {
        mod pthread;

        pub use pthread::{
            __wrap_pthread_attr_getstacksize, __wrap_pthread_create, __wrap_pthread_detach,
            __wrap_pthread_sigmask, pthread_main_t,
        };
    }
}
