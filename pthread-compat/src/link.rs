//! Helpers for consumers that route their pthread calls through the shims.
//!
//! GNU ld's `--wrap=<symbol>` makes every undefined reference to `<symbol>`
//! resolve to `__wrap_<symbol>` instead. Call [`emit_cargo_link_args`] from
//! the `build.rs` of the binary that should bind to the old versions, and
//! [`retain`] from the binary itself.

use crate::Function;

/// The linker driver arguments that wrap every pinned function
pub fn wrap_link_args() -> impl Iterator<Item = String> {
    Function::ALL.into_iter().map(Function::wrap_link_arg)
}

/// Prints a `cargo:rustc-link-arg` instruction for each of the
/// [`wrap_link_args`]
///
/// Only binaries, tests, examples and benches of the package whose build
/// script calls this are affected.
pub fn emit_cargo_link_args() {
    for arg in wrap_link_args() {
        println!("cargo:rustc-link-arg={arg}");
    }
}

/// Keeps the shims in the final binary.
///
/// Libraries like std are placed after this crate on the linker command line,
/// so their wrapped references would otherwise be left unresolved unless
/// something earlier already pulled the shims in.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[inline(never)]
pub fn retain() {
    std::hint::black_box(crate::__wrap_pthread_create as usize);
}
