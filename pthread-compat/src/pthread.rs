//! The `__wrap_` shims for each pinned pthread function.
//!
//! Every shim calls a private alias symbol, and a `.symver` directive in this
//! same module binds that alias to the historical versioned glibc symbol.
//! `.symver` only applies to references in the object file it is assembled
//! into, so the directives and the calls must stay in this module.

#![allow(non_camel_case_types)]

use libc::{c_int, c_void};

pub type pthread_main_t = unsafe extern "C" fn(_: *mut c_void) -> *mut c_void;

macro_rules! emit_symver_directives {
    ($(
        $(#[$doc:meta])*
        $arch:ident($arch_name:literal) if $cfg:meta => {
            sigmask: $sigmask:literal,
            create: $create:literal,
            detach: $detach:literal,
            getstacksize: $getstacksize:literal $(,)?
        }
    )+) => {
        $(
            #[cfg(all($cfg, not(miri)))]
            std::arch::global_asm!(
                concat!(".symver __pthread_compat_sigmask, pthread_sigmask@", $sigmask),
                concat!(".symver __pthread_compat_create, pthread_create@", $create),
                concat!(".symver __pthread_compat_detach, pthread_detach@", $detach),
                concat!(
                    ".symver __pthread_compat_attr_getstacksize, pthread_attr_getstacksize@",
                    $getstacksize
                ),
            );
        )+
    };
}

crate::versions::with_symbol_table!(emit_symver_directives);

// None of these aliases are defined anywhere, the assembler rewrites every
// reference to them into a reference to the versioned glibc symbol
unsafe extern "C" {
    #[link_name = "__pthread_compat_sigmask"]
    fn compat_pthread_sigmask(
        how: c_int,
        set: *const libc::sigset_t,
        oldset: *mut libc::sigset_t,
    ) -> c_int;

    #[link_name = "__pthread_compat_create"]
    fn compat_pthread_create(
        thread: *mut libc::pthread_t,
        attr: *const libc::pthread_attr_t,
        main: pthread_main_t,
        arg: *mut c_void,
    ) -> c_int;

    #[link_name = "__pthread_compat_detach"]
    fn compat_pthread_detach(thread: libc::pthread_t) -> c_int;

    #[link_name = "__pthread_compat_attr_getstacksize"]
    fn compat_pthread_attr_getstacksize(
        attr: *const libc::pthread_attr_t,
        stacksize: *mut usize,
    ) -> c_int;
}

/// `pthread_sigmask` bound to the version from [`crate::Arch::TARGET`]
///
/// # Safety
///
/// Same contract as [`libc::pthread_sigmask`]
#[unsafe(no_mangle)]
#[inline(never)]
pub unsafe extern "C" fn __wrap_pthread_sigmask(
    how: c_int,
    set: *const libc::sigset_t,
    oldset: *mut libc::sigset_t,
) -> c_int {
    unsafe { compat_pthread_sigmask(how, set, oldset) }
}

/// `pthread_create` bound to the version from [`crate::Arch::TARGET`]
///
/// # Safety
///
/// Same contract as [`libc::pthread_create`]
#[unsafe(no_mangle)]
#[inline(never)]
pub unsafe extern "C" fn __wrap_pthread_create(
    thread: *mut libc::pthread_t,
    attr: *const libc::pthread_attr_t,
    main: pthread_main_t,
    arg: *mut c_void,
) -> c_int {
    unsafe { compat_pthread_create(thread, attr, main, arg) }
}

/// `pthread_detach` bound to the version from [`crate::Arch::TARGET`]
///
/// # Safety
///
/// `thread` must be a joinable thread that has not already been detached or
/// joined
#[unsafe(no_mangle)]
#[inline(never)]
pub unsafe extern "C" fn __wrap_pthread_detach(thread: libc::pthread_t) -> c_int {
    unsafe { compat_pthread_detach(thread) }
}

/// `pthread_attr_getstacksize` bound to the version from [`crate::Arch::TARGET`]
///
/// # Safety
///
/// `attr` must point to an initialized attribute object and `stacksize` must
/// be valid for writes
#[unsafe(no_mangle)]
#[inline(never)]
pub unsafe extern "C" fn __wrap_pthread_attr_getstacksize(
    attr: *const libc::pthread_attr_t,
    stacksize: *mut usize,
) -> c_int {
    unsafe { compat_pthread_attr_getstacksize(attr, stacksize) }
}
