//! Checks that each shim behaves exactly like calling libc directly
#![cfg(all(target_os = "linux", target_env = "gnu"))]

use pthread_compat as pc;
use std::{mem, ptr};

unsafe fn current_mask() -> libc::sigset_t {
    unsafe {
        let mut set: libc::sigset_t = mem::zeroed();
        assert_eq!(
            libc::pthread_sigmask(libc::SIG_SETMASK, ptr::null(), &mut set),
            0
        );
        set
    }
}

#[test]
fn sigmask_matches_libc() {
    // Do the work on a fresh thread so the test harness threads keep their mask
    std::thread::spawn(|| unsafe {
        let before = current_mask();

        let mut block: libc::sigset_t = mem::zeroed();
        libc::sigemptyset(&mut block);
        libc::sigaddset(&mut block, libc::SIGUSR1);

        let mut old: libc::sigset_t = mem::zeroed();
        assert_eq!(
            pc::__wrap_pthread_sigmask(libc::SIG_BLOCK, &block, &mut old),
            0
        );
        assert_eq!(libc::sigismember(&old, libc::SIGUSR1), 0);

        let now = current_mask();
        assert_eq!(libc::sigismember(&now, libc::SIGUSR1), 1);

        let mut restored: libc::sigset_t = mem::zeroed();
        assert_eq!(
            pc::__wrap_pthread_sigmask(libc::SIG_SETMASK, &before, &mut restored),
            0
        );
        assert_eq!(libc::sigismember(&restored, libc::SIGUSR1), 1);
        assert_eq!(libc::sigismember(&current_mask(), libc::SIGUSR1), 0);
    })
    .join()
    .unwrap();
}

#[test]
fn sigmask_passes_errors_through() {
    unsafe {
        let set: libc::sigset_t = mem::zeroed();
        let bogus_how = 0x7fff;

        let direct = libc::pthread_sigmask(bogus_how, &set, ptr::null_mut());
        let wrapped = pc::__wrap_pthread_sigmask(bogus_how, &set, ptr::null_mut());

        assert_eq!(direct, libc::EINVAL);
        assert_eq!(wrapped, direct);
    }
}

extern "C" fn add_one(arg: *mut libc::c_void) -> *mut libc::c_void {
    let value = unsafe { &mut *arg.cast::<u32>() };
    *value += 1;
    arg
}

#[test]
fn create_runs_the_thread() {
    unsafe {
        let mut value = 41u32;
        let arg = (&mut value as *mut u32).cast::<libc::c_void>();

        let mut thread: libc::pthread_t = mem::zeroed();
        assert_eq!(
            pc::__wrap_pthread_create(&mut thread, ptr::null(), add_one, arg),
            0
        );

        let mut ret = ptr::null_mut();
        assert_eq!(libc::pthread_join(thread, &mut ret), 0);

        assert_eq!(ret, arg);
        assert_eq!(value, 42);
    }
}

#[test]
fn create_passes_errors_through() {
    unsafe {
        let mut attr: libc::pthread_attr_t = mem::zeroed();
        assert_eq!(libc::pthread_attr_init(&mut attr), 0);
        // A stack this large can never be mapped
        assert_eq!(
            libc::pthread_attr_setstacksize(&mut attr, usize::MAX & !0xfff),
            0
        );

        let mut thread: libc::pthread_t = mem::zeroed();
        let direct = libc::pthread_create(&mut thread, &attr, add_one, ptr::null_mut());
        let wrapped = pc::__wrap_pthread_create(&mut thread, &attr, add_one, ptr::null_mut());

        assert_ne!(direct, 0);
        assert_eq!(wrapped, direct);

        libc::pthread_attr_destroy(&mut attr);
    }
}

extern "C" fn wait_for_release(arg: *mut libc::c_void) -> *mut libc::c_void {
    let rx = unsafe { Box::from_raw(arg.cast::<std::sync::mpsc::Receiver<()>>()) };
    let _ = rx.recv();
    ptr::null_mut()
}

#[test]
fn detach_matches_libc() {
    unsafe {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let arg = Box::into_raw(Box::new(rx)).cast::<libc::c_void>();

        let mut thread: libc::pthread_t = mem::zeroed();
        assert_eq!(
            libc::pthread_create(&mut thread, ptr::null(), wait_for_release, arg),
            0
        );

        assert_eq!(pc::__wrap_pthread_detach(thread), 0);
        tx.send(()).unwrap();
    }
}

#[test]
fn getstacksize_matches_libc() {
    unsafe {
        let mut attr: libc::pthread_attr_t = mem::zeroed();
        assert_eq!(libc::pthread_attr_init(&mut attr), 0);

        let requested = 4 * 1024 * 1024;
        assert_eq!(libc::pthread_attr_setstacksize(&mut attr, requested), 0);

        let mut direct = 0;
        let mut wrapped = 0;
        assert_eq!(libc::pthread_attr_getstacksize(&attr, &mut direct), 0);
        assert_eq!(pc::__wrap_pthread_attr_getstacksize(&attr, &mut wrapped), 0);

        assert_eq!(wrapped, requested);
        assert_eq!(wrapped, direct);

        libc::pthread_attr_destroy(&mut attr);
    }
}
