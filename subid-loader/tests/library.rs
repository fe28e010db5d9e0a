#![cfg(all(target_os = "linux", target_env = "gnu"))]

use subid_loader::{Error, IdKind, Library, Resolver};

#[test]
fn missing_library() {
    let err = Library::open_path(c"libsubid.so.0.0.0-does-not-exist")
        .err()
        .expect("library shouldn't exist");

    match err {
        Error::LibraryNotFound { filename, reason } => {
            assert_eq!(filename, "libsubid.so.0.0.0-does-not-exist");
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn missing_symbols() {
    // Any library that is guaranteed to be loaded works, as long as it doesn't
    // export libsubid's symbols
    let lib = Library::open_path(c"libc.so.6").expect("failed to open libc");
    assert_eq!(lib.filename(), "libc.so.6");

    assert!(lib.symbol(c"malloc").is_ok());

    let err = lib.init_fn().err().expect("libc isn't libsubid");
    assert_eq!(
        err.to_string(),
        format!("cannot dlsym(3) {}", subid_loader::SUBID_INIT)
    );

    assert!(matches!(
        lib.id_ranges(IdKind::Uid, "root"),
        Err(Error::SymbolNotFound(name)) if name == subid_loader::SUBID_GET_UID_RANGES_SYMBOL
    ));
    assert!(matches!(lib.init(), Err(Error::SymbolNotFound(_))));
}
