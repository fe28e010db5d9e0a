/// The libsubid ABI version used when `SUBID_ABI_VERSION` isn't set
const DEFAULT_ABI_VERSION: &str = "3.0.0";

fn is_valid_version(version: &str) -> bool {
    version
        .split('.')
        .all(|component| !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit()))
}

/// The major is compared as a `u32`, so it has to fit in one
fn major_fits(version: &str) -> bool {
    version
        .split('.')
        .next()
        .is_some_and(|major| major.parse::<u32>().is_ok())
}

fn main() {
    println!("cargo:rerun-if-env-changed=SUBID_ABI_VERSION");

    let (version, source) = match std::env::var("SUBID_ABI_VERSION") {
        Ok(version) => (version, "environment"),
        Err(std::env::VarError::NotPresent) => (DEFAULT_ABI_VERSION.to_owned(), "default"),
        Err(std::env::VarError::NotUnicode(raw)) => {
            panic!("SUBID_ABI_VERSION is not valid unicode: {raw:?}")
        }
    };

    assert!(
        is_valid_version(&version),
        "SUBID_ABI_VERSION '{version}' is not a dotted numeric version, eg. '{DEFAULT_ABI_VERSION}'"
    );

    assert!(
        major_fits(&version),
        "SUBID_ABI_VERSION '{version}' has a major version larger than {}",
        u32::MAX
    );

    println!("cargo:rustc-env=SUBID_ABI_VERSION={version}");
    println!("cargo:rustc-env=SUBID_ABI_VERSION_SOURCE={source}");
}
