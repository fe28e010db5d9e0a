//! Where libsubid lives and what its entry points are called, for the ABI
//! version this crate was built against.
//!
//! The version comes from the `SUBID_ABI_VERSION` environment variable at
//! build time, defaulting to `3.0.0`. shadow-utils 4.x renamed the exported
//! functions, so the symbol names depend on the ABI major version.

use std::ffi::CStr;

/// The configured libsubid ABI version, eg. `3.0.0`
pub const ABI_VERSION: &str = env!("SUBID_ABI_VERSION");

/// The leading component of [`ABI_VERSION`]
pub const ABI_MAJOR: u32 = abi_major(ABI_VERSION);

/// The shared object filename, eg. `libsubid.so.3.0.0`
pub const LIBSUBID: &str = concat!("libsubid.so.", env!("SUBID_ABI_VERSION"));

/// [`LIBSUBID`] as a C string, for passing to `dlopen`
pub const LIBSUBID_C: &CStr =
    match CStr::from_bytes_with_nul(concat!("libsubid.so.", env!("SUBID_ABI_VERSION"), "\0").as_bytes()) {
        Ok(filename) => filename,
        Err(_) => panic!("SUBID_ABI_VERSION contains a nul byte"),
    };

/// The symbol that initializes libsubid
pub const SUBID_INIT: &str = Symbol::Init.name(ABI_MAJOR);
/// Alias of [`SUBID_INIT`]
pub const LIBSUBID_INIT: &str = SUBID_INIT;
/// The symbol that looks up the subordinate gid ranges of an owner
pub const SUBID_GET_GID_RANGES_SYMBOL: &str = Symbol::GetGidRanges.name(ABI_MAJOR);
/// The symbol that looks up the subordinate uid ranges of an owner
pub const SUBID_GET_UID_RANGES_SYMBOL: &str = Symbol::GetUidRanges.name(ABI_MAJOR);

/// The first ABI major version using the `subid_` prefixed names
const RENAMED_IN_MAJOR: u32 = 4;

/// Parses the leading numeric component of a dotted version, saturating at
/// `u32::MAX`
pub const fn abi_major(version: &str) -> u32 {
    let bytes = version.as_bytes();
    let mut major = 0u32;
    let mut i = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        major = major.saturating_mul(10).saturating_add((bytes[i] - b'0') as u32);
        i += 1;
    }

    major
}

/// One of the libsubid entry points this crate calls
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Init,
    GetGidRanges,
    GetUidRanges,
}

impl Symbol {
    /// The exported name of the symbol under the specified ABI major version
    pub const fn name(self, major: u32) -> &'static str {
        if major >= RENAMED_IN_MAJOR {
            match self {
                Self::Init => "subid_init",
                Self::GetGidRanges => "subid_get_gid_ranges",
                Self::GetUidRanges => "subid_get_uid_ranges",
            }
        } else {
            match self {
                Self::Init => "libsubid_init",
                Self::GetGidRanges => "get_subgid_ranges",
                Self::GetUidRanges => "get_subuid_ranges",
            }
        }
    }

    /// Same as [`Self::name`], but nul terminated for `dlsym`
    pub const fn c_name(self, major: u32) -> &'static CStr {
        if major >= RENAMED_IN_MAJOR {
            match self {
                Self::Init => c"subid_init",
                Self::GetGidRanges => c"subid_get_gid_ranges",
                Self::GetUidRanges => c"subid_get_uid_ranges",
            }
        } else {
            match self {
                Self::Init => c"libsubid_init",
                Self::GetGidRanges => c"get_subgid_ranges",
                Self::GetUidRanges => c"get_subuid_ranges",
            }
        }
    }
}

/// Which kind of subordinate ids to look up
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdKind {
    Gid,
    Uid,
}

impl IdKind {
    /// The entry point that looks up this kind of range
    #[inline]
    pub const fn symbol(self) -> Symbol {
        match self {
            Self::Gid => Symbol::GetGidRanges,
            Self::Uid => Symbol::GetUidRanges,
        }
    }
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Gid => "subgid",
            Self::Uid => "subuid",
        })
    }
}

/// The filename and symbol names for an arbitrary libsubid ABI version.
///
/// The crate level constants are the [`Descriptor`] of [`ABI_VERSION`], this
/// exists to reason about other versions, eg. in tooling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Descriptor<'v> {
    version: &'v str,
    major: u32,
}

impl Descriptor<'static> {
    /// The descriptor this crate was built with
    pub const CONFIGURED: Self = Self::for_version(ABI_VERSION);
}

impl<'v> Descriptor<'v> {
    #[inline]
    pub const fn for_version(version: &'v str) -> Self {
        Self {
            version,
            major: abi_major(version),
        }
    }

    #[inline]
    pub fn version(&self) -> &'v str {
        self.version
    }

    #[inline]
    pub fn major(&self) -> u32 {
        self.major
    }

    /// The shared object filename, eg. `libsubid.so.4.1.0`
    pub fn filename(&self) -> String {
        format!("libsubid.so.{}", self.version)
    }

    #[inline]
    pub fn symbol(&self, symbol: Symbol) -> &'static str {
        symbol.name(self.major)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_major() {
        assert_eq!(abi_major("3.0.0"), 3);
        assert_eq!(abi_major("4.1.0"), 4);
        assert_eq!(abi_major("12"), 12);
        assert_eq!(abi_major(""), 0);
        assert_eq!(abi_major("4294967295.0"), u32::MAX);
        assert_eq!(abi_major("4294967296.0"), u32::MAX);
    }

    #[test]
    fn c_names_match() {
        for major in [3, 4] {
            for symbol in [Symbol::Init, Symbol::GetGidRanges, Symbol::GetUidRanges] {
                assert_eq!(symbol.c_name(major).to_str().unwrap(), symbol.name(major));
            }
        }
    }

    #[test]
    fn defaults_to_3_0_0() {
        if env!("SUBID_ABI_VERSION_SOURCE") != "default" {
            return;
        }

        assert_eq!(ABI_VERSION, "3.0.0");
        assert_eq!(ABI_MAJOR, 3);
        assert_eq!(LIBSUBID, "libsubid.so.3.0.0");
        assert_eq!(SUBID_INIT, "libsubid_init");
        assert_eq!(SUBID_GET_GID_RANGES_SYMBOL, "get_subgid_ranges");
        assert_eq!(SUBID_GET_UID_RANGES_SYMBOL, "get_subuid_ranges");
    }

    #[test]
    fn constants_follow_configuration() {
        let configured = Descriptor::CONFIGURED;

        assert_eq!(LIBSUBID, configured.filename());
        assert_eq!(LIBSUBID_C.to_str().unwrap(), LIBSUBID);
        assert_eq!(SUBID_INIT, configured.symbol(Symbol::Init));
        assert_eq!(LIBSUBID_INIT, SUBID_INIT);
        assert_eq!(
            SUBID_GET_GID_RANGES_SYMBOL,
            configured.symbol(Symbol::GetGidRanges)
        );
        assert_eq!(
            SUBID_GET_UID_RANGES_SYMBOL,
            configured.symbol(Symbol::GetUidRanges)
        );
    }
}
