//! The glibc symbol version each wrapped function is pinned to, per target
//! architecture.
//!
//! These are the versions the functions had before glibc 2.34 merged
//! libpthread into libc (2.32 for `pthread_sigmask`), so a binary linked
//! against a newer glibc still loads on older ones.

/// Invokes the callback macro with the full symbol version table.
///
/// The table is only ever written here. [`Arch::symbol_version`] and the
/// `.symver` directives emitted in [`crate::pthread`] are both expanded from
/// it, so the data and the binary can't drift apart.
macro_rules! with_symbol_table {
    ($callback:ident) => {
        $callback! {
            /// 64-bit ARM
            Aarch64("aarch64") if target_arch = "aarch64" => {
                sigmask: "GLIBC_2.17",
                create: "GLIBC_2.17",
                detach: "GLIBC_2.17",
                getstacksize: "GLIBC_2.17",
            }
            /// 32-bit ARM
            Arm("arm") if target_arch = "arm" => {
                sigmask: "GLIBC_2.4",
                create: "GLIBC_2.4",
                detach: "GLIBC_2.4",
                getstacksize: "GLIBC_2.4",
            }
            /// i386 and up
            X86("x86") if target_arch = "x86" => {
                sigmask: "GLIBC_2.0",
                create: "GLIBC_2.1",
                detach: "GLIBC_2.0",
                getstacksize: "GLIBC_2.1",
            }
            /// Little endian 64-bit PowerPC, ELFv2 ABI
            Powerpc64le("powerpc64le") if all(target_arch = "powerpc64", target_endian = "little") => {
                sigmask: "GLIBC_2.17",
                create: "GLIBC_2.17",
                detach: "GLIBC_2.17",
                getstacksize: "GLIBC_2.17",
            }
            /// IBM Z
            S390x("s390x") if target_arch = "s390x" => {
                sigmask: "GLIBC_2.2",
                create: "GLIBC_2.2",
                detach: "GLIBC_2.2",
                getstacksize: "GLIBC_2.2",
            }
            /// AMD64
            X86_64("x86_64") if target_arch = "x86_64" => {
                sigmask: "GLIBC_2.2.5",
                create: "GLIBC_2.2.5",
                detach: "GLIBC_2.2.5",
                getstacksize: "GLIBC_2.2.5",
            }
        }
    };
}

pub(crate) use with_symbol_table;

macro_rules! define_arch_table {
    ($(
        $(#[$doc:meta])*
        $arch:ident($arch_name:literal) if $cfg:meta => {
            sigmask: $sigmask:literal,
            create: $create:literal,
            detach: $detach:literal,
            getstacksize: $getstacksize:literal $(,)?
        }
    )+) => {
        /// A target architecture with known symbol versions
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Arch {
            $($(#[$doc])* $arch,)+
        }

        impl Arch {
            /// Every architecture in the table
            pub const ALL: &'static [Self] = &[$(Self::$arch,)+];

            /// The architecture's conventional name, eg. `x86_64`
            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$arch => $arch_name,)+
                }
            }

            /// The historical glibc version the specified function is
            /// bound to on this architecture, eg. `GLIBC_2.2.5`
            pub const fn symbol_version(self, function: Function) -> &'static str {
                match self {
                    $(Self::$arch => match function {
                        Function::PthreadSigmask => $sigmask,
                        Function::PthreadCreate => $create,
                        Function::PthreadDetach => $detach,
                        Function::PthreadAttrGetstacksize => $getstacksize,
                    },)+
                }
            }
        }

        $(
            #[cfg(all(target_os = "linux", target_env = "gnu", $cfg))]
            impl Arch {
                /// The architecture being compiled for
                pub const TARGET: Self = Self::$arch;
            }
        )+

        #[cfg(all(target_os = "linux", target_env = "gnu", not(any($($cfg),+))))]
        compile_error!(
            "no glibc symbol versions are known for this target architecture, please add them to the symbol table"
        );
    };
}

with_symbol_table!(define_arch_table);

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the wrapped pthread entry points
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    PthreadSigmask,
    PthreadCreate,
    PthreadDetach,
    PthreadAttrGetstacksize,
}

impl Function {
    /// All of the wrapped functions
    pub const ALL: [Self; 4] = [
        Self::PthreadSigmask,
        Self::PthreadCreate,
        Self::PthreadDetach,
        Self::PthreadAttrGetstacksize,
    ];

    /// The unversioned symbol name
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PthreadSigmask => "pthread_sigmask",
            Self::PthreadCreate => "pthread_create",
            Self::PthreadDetach => "pthread_detach",
            Self::PthreadAttrGetstacksize => "pthread_attr_getstacksize",
        }
    }

    /// The symbol name with its version attached, in the form the
    /// `.symver` directive takes, eg. `pthread_create@GLIBC_2.2.5`
    pub fn versioned_name(self, arch: Arch) -> String {
        format!("{}@{}", self.name(), arch.symbol_version(self))
    }

    /// The linker driver argument that redirects references to this
    /// function to its `__wrap_` shim
    pub fn wrap_link_arg(self) -> String {
        format!("-Wl,--wrap={}", self.name())
    }
}
