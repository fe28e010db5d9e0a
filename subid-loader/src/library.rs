use crate::{
    Error, IdKind, Resolver,
    abi::{self, Symbol},
    ffi::{SubidGetRangesFn, SubidInitFn},
    ranges,
};
use libc::c_void;
use std::{ffi::CStr, ptr::NonNull};

/// A `dlopen`ed libsubid, closed on drop
pub struct Library {
    handle: NonNull<c_void>,
    filename: String,
}

fn last_dl_error() -> String {
    let err = unsafe { libc::dlerror() };

    if err.is_null() {
        "unknown error".to_owned()
    } else {
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}

impl Library {
    /// Opens [`abi::LIBSUBID`] from the default library search path
    pub fn open() -> Result<Self, Error> {
        Self::open_path(abi::LIBSUBID_C)
    }

    /// Opens the shared object at the specified path, which must export the
    /// symbols for the configured [`abi::ABI_MAJOR`]
    pub fn open_path(path: &CStr) -> Result<Self, Error> {
        let filename = path.to_string_lossy().into_owned();
        let handle = unsafe { libc::dlopen(path.as_ptr(), libc::RTLD_LAZY) };

        let Some(handle) = NonNull::new(handle) else {
            return Err(Error::LibraryNotFound {
                filename,
                reason: last_dl_error(),
            });
        };

        log::debug!("opened {filename}");
        Ok(Self { handle, filename })
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Retrieves the address of the specified symbol
    pub fn symbol(&self, name: &CStr) -> Result<NonNull<c_void>, Error> {
        let ptr = unsafe { libc::dlsym(self.handle.as_ptr(), name.as_ptr()) };

        match NonNull::new(ptr) {
            Some(ptr) => {
                log::debug!("resolved {} in {}", name.to_string_lossy(), self.filename);
                Ok(ptr)
            }
            None => Err(Error::SymbolNotFound(name.to_string_lossy().into_owned())),
        }
    }

    /// Initializes libsubid, logging to stderr
    pub fn init(&self) -> Result<(), Error> {
        ranges::init(self)
    }

    /// Looks up the subordinate id ranges of `owner`
    pub fn id_ranges(&self, kind: IdKind, owner: &str) -> Result<ranges::IdRanges, Error> {
        ranges::id_ranges(self, kind, owner)
    }
}

unsafe impl Resolver for Library {
    fn init_fn(&self) -> Result<SubidInitFn, Error> {
        let ptr = self.symbol(Symbol::Init.c_name(abi::ABI_MAJOR))?;
        Ok(unsafe { std::mem::transmute::<*mut c_void, SubidInitFn>(ptr.as_ptr()) })
    }

    fn get_id_ranges_fn(&self, kind: IdKind) -> Result<SubidGetRangesFn, Error> {
        let ptr = self.symbol(kind.symbol().c_name(abi::ABI_MAJOR))?;
        Ok(unsafe { std::mem::transmute::<*mut c_void, SubidGetRangesFn>(ptr.as_ptr()) })
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        unsafe {
            libc::dlclose(self.handle.as_ptr());
        }
    }
}

/// Checks that `username` has subordinate gid and uid ranges, loading
/// libsubid for the duration of the check
pub fn validate_subid_ranges(username: &str, uid: libc::uid_t) -> Result<(), Error> {
    ranges::check_username(username)?;

    let library = Library::open()?;
    ranges::validate_with(&library, username, uid)
}
