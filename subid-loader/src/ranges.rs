use crate::{
    Error, IdKind,
    ffi::{SubidGetRangesFn, SubidInitFn, SubidRange},
    forward,
};
use std::{ffi::CString, fmt, ptr::NonNull};

/// Supplies already resolved libsubid entry points.
///
/// [`crate::Library`] implements this via `dlopen`, but the pointers can come
/// from anywhere, as long as they uphold libsubid's contracts.
///
/// # Safety
///
/// The returned function pointers are called with libsubid's arguments and
/// their results are trusted, eg. ranges returned from a lookup must point to
/// that many [`SubidRange`]s allocated with `malloc`.
pub unsafe trait Resolver {
    /// The initializer, `subid_init` or `libsubid_init`
    fn init_fn(&self) -> Result<SubidInitFn, Error>;
    /// The range lookup for the specified kind of id
    fn get_id_ranges_fn(&self, kind: IdKind) -> Result<SubidGetRangesFn, Error>;
}

/// The subordinate id ranges of an owner, freed on drop
pub struct IdRanges {
    ranges: NonNull<SubidRange>,
    len: usize,
}

impl IdRanges {
    /// Takes ownership of an array returned by a libsubid lookup
    ///
    /// # Safety
    ///
    /// `ranges` must point to at least `len` initialized [`SubidRange`]s
    /// allocated with `malloc`, and must not be freed by anything else.
    pub unsafe fn from_raw(ranges: *mut SubidRange, len: usize) -> Option<Self> {
        NonNull::new(ranges).map(|ranges| Self { ranges, len })
    }
}

impl std::ops::Deref for IdRanges {
    type Target = [SubidRange];

    fn deref(&self) -> &Self::Target {
        unsafe { std::slice::from_raw_parts(self.ranges.as_ptr(), self.len) }
    }
}

impl fmt::Debug for IdRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Drop for IdRanges {
    fn drop(&mut self) {
        unsafe { libc::free(self.ranges.as_ptr().cast()) };
    }
}

/// Initializes libsubid through the resolved initializer
pub fn init<R: Resolver + ?Sized>(resolver: &R) -> Result<(), Error> {
    let func = resolver.init_fn()?;
    unsafe { forward::init(func) };
    Ok(())
}

/// Looks up the subordinate id ranges delegated to `owner`, which is either a
/// username or a decimal uid
pub fn id_ranges<R: Resolver + ?Sized>(
    resolver: &R,
    kind: IdKind,
    owner: &str,
) -> Result<IdRanges, Error> {
    let func = resolver.get_id_ranges_fn(kind)?;
    let c_owner = CString::new(owner).map_err(|_e| Error::InvalidOwner(owner.to_owned()))?;

    let mut raw = std::ptr::null_mut();
    let count = unsafe { forward::get_id_ranges(func, c_owner.as_ptr(), &mut raw) };

    let ranges = if count > 0 {
        unsafe { IdRanges::from_raw(raw, count as usize) }
    } else {
        // Nothing is supposed to be allocated on failure, but we own it either way
        if !raw.is_null() {
            unsafe { libc::free(raw.cast()) };
        }
        None
    };

    let ranges = ranges.ok_or_else(|| Error::NoRanges {
        kind,
        owner: owner.to_owned(),
    })?;

    for (i, range) in ranges.iter().enumerate() {
        log::debug!(
            "Found {kind} range {i} for {owner}: start [{}] length [{}]",
            range.start,
            range.count
        );
    }

    Ok(ranges)
}

/// libsubid treats `ALL` as a wildcard owner rather than an account
pub(crate) fn check_username(username: &str) -> Result<(), Error> {
    if username == "ALL" {
        Err(Error::UnsupportedOwner(username.to_owned()))
    } else {
        Ok(())
    }
}

/// Checks that `username` has both subordinate gid and uid ranges.
///
/// Each kind is looked up by username first, then by `uid`, since the files
/// backing libsubid allow either as the owner.
pub fn validate_with<R: Resolver + ?Sized>(
    resolver: &R,
    username: &str,
    uid: libc::uid_t,
) -> Result<(), Error> {
    check_username(username)?;
    init(resolver)?;

    for kind in [IdKind::Gid, IdKind::Uid] {
        match id_ranges(resolver, kind, username) {
            Ok(_) => {}
            Err(Error::NoRanges { .. }) => {
                log::debug!("no {kind} ranges for {username}, trying uid {uid}");
                id_ranges(resolver, kind, &uid.to_string())?;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
