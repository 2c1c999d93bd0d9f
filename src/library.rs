// gldispatch/src/library.rs
//
//! Process-wide loading of the platform GL libraries.
//!
//! Each of the four libraries is opened at most once per process, the
//! first time something needs a symbol from it. Population happens
//! under a single mutex; after that a lookup costs one acquire load of
//! the cached handle. Handles are never closed: they are
//! process-lifetime resources.

use crate::error::Error;
use crate::platform;

use log::debug;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Mutex;

/// The libraries the dispatch layer may pull symbols from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlatformLibrary {
    Gl,
    Egl,
    GlesV1,
    GlesV2,
}

const LIBRARY_COUNT: usize = 4;

impl PlatformLibrary {
    #[cfg(unix)]
    pub(crate) fn filename(self) -> &'static CStr {
        match self {
            PlatformLibrary::Gl => c"libGL.so.1",
            PlatformLibrary::Egl => c"libEGL.so.1",
            PlatformLibrary::GlesV1 => c"libGLESv1_CM.so.1",
            PlatformLibrary::GlesV2 => c"libGLESv2.so.2",
        }
    }

    #[cfg(windows)]
    pub(crate) fn filename(self) -> &'static CStr {
        match self {
            PlatformLibrary::Gl => c"opengl32.dll",
            PlatformLibrary::Egl => c"libEGL.dll",
            PlatformLibrary::GlesV1 => c"libGLESv1_CM.dll",
            PlatformLibrary::GlesV2 => c"libGLESv2.dll",
        }
    }
}

static HANDLES: [AtomicPtr<c_void>; LIBRARY_COUNT] =
    [const { AtomicPtr::new(ptr::null_mut()) }; LIBRARY_COUNT];

/// The loader mutex. The integer inside is the `glBegin`/`glEnd`
/// nesting depth, which shares the lock because both are touched on
/// the same resolution paths.
static LOADER: Mutex<u32> = Mutex::new(0);

/// The handle for `library`, opening it on first use.
///
/// With `must_succeed`, a library that cannot be opened is a fatal
/// error; otherwise null is returned and the next caller will try
/// again.
pub(crate) fn load(library: PlatformLibrary, must_succeed: bool) -> *mut c_void {
    let slot = &HANDLES[library as usize];
    let handle = slot.load(Ordering::Acquire);
    if !handle.is_null() {
        return handle;
    }

    let _guard = LOADER.lock().unwrap();
    // Another thread may have populated the slot while we waited on the
    // lock.
    let handle = slot.load(Ordering::Acquire);
    if !handle.is_null() {
        return handle;
    }

    let handle = platform::open_library(library.filename());
    if handle.is_null() {
        if must_succeed {
            Error::LibraryNotFound {
                library,
                reason: platform::load_failure_reason(),
            }
            .die();
        }
        return ptr::null_mut();
    }
    debug!("loaded {}", library.filename().to_string_lossy());
    slot.store(handle, Ordering::Release);
    handle
}

/// The handle for `library` if it is already loaded; never loads.
#[cfg(unix)]
pub(crate) fn peek(library: PlatformLibrary) -> *mut c_void {
    HANDLES[library as usize].load(Ordering::Acquire)
}

/// `symbol` from `library`, loading the library first if needed.
pub(crate) fn lookup(library: PlatformLibrary, symbol: &str, must_succeed: bool) -> *mut c_void {
    let handle = load(library, must_succeed);
    if handle.is_null() {
        return ptr::null_mut();
    }
    let ptr = platform::find_symbol(handle, symbol);
    if ptr.is_null() && must_succeed {
        Error::SymbolNotFound {
            symbol: symbol.to_owned(),
            library,
        }
        .die();
    }
    ptr
}

/// Enter a `glBegin` region. While the depth is non-zero the GL spec
/// forbids most queries, so the capability probe degrades to its
/// conservative answers.
pub(crate) fn begin_region() {
    *LOADER.lock().unwrap() += 1;
}

pub(crate) fn end_region() {
    let mut depth = LOADER.lock().unwrap();
    // Tolerate an unbalanced glEnd rather than wrapping the counter.
    *depth = depth.saturating_sub(1);
}

pub(crate) fn in_begin_region() -> bool {
    *LOADER.lock().unwrap() > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn begin_regions_nest() {
        assert!(!in_begin_region());
        begin_region();
        assert!(in_begin_region());
        begin_region();
        end_region();
        assert!(in_begin_region());
        end_region();
        assert!(!in_begin_region());
    }

    #[test]
    #[serial]
    fn unbalanced_end_is_ignored() {
        assert!(!in_begin_region());
        end_region();
        assert!(!in_begin_region());
        begin_region();
        assert!(in_begin_region());
        end_region();
        assert!(!in_begin_region());
    }
}
