// gldispatch/src/platform/unix.rs
//
//! Symbol resolution on POSIX: `dlopen`/`dlsym`, plus the
//! context-independent `GetProcAddress` resolvers exported by the EGL
//! and GLX libraries.
//!
//! Per the Linux OpenGL ABI, `libGL.so.1` must export all core entry
//! points up to GL 1.2 statically and everything else is reached
//! through `glXGetProcAddressARB`; EGL makes the analogous promise for
//! `eglGetProcAddress`, minus core functions. The resolver therefore
//! prefers the window system's resolver and falls back to a direct
//! library lookup.

use crate::context;
use crate::error::Error;
use crate::library::{self, PlatformLibrary};
use crate::provider::{Api, Provider};

use libc::{dlerror, dlopen, dlsym, RTLD_DEFAULT, RTLD_LAZY, RTLD_LOCAL};
use std::ffi::{CStr, CString};
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::LazyLock;

pub(crate) fn open_library(filename: &CStr) -> *mut c_void {
    unsafe { dlopen(filename.as_ptr(), RTLD_LAZY | RTLD_LOCAL) }
}

pub(crate) fn load_failure_reason() -> String {
    unsafe {
        let message = dlerror();
        if message.is_null() {
            "unknown error".to_owned()
        } else {
            CStr::from_ptr(message).to_string_lossy().into_owned()
        }
    }
}

pub(crate) fn find_symbol(handle: *mut c_void, symbol: &str) -> *mut c_void {
    let symbol = CString::new(symbol).unwrap();
    unsafe { dlsym(handle, symbol.as_ptr()) }
}

type GetProcAddressFn = unsafe extern "C" fn(*const c_char) -> *mut c_void;

/// `eglGetProcAddress`, located in whatever is already linked into the
/// process first and by loading libEGL second.
static EGL_GET_PROC_ADDRESS: LazyLock<Option<GetProcAddressFn>> =
    LazyLock::new(|| locate_resolver(c"eglGetProcAddress", PlatformLibrary::Egl));

/// `glXGetProcAddressARB`, which the Linux GL ABI requires libGL to
/// export.
static GLX_GET_PROC_ADDRESS: LazyLock<Option<GetProcAddressFn>> =
    LazyLock::new(|| locate_resolver(c"glXGetProcAddressARB", PlatformLibrary::Gl));

fn locate_resolver(symbol: &CStr, home: PlatformLibrary) -> Option<GetProcAddressFn> {
    let mut ptr = unsafe { dlsym(RTLD_DEFAULT, symbol.as_ptr()) };
    if ptr.is_null() {
        ptr = library::lookup(home, &symbol.to_string_lossy(), false);
    }
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { mem::transmute::<*mut c_void, GetProcAddressFn>(ptr) })
    }
}

/// Resolve a GL symbol through the context-independent resolver of the
/// window system the current context belongs to.
pub(crate) fn get_proc_address(symbol: &str) -> *mut c_void {
    let name = CString::new(symbol).unwrap();
    let resolvers = if context::current_context_is_egl() {
        [&EGL_GET_PROC_ADDRESS, &GLX_GET_PROC_ADDRESS]
    } else {
        [&GLX_GET_PROC_ADDRESS, &EGL_GET_PROC_ADDRESS]
    };
    for resolver in resolvers {
        if let Some(get_proc_address) = **resolver {
            return unsafe { get_proc_address(name.as_ptr()) };
        }
    }
    Error::NoProcAddressResolver.die()
}

fn egl_proc_address_fallback(symbol: &str) -> *mut c_void {
    match *EGL_GET_PROC_ADDRESS {
        Some(get_proc_address) => {
            let name = CString::new(symbol).unwrap();
            unsafe { get_proc_address(name.as_ptr()) }
        }
        None => ptr::null_mut(),
    }
}

/// Look up `symbol` for an active provider. Null means "not found
/// here"; the resolver then moves on to the provider list's next
/// entry.
pub(crate) fn lookup(provider: &Provider, symbol: &str) -> *mut c_void {
    match provider.api {
        Api::Gl => {
            let ptr = get_proc_address(symbol);
            if !ptr.is_null() {
                ptr
            } else {
                // Core entry points up to GL 1.2 are exported
                // statically, and some resolvers decline to return
                // them.
                library::lookup(PlatformLibrary::Gl, symbol, false)
            }
        }
        Api::Gles1 => {
            let ptr = library::lookup(PlatformLibrary::GlesV1, symbol, false);
            if !ptr.is_null() {
                ptr
            } else {
                egl_proc_address_fallback(symbol)
            }
        }
        Api::Gles2 => {
            let ptr = library::lookup(PlatformLibrary::GlesV2, symbol, false);
            if !ptr.is_null() {
                ptr
            } else {
                egl_proc_address_fallback(symbol)
            }
        }
        Api::Glx => {
            if provider.extension.is_some() {
                match *GLX_GET_PROC_ADDRESS {
                    Some(get_proc_address) => {
                        let name = CString::new(symbol).unwrap();
                        unsafe { get_proc_address(name.as_ptr()) }
                    }
                    None => ptr::null_mut(),
                }
            } else {
                library::lookup(PlatformLibrary::Gl, symbol, false)
            }
        }
        Api::Egl => {
            if provider.extension.is_some() {
                egl_proc_address_fallback(symbol)
            } else {
                library::lookup(PlatformLibrary::Egl, symbol, false)
            }
        }
        // WGL providers never appear in POSIX tables.
        Api::Wgl => ptr::null_mut(),
    }
}

/// Resolve the probe's own dependencies without consulting the
/// context: whichever GL flavor library is already in play wins, and a
/// current ES context steers the lookup to the GLES libraries.
pub(crate) fn bootstrap_dlsym(symbol: &str) -> *mut c_void {
    if !library::peek(PlatformLibrary::Gl).is_null() {
        let ptr = library::lookup(PlatformLibrary::Gl, symbol, false);
        if !ptr.is_null() {
            return ptr;
        }
    }
    if context::egl_current_context_api() == Some(crate::ffi::egl::EGL_OPENGL_ES_API) {
        let ptr = library::lookup(PlatformLibrary::GlesV2, symbol, false);
        if !ptr.is_null() {
            return ptr;
        }
        let ptr = library::lookup(PlatformLibrary::GlesV1, symbol, false);
        if !ptr.is_null() {
            return ptr;
        }
    }
    library::lookup(PlatformLibrary::Gl, symbol, true)
}
