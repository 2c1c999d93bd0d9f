// gldispatch/src/platform/windows.rs
//
//! Symbol resolution on Windows: `LoadLibrary`/`GetProcAddress` on
//! opengl32.dll, plus the context-dependent `wglGetProcAddress`.

use crate::library::{self, PlatformLibrary};
use crate::provider::{Api, Provider};

use std::ffi::{CStr, CString};
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::LazyLock;
use winapi::shared::minwindef::HMODULE;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi::{GetProcAddress, LoadLibraryA};

pub(crate) fn open_library(filename: &CStr) -> *mut c_void {
    unsafe { LoadLibraryA(filename.as_ptr()).cast() }
}

pub(crate) fn load_failure_reason() -> String {
    format!("error {:#010x}", unsafe { GetLastError() })
}

pub(crate) fn find_symbol(handle: *mut c_void, symbol: &str) -> *mut c_void {
    let symbol = CString::new(symbol).unwrap();
    unsafe { GetProcAddress(handle as HMODULE, symbol.as_ptr()).cast() }
}

type WglGetProcAddressFn = unsafe extern "system" fn(*const c_char) -> *mut c_void;

/// `wglGetProcAddress`, which every opengl32.dll exports.
static WGL_GET_PROC_ADDRESS: LazyLock<WglGetProcAddressFn> = LazyLock::new(|| {
    let ptr = library::lookup(PlatformLibrary::Gl, "wglGetProcAddress", true);
    unsafe { mem::transmute::<*mut c_void, WglGetProcAddressFn>(ptr) }
});

/// Resolve a GL or WGL symbol for the context current on this thread.
pub(crate) fn get_proc_address(symbol: &str) -> *mut c_void {
    let name = CString::new(symbol).unwrap();
    let ptr = unsafe { (*WGL_GET_PROC_ADDRESS)(name.as_ptr()) };
    if !ptr.is_null() {
        return ptr;
    }
    // Core GL 1.1 and WGL entry points are only exported statically;
    // wglGetProcAddress returns null for them.
    library::lookup(PlatformLibrary::Gl, symbol, false)
}

/// Look up `symbol` for an active provider. Null means "not found
/// here"; the resolver then moves on to the provider list's next
/// entry.
pub(crate) fn lookup(provider: &Provider, symbol: &str) -> *mut c_void {
    match provider.api {
        Api::Gl | Api::Wgl => get_proc_address(symbol),
        // The GLES and window-system libraries of other platforms are
        // not dispatched on Windows.
        _ => ptr::null_mut(),
    }
}

/// Resolve the probe's own dependencies without consulting the
/// context.
pub(crate) fn bootstrap_dlsym(symbol: &str) -> *mut c_void {
    let ptr = get_proc_address(symbol);
    if !ptr.is_null() {
        return ptr;
    }
    library::lookup(PlatformLibrary::Gl, symbol, true)
}
