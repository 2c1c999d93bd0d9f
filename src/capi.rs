// gldispatch/src/capi.rs
//
//! C-ABI exports of the query surface, for callers linking the cdylib
//! directly.

use crate::context;

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

#[cfg(unix)]
use crate::ffi::egl::EGLDisplay;
#[cfg(unix)]
use crate::ffi::glx::Display;
#[cfg(windows_platform)]
use crate::ffi::wgl::HDC;

#[no_mangle]
pub extern "C" fn gld_gl_version() -> c_int {
    context::gl_version()
}

#[no_mangle]
pub extern "C" fn gld_is_desktop_gl() -> bool {
    context::is_desktop_gl()
}

#[no_mangle]
pub unsafe extern "C" fn gld_has_gl_extension(ext: *const c_char) -> bool {
    context::has_gl_extension(&CStr::from_ptr(ext).to_string_lossy())
}

#[no_mangle]
pub extern "C" fn gld_current_context_is_egl() -> bool {
    context::current_context_is_egl()
}

#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn gld_glx_version(dpy: *mut Display, screen: c_int) -> c_int {
    context::glx_version(dpy, screen)
}

#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn gld_has_glx_extension(
    dpy: *mut Display,
    screen: c_int,
    ext: *const c_char,
) -> bool {
    context::has_glx_extension(dpy, screen, &CStr::from_ptr(ext).to_string_lossy())
}

#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn gld_egl_version(dpy: EGLDisplay) -> c_int {
    context::egl_version(dpy)
}

#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn gld_has_egl_extension(dpy: EGLDisplay, ext: *const c_char) -> bool {
    context::has_egl_extension(dpy, &CStr::from_ptr(ext).to_string_lossy())
}

#[cfg(windows_platform)]
#[no_mangle]
pub unsafe extern "C" fn gld_has_wgl_extension(hdc: HDC, ext: *const c_char) -> bool {
    context::has_wgl_extension(hdc, &CStr::from_ptr(ext).to_string_lossy())
}
