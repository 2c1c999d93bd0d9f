// gldispatch/src/dispatch/egl.rs
//
//! The dispatched EGL entry points, all resolved from libEGL.

use super::macros::entry_points;
use crate::ffi::egl::*;
use crate::provider::Provider;

use std::os::raw::{c_char, c_void};

entry_points! {
    fn eglGetError() -> EGLint
        => [Provider::egl(10)];
    fn eglGetDisplay(display_id: EGLNativeDisplayType) -> EGLDisplay
        => [Provider::egl(10)];
    fn eglInitialize(dpy: EGLDisplay, major: *mut EGLint, minor: *mut EGLint) -> EGLBoolean
        => [Provider::egl(10)];
    fn eglTerminate(dpy: EGLDisplay) -> EGLBoolean
        => [Provider::egl(10)];
    fn eglQueryString(dpy: EGLDisplay, name: EGLint) -> *const c_char
        => [Provider::egl(10)];
    fn eglChooseConfig(
        dpy: EGLDisplay,
        attrib_list: *const EGLint,
        configs: *mut EGLConfig,
        config_size: EGLint,
        num_config: *mut EGLint,
    ) -> EGLBoolean
        => [Provider::egl(10)];
    fn eglCreateContext(
        dpy: EGLDisplay,
        config: EGLConfig,
        share_context: EGLContext,
        attrib_list: *const EGLint,
    ) -> EGLContext
        => [Provider::egl(10)];
    fn eglDestroyContext(dpy: EGLDisplay, ctx: EGLContext) -> EGLBoolean
        => [Provider::egl(10)];
    fn eglGetCurrentDisplay() -> EGLDisplay
        => [Provider::egl(10)];
    fn eglGetCurrentSurface(readdraw: EGLint) -> EGLSurface
        => [Provider::egl(10)];
    fn eglGetCurrentContext() -> EGLContext
        => [Provider::egl(14)];
    fn eglQueryContext(
        dpy: EGLDisplay,
        ctx: EGLContext,
        attribute: EGLint,
        value: *mut EGLint,
    ) -> EGLBoolean
        => [Provider::egl(10)];
    fn eglSwapBuffers(dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean
        => [Provider::egl(10)];
    fn eglBindAPI(api: EGLenum) -> EGLBoolean
        => [Provider::egl(12)];
    fn eglQueryAPI() -> EGLenum
        => [Provider::egl(12)];
    fn eglGetProcAddress(procname: *const c_char) -> *mut c_void
        => [Provider::egl(10)];
    fn eglMakeCurrent_unwrapped(
        dpy: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        ctx: EGLContext,
    ) -> EGLBoolean as "eglMakeCurrent"
        => [Provider::egl(10)];
}

/// `eglMakeCurrent` may rebind this thread to a different driver, so
/// per-thread dispatch state is discarded after the driver call.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn eglMakeCurrent(
    dpy: EGLDisplay,
    draw: EGLSurface,
    read: EGLSurface,
    ctx: EGLContext,
) -> EGLBoolean {
    let ret = eglMakeCurrent_unwrapped(dpy, draw, read, ctx);
    crate::dispatch::handle_context_switch();
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_address_their_own_metadata() {
        assert_eq!(
            ENTRIES[EntryIndex::eglQueryString as usize].name,
            "eglQueryString"
        );
        assert_eq!(
            ENTRIES[EntryIndex::eglMakeCurrent_unwrapped as usize].name,
            "eglMakeCurrent"
        );
    }
}
