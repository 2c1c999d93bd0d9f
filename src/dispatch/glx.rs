// gldispatch/src/dispatch/glx.rs
//
//! The dispatched GLX entry points. All of these live in libGL, so
//! core functions resolve by direct library lookup and extension
//! functions through `glXGetProcAddressARB`.

use super::macros::entry_points;
use crate::ffi::gl::GLubyte;
use crate::ffi::glx::*;
use crate::provider::Provider;

use std::os::raw::{c_char, c_int, c_void};

entry_points! {
    fn glXGetCurrentContext() -> GLXContext
        => [Provider::glx(10)];
    fn glXGetCurrentDrawable() -> GLXDrawable
        => [Provider::glx(10)];
    fn glXGetCurrentDisplay() -> *mut Display
        => [Provider::glx(12)];
    fn glXQueryVersion(dpy: *mut Display, major: *mut c_int, minor: *mut c_int) -> Bool
        => [Provider::glx(10)];
    fn glXQueryExtensionsString(dpy: *mut Display, screen: c_int) -> *const c_char
        => [Provider::glx(11)];
    fn glXQueryServerString(dpy: *mut Display, screen: c_int, name: c_int) -> *const c_char
        => [Provider::glx(11)];
    fn glXGetClientString(dpy: *mut Display, name: c_int) -> *const c_char
        => [Provider::glx(11)];
    fn glXQueryContext(
        dpy: *mut Display,
        ctx: GLXContext,
        attribute: c_int,
        value: *mut c_int,
    ) -> c_int
        => [Provider::glx(13)];
    fn glXChooseFBConfig(
        dpy: *mut Display,
        screen: c_int,
        attrib_list: *const c_int,
        nelements: *mut c_int,
    ) -> *mut GLXFBConfig
        => [Provider::glx(13)];
    fn glXCreateNewContext(
        dpy: *mut Display,
        config: GLXFBConfig,
        render_type: c_int,
        share_list: GLXContext,
        direct: Bool,
    ) -> GLXContext
        => [Provider::glx(13)];
    fn glXCreatePixmap(
        dpy: *mut Display,
        config: GLXFBConfig,
        pixmap: GLXPixmap,
        attrib_list: *const c_int,
    ) -> GLXPixmap
        => [Provider::glx(13)];
    fn glXDestroyContext(dpy: *mut Display, ctx: GLXContext)
        => [Provider::glx(10)];
    fn glXSwapBuffers(dpy: *mut Display, drawable: GLXDrawable)
        => [Provider::glx(10)];
    fn glXGetProcAddress(name: *const GLubyte) -> *mut c_void
        => [Provider::glx(14)];
    fn glXGetProcAddressARB(name: *const GLubyte) -> *mut c_void
        => [Provider::glx_extension("GLX_ARB_get_proc_address")
                .with_symbol("glXGetProcAddressARB")];
    fn glXMakeCurrent_unwrapped(
        dpy: *mut Display,
        drawable: GLXDrawable,
        ctx: GLXContext,
    ) -> Bool as "glXMakeCurrent"
        => [Provider::glx(10)];
    fn glXMakeContextCurrent_unwrapped(
        dpy: *mut Display,
        draw: GLXDrawable,
        read: GLXDrawable,
        ctx: GLXContext,
    ) -> Bool as "glXMakeContextCurrent"
        => [Provider::glx(13)];
}

/// The MakeCurrent family may rebind this thread to a different
/// driver, so per-thread dispatch state is discarded after the driver
/// call.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn glXMakeCurrent(
    dpy: *mut Display,
    drawable: GLXDrawable,
    ctx: GLXContext,
) -> Bool {
    let ret = glXMakeCurrent_unwrapped(dpy, drawable, ctx);
    crate::dispatch::handle_context_switch();
    ret
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn glXMakeContextCurrent(
    dpy: *mut Display,
    draw: GLXDrawable,
    read: GLXDrawable,
    ctx: GLXContext,
) -> Bool {
    let ret = glXMakeContextCurrent_unwrapped(dpy, draw, read, ctx);
    crate::dispatch::handle_context_switch();
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Api;

    #[test]
    fn indices_address_their_own_metadata() {
        assert_eq!(
            ENTRIES[EntryIndex::glXGetCurrentContext as usize].name,
            "glXGetCurrentContext"
        );
        assert_eq!(
            ENTRIES[EntryIndex::glXMakeCurrent_unwrapped as usize].name,
            "glXMakeCurrent"
        );
    }

    #[test]
    fn every_provider_is_glx() {
        for entry in &ENTRIES {
            for provider in entry.providers {
                assert_eq!(provider.api, Api::Glx, "{}", entry.name);
            }
        }
    }
}
