// gldispatch/src/dispatch/wgl.rs
//
//! The dispatched WGL entry points. Core functions are exported
//! statically from opengl32.dll; everything else comes from
//! `wglGetProcAddress` and is only valid for the pixel format of the
//! context current when it was resolved, which is why Windows always
//! dispatches per thread.

use super::macros::entry_points;
use crate::ffi::wgl::*;
use crate::provider::Provider;

use std::os::raw::{c_char, c_void};

entry_points! {
    fn wglGetCurrentContext() -> HGLRC
        => [Provider::wgl(10)];
    fn wglGetCurrentDC() -> HDC
        => [Provider::wgl(10)];
    fn wglCreateContext(hdc: HDC) -> HGLRC
        => [Provider::wgl(10)];
    fn wglDeleteContext(hglrc: HGLRC) -> BOOL
        => [Provider::wgl(10)];
    fn wglShareLists(hglrc1: HGLRC, hglrc2: HGLRC) -> BOOL
        => [Provider::wgl(10)];
    fn wglGetProcAddress(name: *const c_char) -> *mut c_void
        => [Provider::wgl(10)];
    fn wglGetExtensionsStringARB(hdc: HDC) -> *const c_char
        => [Provider::wgl_extension("WGL_ARB_extensions_string")];
    // The buffer swap is exported from GDI under the unprefixed name;
    // opengl32 reaches the ICD through wglSwapBuffers.
    fn SwapBuffers(hdc: HDC) -> BOOL
        => [Provider::wgl(10).with_symbol("wglSwapBuffers")];
    fn wglMakeCurrent_unwrapped(hdc: HDC, hglrc: HGLRC) -> BOOL as "wglMakeCurrent"
        => [Provider::wgl(10)];
}

/// `wglMakeCurrent` may rebind this thread to a different pixel format
/// or driver, so the thread's dispatch state is discarded after the
/// driver call.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn wglMakeCurrent(hdc: HDC, hglrc: HGLRC) -> BOOL {
    let ret = wglMakeCurrent_unwrapped(hdc, hglrc);
    crate::dispatch::handle_context_switch();
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_address_their_own_metadata() {
        assert_eq!(
            ENTRIES[EntryIndex::wglGetProcAddress as usize].name,
            "wglGetProcAddress"
        );
        assert_eq!(
            ENTRIES[EntryIndex::wglMakeCurrent_unwrapped as usize].name,
            "wglMakeCurrent"
        );
    }

    #[test]
    fn extension_string_query_is_gated_on_its_extension() {
        let providers = ENTRIES[EntryIndex::wglGetExtensionsStringARB as usize].providers;
        assert_eq!(providers[0].extension, Some("WGL_ARB_extensions_string"));
    }

    #[test]
    fn the_swap_entry_resolves_through_the_icd_symbol() {
        let providers = ENTRIES[EntryIndex::SwapBuffers as usize].providers;
        assert_eq!(providers[0].symbol, Some("wglSwapBuffers"));
    }
}
