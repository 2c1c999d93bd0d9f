// gldispatch/src/lib.rs
//
//! A lazy runtime dispatch layer for OpenGL, OpenGL ES, EGL, GLX, and
//! WGL.
//!
//! Applications call any exported entry point directly. The first call
//! resolves the implementation appropriate for the context bound at
//! that moment — walking the entry point's providers (core versions
//! and extensions, in registry order) against the live context — and
//! rebinds the dispatch slot, so every later call costs one pointer
//! load. A function no active provider supplies fails fast at resolve
//! time with a diagnostic naming each requirement.
//!
//! [`gl_version`], [`has_gl_extension`], and their window-system
//! counterparts answer capability questions about the current context;
//! the same surface is exported with C linkage under the `gld_`
//! prefix.
//!
//! Enable the `thread-dispatch` feature when one process binds
//! contexts from different drivers on different threads; Windows
//! builds always dispatch per thread.

pub mod ffi;

mod capi;
mod context;
mod dispatch;
mod error;
mod library;
mod platform;
mod provider;

pub use context::{current_context_is_egl, gl_version, has_gl_extension, is_desktop_gl};

#[cfg(unix)]
pub use context::{egl_version, glx_version, has_egl_extension, has_glx_extension};

#[cfg(windows_platform)]
pub use context::has_wgl_extension;

pub use dispatch::gl::*;

#[cfg(unix)]
pub use dispatch::egl::*;
#[cfg(unix)]
pub use dispatch::glx::*;

#[cfg(windows_platform)]
pub use dispatch::wgl::*;
