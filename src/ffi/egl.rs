// gldispatch/src/ffi/egl.rs
//
//! EGL types and enum values.

use std::os::raw::{c_int, c_uint, c_void};

pub type EGLBoolean = c_uint;
pub type EGLint = c_int;
pub type EGLenum = c_uint;
pub type EGLDisplay = *mut c_void;
pub type EGLConfig = *mut c_void;
pub type EGLContext = *mut c_void;
pub type EGLSurface = *mut c_void;
pub type EGLNativeDisplayType = *mut c_void;

pub const EGL_FALSE: EGLBoolean = 0;
pub const EGL_TRUE: EGLBoolean = 1;

pub const EGL_NO_CONTEXT: EGLContext = 0 as EGLContext;
pub const EGL_NO_DISPLAY: EGLDisplay = 0 as EGLDisplay;
pub const EGL_NO_SURFACE: EGLSurface = 0 as EGLSurface;

pub const EGL_SUCCESS: EGLint = 0x3000;
pub const EGL_VENDOR: EGLint = 0x3053;
pub const EGL_VERSION: EGLint = 0x3054;
pub const EGL_EXTENSIONS: EGLint = 0x3055;
pub const EGL_CONTEXT_CLIENT_TYPE: EGLint = 0x3097;
pub const EGL_OPENGL_ES_API: EGLint = 0x30A0;
pub const EGL_OPENGL_API: EGLint = 0x30A2;
