// gldispatch/src/ffi/glx.rs
//
//! GLX types and enum values. The Xlib display is opaque to the
//! dispatch layer; only the driver dereferences it.

use std::os::raw::{c_int, c_ulong};

pub enum Display {}

pub enum GLXContextOpaque {}
pub type GLXContext = *mut GLXContextOpaque;

pub enum GLXFBConfigOpaque {}
pub type GLXFBConfig = *mut GLXFBConfigOpaque;

pub type XID = c_ulong;
pub type GLXDrawable = XID;
pub type GLXPixmap = XID;
pub type Bool = c_int;

pub const GLX_VENDOR: c_int = 1;
pub const GLX_VERSION: c_int = 2;
pub const GLX_EXTENSIONS: c_int = 3;
pub const GLX_SCREEN: c_int = 0x800C;
