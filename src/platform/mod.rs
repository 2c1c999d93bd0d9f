// gldispatch/src/platform/mod.rs
//
//! OS-specific library loading and symbol-resolution primitives.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::*;

#[cfg(windows_platform)]
mod windows;
#[cfg(windows_platform)]
pub(crate) use windows::*;
