// gldispatch/src/ffi/wgl.rs
//
//! WGL handle types, re-exported from `winapi`.

pub use winapi::shared::minwindef::BOOL;
pub use winapi::shared::windef::{HDC, HGLRC};
