// gldispatch/src/ffi/gl.rs
//
//! OpenGL types and enum values.
//!
//! The types follow table 2.2 of the GL specification: they have fixed
//! sizes and are deliberately not the C types of the same name.

use std::os::raw::{c_char, c_double, c_float, c_int, c_uchar, c_uint, c_void};

pub type GLboolean = c_uchar;
pub type GLbyte = i8;
pub type GLubyte = c_uchar;
pub type GLchar = c_char;
pub type GLshort = i16;
pub type GLushort = u16;
pub type GLint = c_int;
pub type GLuint = c_uint;
pub type GLint64 = i64;
pub type GLuint64 = u64;
pub type GLenum = c_uint;
pub type GLbitfield = c_uint;
pub type GLsizei = c_int;
pub type GLfloat = c_float;
pub type GLclampf = c_float;
pub type GLdouble = c_double;
pub type GLintptr = isize;
pub type GLsizeiptr = isize;
pub type GLvoid = c_void;

pub const FALSE: GLboolean = 0;
pub const TRUE: GLboolean = 1;

pub const NO_ERROR: GLenum = 0;
pub const POINTS: GLenum = 0x0000;
pub const LINES: GLenum = 0x0001;
pub const TRIANGLES: GLenum = 0x0004;
pub const DEPTH_BUFFER_BIT: GLbitfield = 0x0000_0100;
pub const STENCIL_BUFFER_BIT: GLbitfield = 0x0000_0400;
pub const COLOR_BUFFER_BIT: GLbitfield = 0x0000_4000;
pub const INVALID_ENUM: GLenum = 0x0500;
pub const INVALID_VALUE: GLenum = 0x0501;
pub const INVALID_OPERATION: GLenum = 0x0502;
pub const OUT_OF_MEMORY: GLenum = 0x0505;
pub const DEPTH_TEST: GLenum = 0x0B71;
pub const BLEND: GLenum = 0x0BE2;
pub const TEXTURE_2D: GLenum = 0x0DE1;
pub const UNSIGNED_BYTE: GLenum = 0x1401;
pub const UNSIGNED_SHORT: GLenum = 0x1403;
pub const UNSIGNED_INT: GLenum = 0x1405;
pub const FLOAT: GLenum = 0x1406;
pub const RGBA: GLenum = 0x1908;
pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const EXTENSIONS: GLenum = 0x1F03;
pub const MAJOR_VERSION: GLenum = 0x821B;
pub const MINOR_VERSION: GLenum = 0x821C;
pub const NUM_EXTENSIONS: GLenum = 0x821D;
pub const ARRAY_BUFFER: GLenum = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: GLenum = 0x8893;
pub const STATIC_DRAW: GLenum = 0x88E4;
pub const FRAGMENT_SHADER: GLenum = 0x8B30;
pub const VERTEX_SHADER: GLenum = 0x8B31;
pub const COMPILE_STATUS: GLenum = 0x8B81;
pub const LINK_STATUS: GLenum = 0x8B82;
pub const SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;
pub const FRAMEBUFFER_COMPLETE: GLenum = 0x8CD5;
pub const COLOR_ATTACHMENT0: GLenum = 0x8CE0;
pub const FRAMEBUFFER: GLenum = 0x8D40;
pub const RENDERBUFFER: GLenum = 0x8D41;
