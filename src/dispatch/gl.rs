// gldispatch/src/dispatch/gl.rs
//
//! The dispatched OpenGL entry points.
//!
//! The table lists providers in registry order: core versions
//! ascending, then extensions. It covers the entry points the dispatch
//! layer itself depends on plus the commonly called core surface; the
//! full Khronos registry expands into the same declarations.

use super::macros::entry_points;
use crate::ffi::gl::*;
use crate::library;
use crate::provider::Provider;

entry_points! {
    fn glGetString(name: GLenum) -> *const GLubyte
        => bootstrap [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glGetIntegerv(pname: GLenum, data: *mut GLint)
        => bootstrap [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glGetStringi(name: GLenum, index: GLuint) -> *const GLubyte
        => [Provider::gl(30), Provider::gles2(30)];
    fn glGetError() -> GLenum
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];

    fn glEnable(cap: GLenum)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glDisable(cap: GLenum)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glClear(mask: GLbitfield)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glClearColor(red: GLclampf, green: GLclampf, blue: GLclampf, alpha: GLclampf)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glViewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glDepthFunc(func: GLenum)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glBlendFunc(sfactor: GLenum, dfactor: GLenum)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glPixelStorei(pname: GLenum, param: GLint)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glReadPixels(
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        kind: GLenum,
        pixels: *mut GLvoid,
    ) => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glFlush()
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glFinish()
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];

    fn glBegin_unwrapped(mode: GLenum) as "glBegin"
        => [Provider::gl(10)];
    fn glEnd_unwrapped() as "glEnd"
        => [Provider::gl(10)];

    fn glDrawArrays(mode: GLenum, first: GLint, count: GLsizei)
        => [Provider::gl(11), Provider::gles1(10), Provider::gles2(20)];
    fn glDrawElements(mode: GLenum, count: GLsizei, kind: GLenum, indices: *const GLvoid)
        => [Provider::gl(11), Provider::gles1(10), Provider::gles2(20)];
    fn glGenTextures(n: GLsizei, textures: *mut GLuint)
        => [Provider::gl(11), Provider::gles1(10), Provider::gles2(20)];
    fn glBindTexture(target: GLenum, texture: GLuint)
        => [Provider::gl(11), Provider::gles1(10), Provider::gles2(20)];
    fn glDeleteTextures(n: GLsizei, textures: *const GLuint)
        => [Provider::gl(11), Provider::gles1(10), Provider::gles2(20)];
    fn glTexImage2D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        kind: GLenum,
        pixels: *const GLvoid,
    ) => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];
    fn glTexParameteri(target: GLenum, pname: GLenum, param: GLint)
        => [Provider::gl(10), Provider::gles1(10), Provider::gles2(20)];

    fn glGenBuffers(n: GLsizei, buffers: *mut GLuint)
        => [
            Provider::gl(15),
            Provider::gles1(11),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_vertex_buffer_object").with_symbol("glGenBuffersARB"),
        ];
    fn glBindBuffer(target: GLenum, buffer: GLuint)
        => [
            Provider::gl(15),
            Provider::gles1(11),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_vertex_buffer_object").with_symbol("glBindBufferARB"),
        ];
    fn glBufferData(target: GLenum, size: GLsizeiptr, data: *const GLvoid, usage: GLenum)
        => [
            Provider::gl(15),
            Provider::gles1(11),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_vertex_buffer_object").with_symbol("glBufferDataARB"),
        ];
    fn glDeleteBuffers(n: GLsizei, buffers: *const GLuint)
        => [
            Provider::gl(15),
            Provider::gles1(11),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_vertex_buffer_object").with_symbol("glDeleteBuffersARB"),
        ];

    fn glCreateShader(kind: GLenum) -> GLuint
        => [Provider::gl(20), Provider::gles2(20)];
    fn glDeleteShader(shader: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glShaderSource(
        shader: GLuint,
        count: GLsizei,
        string: *const *const GLchar,
        length: *const GLint,
    ) => [Provider::gl(20), Provider::gles2(20)];
    fn glCompileShader(shader: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glGetShaderiv(shader: GLuint, pname: GLenum, params: *mut GLint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glCreateProgram() -> GLuint
        => [Provider::gl(20), Provider::gles2(20)];
    fn glDeleteProgram(program: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glAttachShader(program: GLuint, shader: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glLinkProgram(program: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glGetProgramiv(program: GLuint, pname: GLenum, params: *mut GLint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glUseProgram(program: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glGetUniformLocation(program: GLuint, name: *const GLchar) -> GLint
        => [Provider::gl(20), Provider::gles2(20)];
    fn glUniform1i(location: GLint, v0: GLint)
        => [Provider::gl(20), Provider::gles2(20)];
    fn glUniformMatrix4fv(
        location: GLint,
        count: GLsizei,
        transpose: GLboolean,
        value: *const GLfloat,
    ) => [Provider::gl(20), Provider::gles2(20)];
    fn glVertexAttribPointer(
        index: GLuint,
        size: GLint,
        kind: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const GLvoid,
    ) => [Provider::gl(20), Provider::gles2(20)];
    fn glEnableVertexAttribArray(index: GLuint)
        => [Provider::gl(20), Provider::gles2(20)];

    fn glGenFramebuffers(n: GLsizei, framebuffers: *mut GLuint)
        => [
            Provider::gl(30),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_framebuffer_object"),
            Provider::gl_extension("GL_EXT_framebuffer_object")
                .with_symbol("glGenFramebuffersEXT"),
        ];
    fn glBindFramebuffer(target: GLenum, framebuffer: GLuint)
        => [
            Provider::gl(30),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_framebuffer_object"),
            Provider::gl_extension("GL_EXT_framebuffer_object")
                .with_symbol("glBindFramebufferEXT"),
        ];
    fn glDeleteFramebuffers(n: GLsizei, framebuffers: *const GLuint)
        => [
            Provider::gl(30),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_framebuffer_object"),
            Provider::gl_extension("GL_EXT_framebuffer_object")
                .with_symbol("glDeleteFramebuffersEXT"),
        ];
    fn glFramebufferTexture2D(
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
    ) => [
            Provider::gl(30),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_framebuffer_object"),
            Provider::gl_extension("GL_EXT_framebuffer_object")
                .with_symbol("glFramebufferTexture2DEXT"),
        ];
    fn glCheckFramebufferStatus(target: GLenum) -> GLenum
        => [
            Provider::gl(30),
            Provider::gles2(20),
            Provider::gl_extension("GL_ARB_framebuffer_object"),
            Provider::gl_extension("GL_EXT_framebuffer_object")
                .with_symbol("glCheckFramebufferStatusEXT"),
        ];

    fn glGenVertexArrays(n: GLsizei, arrays: *mut GLuint)
        => [
            Provider::gl(30),
            Provider::gles2(30),
            Provider::gl_extension("GL_ARB_vertex_array_object"),
            Provider::gl_extension("GL_OES_vertex_array_object")
                .with_symbol("glGenVertexArraysOES"),
        ];
    fn glBindVertexArray(array: GLuint)
        => [
            Provider::gl(30),
            Provider::gles2(30),
            Provider::gl_extension("GL_ARB_vertex_array_object"),
            Provider::gl_extension("GL_OES_vertex_array_object")
                .with_symbol("glBindVertexArrayOES"),
        ];
    fn glDeleteVertexArrays(n: GLsizei, arrays: *const GLuint)
        => [
            Provider::gl(30),
            Provider::gles2(30),
            Provider::gl_extension("GL_ARB_vertex_array_object"),
            Provider::gl_extension("GL_OES_vertex_array_object")
                .with_symbol("glDeleteVertexArraysOES"),
        ];
}

/// `glBegin` and `glEnd` bracket the region during which the GL spec
/// forbids most queries; the wrappers keep the probe informed.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn glBegin(mode: GLenum) {
    library::begin_region();
    glBegin_unwrapped(mode)
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn glEnd() {
    glEnd_unwrapped();
    library::end_region();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Api;

    #[test]
    fn indices_address_their_own_metadata() {
        assert_eq!(ENTRIES[EntryIndex::glGetString as usize].name, "glGetString");
        assert_eq!(ENTRIES[EntryIndex::glClear as usize].name, "glClear");
        assert_eq!(
            ENTRIES[EntryIndex::glGenFramebuffers as usize].name,
            "glGenFramebuffers"
        );
        assert_eq!(ENTRIES.len(), ENTRY_COUNT);
    }

    #[test]
    fn wrapped_entry_points_keep_their_canonical_names() {
        assert_eq!(ENTRIES[EntryIndex::glBegin_unwrapped as usize].name, "glBegin");
        assert_eq!(ENTRIES[EntryIndex::glEnd_unwrapped as usize].name, "glEnd");
    }

    #[test]
    fn probe_dependencies_are_bootstrap() {
        assert!(ENTRIES[EntryIndex::glGetString as usize].bootstrap);
        assert!(ENTRIES[EntryIndex::glGetIntegerv as usize].bootstrap);
        assert!(!ENTRIES[EntryIndex::glGetStringi as usize].bootstrap);
        assert!(!ENTRIES[EntryIndex::glClear as usize].bootstrap);
    }

    #[test]
    fn framebuffer_providers_are_in_registry_order() {
        let providers = ENTRIES[EntryIndex::glGenFramebuffers as usize].providers;
        assert_eq!(providers[0].api, Api::Gl);
        assert_eq!(providers[0].version, 30);
        assert_eq!(providers[0].extension, None);
        assert_eq!(
            providers[2].extension,
            Some("GL_ARB_framebuffer_object")
        );
        assert_eq!(providers[3].symbol, Some("glGenFramebuffersEXT"));
    }
}
