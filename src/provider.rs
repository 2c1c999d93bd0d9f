// gldispatch/src/provider.rs
//
//! Entry-point metadata: which APIs, versions, and extensions provide
//! which symbols.

use std::fmt;

/// The API families an entry point can be provided by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Api {
    /// Desktop OpenGL.
    Gl,
    /// OpenGL ES 1.x.
    Gles1,
    /// OpenGL ES 2.0 and later.
    Gles2,
    /// The GLX window-system binding.
    Glx,
    /// The EGL window-system binding.
    Egl,
    /// The WGL window-system binding.
    Wgl,
}

/// One way of obtaining an entry point: an API at a minimum version,
/// optionally gated on an extension.
///
/// A provider is *active* when the current context reports its API at
/// or above `version` and, if `extension` is set, advertises that
/// extension. Provider lists are in Khronos registry order and the
/// first active provider wins; all active providers are behaviorally
/// equivalent, so first-match is stable and cheap.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Provider {
    pub(crate) api: Api,
    /// Minimum version, encoded as `10 * major + minor`.
    pub(crate) version: u16,
    /// Extension that must be advertised, if any.
    pub(crate) extension: Option<&'static str>,
    /// Symbol to look up; `None` means the entry point's canonical
    /// name.
    pub(crate) symbol: Option<&'static str>,
}

/// A dispatched function in the public ABI.
#[derive(Debug)]
pub(crate) struct EntryPoint {
    pub(crate) name: &'static str,
    /// Providers in registry order; the first active one wins.
    pub(crate) providers: &'static [Provider],
    /// Resolve by direct library lookup, without probing the context.
    /// Set only for the probe's own dependencies (`glGetString`,
    /// `glGetIntegerv`), which must resolve before any capability
    /// question can be answered.
    pub(crate) bootstrap: bool,
}

impl Provider {
    pub(crate) const fn gl(version: u16) -> Provider {
        Provider {
            api: Api::Gl,
            version,
            extension: None,
            symbol: None,
        }
    }

    pub(crate) const fn gles1(version: u16) -> Provider {
        Provider {
            api: Api::Gles1,
            version,
            extension: None,
            symbol: None,
        }
    }

    pub(crate) const fn gles2(version: u16) -> Provider {
        Provider {
            api: Api::Gles2,
            version,
            extension: None,
            symbol: None,
        }
    }

    pub(crate) const fn glx(version: u16) -> Provider {
        Provider {
            api: Api::Glx,
            version,
            extension: None,
            symbol: None,
        }
    }

    pub(crate) const fn egl(version: u16) -> Provider {
        Provider {
            api: Api::Egl,
            version,
            extension: None,
            symbol: None,
        }
    }

    pub(crate) const fn wgl(version: u16) -> Provider {
        Provider {
            api: Api::Wgl,
            version,
            extension: None,
            symbol: None,
        }
    }

    pub(crate) const fn gl_extension(name: &'static str) -> Provider {
        Provider {
            api: Api::Gl,
            version: 0,
            extension: Some(name),
            symbol: None,
        }
    }

    pub(crate) const fn glx_extension(name: &'static str) -> Provider {
        Provider {
            api: Api::Glx,
            version: 0,
            extension: Some(name),
            symbol: None,
        }
    }

    pub(crate) const fn egl_extension(name: &'static str) -> Provider {
        Provider {
            api: Api::Egl,
            version: 0,
            extension: Some(name),
            symbol: None,
        }
    }

    pub(crate) const fn wgl_extension(name: &'static str) -> Provider {
        Provider {
            api: Api::Wgl,
            version: 0,
            extension: Some(name),
            symbol: None,
        }
    }

    /// Look up a symbol other than the entry point's canonical name
    /// (suffixed extension variants such as `glGenFramebuffersEXT`).
    pub(crate) const fn with_symbol(self, symbol: &'static str) -> Provider {
        Provider {
            symbol: Some(symbol),
            ..self
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(extension) = self.extension {
            return f.write_str(extension);
        }
        let (major, minor) = (self.version / 10, self.version % 10);
        match self.api {
            Api::Gl => write!(f, "Desktop OpenGL {}.{}", major, minor),
            Api::Gles1 | Api::Gles2 => write!(f, "OpenGL ES {}.{}", major, minor),
            Api::Glx => write!(f, "GLX {}.{}", major, minor),
            Api::Egl => write!(f, "EGL {}.{}", major, minor),
            Api::Wgl => write!(f, "WGL {}.{}", major, minor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Provider;

    #[test]
    fn core_providers_format_as_api_and_version() {
        assert_eq!(Provider::gl(30).to_string(), "Desktop OpenGL 3.0");
        assert_eq!(Provider::gles2(20).to_string(), "OpenGL ES 2.0");
        assert_eq!(Provider::glx(13).to_string(), "GLX 1.3");
        assert_eq!(Provider::egl(15).to_string(), "EGL 1.5");
        assert_eq!(Provider::wgl(10).to_string(), "WGL 1.0");
    }

    #[test]
    fn extension_providers_format_as_the_extension_name() {
        assert_eq!(
            Provider::gl_extension("GL_ARB_framebuffer_object").to_string(),
            "GL_ARB_framebuffer_object"
        );
    }

    #[test]
    fn symbol_override_keeps_the_provider_requirements() {
        let provider =
            Provider::gl_extension("GL_EXT_framebuffer_object").with_symbol("glGenFramebuffersEXT");
        assert_eq!(provider.extension, Some("GL_EXT_framebuffer_object"));
        assert_eq!(provider.symbol, Some("glGenFramebuffersEXT"));
    }
}
