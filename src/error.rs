// gldispatch/src/error.rs
//
//! Resolution failures and their diagnostics.
//!
//! None of these are recoverable: a context either provides what was
//! asked for or the calling program is broken, and handing back a stub
//! that crashes on invocation is strictly worse than failing fast at
//! resolve time. Every variant terminates the process through
//! [`Error::die`].

use crate::library::PlatformLibrary;
use crate::provider::Provider;

use log::error;
use std::fmt;
use std::process;

#[derive(Debug)]
pub(crate) enum Error {
    /// A required shared library could not be loaded.
    LibraryNotFound {
        library: PlatformLibrary,
        reason: String,
    },
    /// A symbol required to be present was missing from its library.
    SymbolNotFound {
        symbol: String,
        library: PlatformLibrary,
    },
    /// No provider of an entry point is active in the current context.
    NoProvider {
        name: &'static str,
        providers: &'static [Provider],
    },
    /// A version string reported by the driver could not be parsed.
    MalformedVersion {
        what: &'static str,
        value: String,
    },
    /// A query that needs a current context was made without one.
    NoCurrentContext { query: &'static str },
    /// Neither of the context-independent symbol resolvers could be
    /// located, even after loading their libraries.
    #[cfg(unix)]
    NoProcAddressResolver,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::LibraryNotFound { library, reason } => {
                write!(
                    f,
                    "Couldn't open {}: {}",
                    library.filename().to_string_lossy(),
                    reason
                )
            }
            Error::SymbolNotFound { symbol, library } => {
                write!(
                    f,
                    "{} not found in {}",
                    symbol,
                    library.filename().to_string_lossy()
                )
            }
            Error::NoProvider { name, providers } => {
                write!(f, "No provider of {} found. Requires one of:", name)?;
                for provider in providers.iter() {
                    write!(f, "\n    {}", provider)?;
                }
                Ok(())
            }
            Error::MalformedVersion { what, value } => {
                write!(f, "Unable to interpret {} string: {}", what, value)
            }
            Error::NoCurrentContext { query } => {
                write!(f, "{} queried with no context current", query)
            }
            #[cfg(unix)]
            Error::NoProcAddressResolver => {
                f.write_str("Couldn't find eglGetProcAddress or glXGetProcAddressARB")
            }
        }
    }
}

impl Error {
    /// Report the diagnostic and terminate the process.
    pub(crate) fn die(self) -> ! {
        error!("{}", self);
        eprintln!("{}", self);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::library::PlatformLibrary;
    use crate::provider::Provider;

    #[test]
    fn missing_library_diagnostic_names_the_file_and_reason() {
        let error = Error::LibraryNotFound {
            library: PlatformLibrary::Egl,
            reason: "cannot open shared object file".to_owned(),
        };
        #[cfg(unix)]
        assert_eq!(
            error.to_string(),
            "Couldn't open libEGL.so.1: cannot open shared object file"
        );
        #[cfg(windows)]
        assert_eq!(
            error.to_string(),
            "Couldn't open libEGL.dll: cannot open shared object file"
        );
    }

    #[test]
    fn missing_provider_diagnostic_lists_every_requirement() {
        static PROVIDERS: [Provider; 3] = [
            Provider::gl(32),
            Provider::gl_extension("GL_ARB_geometry_shader4"),
            Provider::gles2(32),
        ];
        let error = Error::NoProvider {
            name: "glFramebufferTexture",
            providers: &PROVIDERS,
        };
        assert_eq!(
            error.to_string(),
            "No provider of glFramebufferTexture found. Requires one of:\n    \
             Desktop OpenGL 3.2\n    \
             GL_ARB_geometry_shader4\n    \
             OpenGL ES 3.2"
        );
    }

    #[test]
    fn malformed_version_diagnostic_echoes_the_string() {
        let error = Error::MalformedVersion {
            what: "GL_VERSION",
            value: "Banana 9000".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "Unable to interpret GL_VERSION string: Banana 9000"
        );
    }
}
