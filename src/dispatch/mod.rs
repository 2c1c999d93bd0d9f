// gldispatch/src/dispatch/mod.rs
//
//! Dispatch slot storage and the per-entry-point resolver.
//!
//! Every stub routes through a dispatch slot that starts empty. The
//! first call resolves: walk the entry point's provider list against
//! the current context's capabilities, look the winning symbol up, and
//! store the pointer so later calls cost a single load. Slots never
//! revert once written, except that per-thread tables are cleared
//! wholesale when their thread rebinds its context.

pub(crate) mod macros;

pub mod gl;

#[cfg(unix)]
pub mod egl;
#[cfg(unix)]
pub mod glx;
#[cfg(windows_platform)]
pub mod wgl;

use crate::context;
use crate::error::Error;
use crate::platform;
use crate::provider::{Api, EntryPoint, Provider};

use log::debug;
use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

#[cfg(any(dispatch_tls, test))]
use std::cell::Cell;

/// One process-wide dispatch slot per entry point. Concurrent writers
/// can only race to store the same resolved pointer, so relaxed
/// ordering and last-write-wins are correct; a reader that misses a
/// store at worst resolves again.
pub(crate) struct GlobalSlots<const N: usize> {
    slots: [AtomicPtr<c_void>; N],
}

impl<const N: usize> GlobalSlots<N> {
    pub(crate) const fn new() -> GlobalSlots<N> {
        GlobalSlots {
            slots: [const { AtomicPtr::new(ptr::null_mut()) }; N],
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<*mut c_void> {
        let ptr = self.slots[index].load(Ordering::Relaxed);
        if ptr.is_null() {
            None
        } else {
            Some(ptr)
        }
    }

    pub(crate) fn set(&self, index: usize, ptr: *mut c_void) {
        self.slots[index].store(ptr, Ordering::Relaxed);
    }
}

/// One dispatch slot per entry point, private to a thread. Allocated
/// zeroed on the thread's first dispatch and reclaimed when the thread
/// exits; no cross-thread synchronization is needed for rewrites.
#[cfg(any(dispatch_tls, test))]
pub(crate) struct ThreadSlots<const N: usize> {
    slots: [Cell<*mut c_void>; N],
}

#[cfg(any(dispatch_tls, test))]
impl<const N: usize> ThreadSlots<N> {
    pub(crate) const fn new() -> ThreadSlots<N> {
        ThreadSlots {
            slots: [const { Cell::new(ptr::null_mut()) }; N],
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<*mut c_void> {
        let ptr = self.slots[index].get();
        if ptr.is_null() {
            None
        } else {
            Some(ptr)
        }
    }

    pub(crate) fn set(&self, index: usize, ptr: *mut c_void) {
        self.slots[index].set(ptr);
    }

    pub(crate) fn clear(&self) {
        for slot in &self.slots {
            slot.set(ptr::null_mut());
        }
    }
}

/// The capability questions resolution asks, all in conservative form.
/// A seam so provider selection can be exercised without a live
/// context.
pub(crate) trait ContextProbe {
    fn is_desktop_gl(&self) -> bool;
    fn gl_version(&self) -> i32;
    fn has_gl_extension(&self, ext: &str) -> bool;
    fn glx_version(&self) -> i32;
    fn has_glx_extension(&self, ext: &str) -> bool;
    fn egl_version(&self) -> i32;
    fn has_egl_extension(&self, ext: &str) -> bool;
    fn has_wgl_extension(&self, ext: &str) -> bool;
}

/// Probes the context actually bound on the calling thread.
struct LiveProbe;

impl ContextProbe for LiveProbe {
    fn is_desktop_gl(&self) -> bool {
        context::conservative_is_desktop_gl()
    }

    fn gl_version(&self) -> i32 {
        context::conservative_gl_version()
    }

    fn has_gl_extension(&self, ext: &str) -> bool {
        context::conservative_has_gl_extension(ext)
    }

    #[cfg(unix)]
    fn glx_version(&self) -> i32 {
        context::conservative_glx_version()
    }

    #[cfg(not(unix))]
    fn glx_version(&self) -> i32 {
        0
    }

    #[cfg(unix)]
    fn has_glx_extension(&self, ext: &str) -> bool {
        context::conservative_has_glx_extension(ext)
    }

    #[cfg(not(unix))]
    fn has_glx_extension(&self, _ext: &str) -> bool {
        false
    }

    #[cfg(unix)]
    fn egl_version(&self) -> i32 {
        context::conservative_egl_version()
    }

    #[cfg(not(unix))]
    fn egl_version(&self) -> i32 {
        0
    }

    #[cfg(unix)]
    fn has_egl_extension(&self, ext: &str) -> bool {
        context::conservative_has_egl_extension(ext)
    }

    #[cfg(not(unix))]
    fn has_egl_extension(&self, _ext: &str) -> bool {
        false
    }

    #[cfg(windows_platform)]
    fn has_wgl_extension(&self, ext: &str) -> bool {
        context::conservative_has_wgl_extension(ext)
    }

    #[cfg(not(windows_platform))]
    fn has_wgl_extension(&self, _ext: &str) -> bool {
        false
    }
}

fn provider_is_active(provider: &Provider, probe: &dyn ContextProbe) -> bool {
    if let Some(ext) = provider.extension {
        return match provider.api {
            Api::Gl | Api::Gles1 | Api::Gles2 => probe.has_gl_extension(ext),
            Api::Glx => probe.has_glx_extension(ext),
            Api::Egl => probe.has_egl_extension(ext),
            Api::Wgl => probe.has_wgl_extension(ext),
        };
    }
    match provider.api {
        Api::Gl => probe.is_desktop_gl() && probe.gl_version() >= i32::from(provider.version),
        Api::Gles1 => {
            !probe.is_desktop_gl() && {
                let version = probe.gl_version();
                version >= i32::from(provider.version) && version < 20
            }
        }
        Api::Gles2 => {
            !probe.is_desktop_gl() && probe.gl_version() >= i32::from(provider.version)
        }
        // The window-system bindings establish their base versions by
        // symbol lookup alone; probing them would dispatch the very
        // entry points being resolved.
        Api::Glx => provider.version <= 10 || probe.glx_version() >= i32::from(provider.version),
        Api::Egl => provider.version <= 10 || probe.egl_version() >= i32::from(provider.version),
        Api::Wgl => provider.version <= 10,
    }
}

fn resolve_with(
    entry: &EntryPoint,
    probe: &dyn ContextProbe,
    mut lookup: impl FnMut(&Provider, &str) -> *mut c_void,
) -> Result<*mut c_void, Error> {
    for provider in entry.providers {
        if !provider_is_active(provider, probe) {
            continue;
        }
        let symbol = provider.symbol.unwrap_or(entry.name);
        let ptr = lookup(provider, symbol);
        if ptr.is_null() {
            // The provider looked active, possibly on a permissive
            // answer; the lookup is the ground truth.
            debug!("{} is active for {} but lacks {}", provider, entry.name, symbol);
            continue;
        }
        debug!("resolved {} via {}", entry.name, provider);
        return Ok(ptr);
    }
    Err(Error::NoProvider {
        name: entry.name,
        providers: entry.providers,
    })
}

/// Resolves `entry` for the context current on the calling thread, or
/// terminates with a diagnostic naming every requirement.
pub(crate) fn resolve(entry: &EntryPoint) -> *mut c_void {
    if entry.bootstrap {
        return platform::bootstrap_dlsym(entry.name);
    }
    match resolve_with(entry, &LiveProbe, |provider, symbol| {
        platform::lookup(provider, symbol)
    }) {
        Ok(ptr) => ptr,
        Err(error) => error.die(),
    }
}

/// Called after a MakeCurrent-family entry point has run. With
/// per-thread dispatch, the thread may now be bound to a different
/// driver, so its resolved GL pointers are discarded.
pub(crate) fn handle_context_switch() {
    #[cfg(dispatch_tls)]
    {
        gl::invalidate_thread_slots();
        #[cfg(windows_platform)]
        wgl::invalidate_thread_slots();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    struct FakeProbe {
        desktop: bool,
        gl_version: i32,
        gl_extensions: &'static [&'static str],
        glx_version: i32,
        egl_version: i32,
    }

    impl Default for FakeProbe {
        fn default() -> FakeProbe {
            FakeProbe {
                desktop: true,
                gl_version: 0,
                gl_extensions: &[],
                glx_version: 0,
                egl_version: 0,
            }
        }
    }

    impl ContextProbe for FakeProbe {
        fn is_desktop_gl(&self) -> bool {
            self.desktop
        }
        fn gl_version(&self) -> i32 {
            self.gl_version
        }
        fn has_gl_extension(&self, ext: &str) -> bool {
            self.gl_extensions.contains(&ext)
        }
        fn glx_version(&self) -> i32 {
            self.glx_version
        }
        fn has_glx_extension(&self, _ext: &str) -> bool {
            false
        }
        fn egl_version(&self) -> i32 {
            self.egl_version
        }
        fn has_egl_extension(&self, _ext: &str) -> bool {
            false
        }
        fn has_wgl_extension(&self, _ext: &str) -> bool {
            false
        }
    }

    fn fake_ptr(value: usize) -> *mut std::os::raw::c_void {
        value as *mut std::os::raw::c_void
    }

    static FRAMEBUFFER_PROVIDERS: [Provider; 3] = [
        Provider::gl(30),
        Provider::gl_extension("GL_ARB_framebuffer_object"),
        Provider::gl_extension("GL_EXT_framebuffer_object").with_symbol("glGenFramebuffersEXT"),
    ];
    static FRAMEBUFFER_ENTRY: EntryPoint = EntryPoint {
        name: "glGenFramebuffers",
        providers: &FRAMEBUFFER_PROVIDERS,
        bootstrap: false,
    };

    #[test]
    fn first_active_provider_wins_over_later_ones() {
        // A 3.1 context that also advertises the extension must still
        // pick the core symbol: first match, not best match.
        let probe = FakeProbe {
            gl_version: 31,
            gl_extensions: &["GL_ARB_framebuffer_object"],
            ..FakeProbe::default()
        };
        let mut lookups = Vec::new();
        let result = resolve_with(&FRAMEBUFFER_ENTRY, &probe, |provider, symbol| {
            lookups.push((provider.extension, symbol.to_owned()));
            fake_ptr(0x1000)
        });
        assert_eq!(result.unwrap(), fake_ptr(0x1000));
        assert_eq!(lookups, vec![(None, "glGenFramebuffers".to_owned())]);
    }

    #[test]
    fn extension_provider_carries_its_suffixed_symbol() {
        let probe = FakeProbe {
            gl_version: 21,
            gl_extensions: &["GL_EXT_framebuffer_object"],
            ..FakeProbe::default()
        };
        let mut lookups = Vec::new();
        let result = resolve_with(&FRAMEBUFFER_ENTRY, &probe, |_, symbol| {
            lookups.push(symbol.to_owned());
            fake_ptr(0x2000)
        });
        assert_eq!(result.unwrap(), fake_ptr(0x2000));
        assert_eq!(lookups, vec!["glGenFramebuffersEXT".to_owned()]);
    }

    #[test]
    fn null_lookup_falls_through_to_the_next_provider() {
        let probe = FakeProbe {
            gl_version: 31,
            gl_extensions: &["GL_ARB_framebuffer_object"],
            ..FakeProbe::default()
        };
        let mut calls = 0;
        let result = resolve_with(&FRAMEBUFFER_ENTRY, &probe, |_, _| {
            calls += 1;
            if calls == 1 {
                std::ptr::null_mut()
            } else {
                fake_ptr(0x3000)
            }
        });
        assert_eq!(result.unwrap(), fake_ptr(0x3000));
        assert_eq!(calls, 2);
    }

    #[test]
    fn exhausted_providers_report_every_requirement() {
        let probe = FakeProbe {
            gl_version: 21,
            ..FakeProbe::default()
        };
        let error = resolve_with(&FRAMEBUFFER_ENTRY, &probe, |_, _| {
            panic!("no lookup should happen without an active provider")
        })
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "No provider of glGenFramebuffers found. Requires one of:\n    \
             Desktop OpenGL 3.0\n    \
             GL_ARB_framebuffer_object\n    \
             GL_EXT_framebuffer_object"
        );
    }

    #[test]
    fn es_contexts_never_activate_desktop_providers() {
        static PROVIDERS: [Provider; 2] = [Provider::gl(20), Provider::gles2(20)];
        static ENTRY: EntryPoint = EntryPoint {
            name: "glCreateShader",
            providers: &PROVIDERS,
            bootstrap: false,
        };
        let probe = FakeProbe {
            desktop: false,
            gl_version: 30,
            ..FakeProbe::default()
        };
        let mut selected = Vec::new();
        resolve_with(&ENTRY, &probe, |provider, _| {
            selected.push(provider.api);
            fake_ptr(0x4000)
        })
        .unwrap();
        assert_eq!(selected, vec![Api::Gles2]);
    }

    #[test]
    fn es1_providers_require_an_es1_context() {
        static PROVIDERS: [Provider; 1] = [Provider::gles1(10)];
        static ENTRY: EntryPoint = EntryPoint {
            name: "glAlphaFuncx",
            providers: &PROVIDERS,
            bootstrap: false,
        };
        // ES 2.0 is not ES1; the provider must stay inactive.
        let probe = FakeProbe {
            desktop: false,
            gl_version: 20,
            ..FakeProbe::default()
        };
        assert!(resolve_with(&ENTRY, &probe, |_, _| fake_ptr(0x5000)).is_err());

        let probe = FakeProbe {
            desktop: false,
            gl_version: 11,
            ..FakeProbe::default()
        };
        assert!(resolve_with(&ENTRY, &probe, |_, _| fake_ptr(0x5000)).is_ok());
    }

    #[test]
    fn window_system_base_versions_skip_the_probe() {
        static PROVIDERS: [Provider; 1] = [Provider::glx(10)];
        static ENTRY: EntryPoint = EntryPoint {
            name: "glXGetCurrentContext",
            providers: &PROVIDERS,
            bootstrap: false,
        };
        // Even a probe that reports no GLX at all must not block the
        // base version; the lookup decides.
        let probe = FakeProbe::default();
        assert!(resolve_with(&ENTRY, &probe, |_, _| fake_ptr(0x6000)).is_ok());
    }

    #[test]
    fn versioned_window_system_providers_do_probe() {
        static PROVIDERS: [Provider; 1] = [Provider::glx(13)];
        static ENTRY: EntryPoint = EntryPoint {
            name: "glXQueryContext",
            providers: &PROVIDERS,
            bootstrap: false,
        };
        let old = FakeProbe {
            glx_version: 12,
            ..FakeProbe::default()
        };
        assert!(resolve_with(&ENTRY, &old, |_, _| fake_ptr(0x7000)).is_err());
        let new = FakeProbe {
            glx_version: 14,
            ..FakeProbe::default()
        };
        assert!(resolve_with(&ENTRY, &new, |_, _| fake_ptr(0x7000)).is_ok());
    }

    #[test]
    fn global_slots_resolve_once_and_rebind() {
        let slots = GlobalSlots::<2>::new();
        let mut resolutions = 0;
        for _ in 0..3 {
            if slots.get(0).is_none() {
                resolutions += 1;
                slots.set(0, fake_ptr(0x8000));
            }
        }
        assert_eq!(resolutions, 1);
        assert_eq!(slots.get(0), Some(fake_ptr(0x8000)));
        assert_eq!(slots.get(1), None);
    }

    #[test]
    fn thread_slots_clear_for_rebinding() {
        let slots = ThreadSlots::<2>::new();
        slots.set(0, fake_ptr(0x9000));
        slots.set(1, fake_ptr(0xa000));
        assert_eq!(slots.get(0), Some(fake_ptr(0x9000)));
        slots.clear();
        assert_eq!(slots.get(0), None);
        assert_eq!(slots.get(1), None);
    }

    #[test]
    fn thread_slots_are_invisible_across_threads() {
        std::thread_local! {
            static SLOTS: ThreadSlots<1> = const { ThreadSlots::new() };
        }
        SLOTS.with(|slots| slots.set(0, fake_ptr(0xb000)));
        std::thread::spawn(|| {
            SLOTS.with(|slots| assert_eq!(slots.get(0), None));
        })
        .join()
        .unwrap();
        SLOTS.with(|slots| assert_eq!(slots.get(0), Some(fake_ptr(0xb000))));
    }
}
