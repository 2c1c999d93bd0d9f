// gldispatch/build.rs
//
//! The `gldispatch` build script.

use cfg_aliases::cfg_aliases;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        windows_platform: { target_os = "windows" },

        // Dispatch slot storage. Windows always resolves per thread
        // (WGL function pointers are context-dependent); POSIX builds
        // may opt in for multi-driver processes.
        dispatch_tls: { any(windows_platform, feature = "thread-dispatch") },
    }
}
