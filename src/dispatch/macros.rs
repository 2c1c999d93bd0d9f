// gldispatch/src/dispatch/macros.rs
//
//! The `entry_points!` macro, which expands an API's entry-point table
//! into metadata, dispatch slots, and ABI stubs.

/// Declares the dispatched entry points of one API module.
///
/// Every `fn` expands to a variant of the module's `EntryIndex` enum
/// (the entry point's stable index), an [`EntryPoint`] record in
/// `ENTRIES`, and an `extern "system"` stub whose dispatch slot starts
/// empty and is rebound to the driver's pointer by the first call.
///
/// `fn name(..) as "glName"` declares an internal unwrapped stub: the
/// metadata carries the canonical name, no ABI symbol is exported, and
/// a hand-written wrapper in the declaring module provides the public
/// entry point.
///
/// `=> bootstrap [..]` marks the probe's own dependencies, which
/// resolve by direct library lookup without consulting the context.
///
/// [`EntryPoint`]: crate::provider::EntryPoint
macro_rules! entry_points {
    (@name $name:ident) => {
        stringify!($name)
    };
    (@name $name:ident $canonical:literal) => {
        $canonical
    };

    (@bootstrap) => {
        false
    };
    (@bootstrap bootstrap) => {
        true
    };

    (@stub $name:ident ($($arg:ident: $argty:ty),*) ($($ret:ty)?)) => {
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "system" fn $name($($arg: $argty),*) $(-> $ret)? {
            let ptr = dispatch_ptr(EntryIndex::$name);
            let driver: extern "system" fn($($argty),*) $(-> $ret)? =
                unsafe { ::std::mem::transmute(ptr) };
            driver($($arg),*)
        }
    };
    (@stub $name:ident ($($arg:ident: $argty:ty),*) ($($ret:ty)?) $canonical:literal) => {
        #[allow(non_snake_case)]
        pub(crate) extern "system" fn $name($($arg: $argty),*) $(-> $ret)? {
            let ptr = dispatch_ptr(EntryIndex::$name);
            let driver: extern "system" fn($($argty),*) $(-> $ret)? =
                unsafe { ::std::mem::transmute(ptr) };
            driver($($arg),*)
        }
    };

    (
        $(
            fn $name:ident($($arg:ident: $argty:ty),* $(,)?) $(-> $ret:ty)?
                $(as $canonical:literal)? => $($kind:ident)? [$($provider:expr),+ $(,)?];
        )+
    ) => {
        /// Index of each entry point in this module's dispatch table.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy)]
        #[repr(usize)]
        pub(crate) enum EntryIndex {
            $($name,)+
        }

        pub(crate) const ENTRY_COUNT: usize = [$(EntryIndex::$name),+].len();

        /// Entry-point metadata, in table order.
        pub(crate) static ENTRIES: [$crate::provider::EntryPoint; ENTRY_COUNT] = [
            $(
                $crate::provider::EntryPoint {
                    name: entry_points!(@name $name $($canonical)?),
                    providers: &[$($provider),+],
                    bootstrap: entry_points!(@bootstrap $($kind)?),
                },
            )+
        ];

        #[cfg(not(dispatch_tls))]
        static SLOTS: $crate::dispatch::GlobalSlots<ENTRY_COUNT> =
            $crate::dispatch::GlobalSlots::new();

        #[cfg(dispatch_tls)]
        ::std::thread_local! {
            static SLOTS: $crate::dispatch::ThreadSlots<ENTRY_COUNT> =
                const { $crate::dispatch::ThreadSlots::new() };
        }

        /// The driver pointer for `index`, resolving and rebinding the
        /// slot on the first call through it.
        #[cfg(not(dispatch_tls))]
        fn dispatch_ptr(index: EntryIndex) -> *mut ::std::os::raw::c_void {
            let index = index as usize;
            match SLOTS.get(index) {
                Some(ptr) => ptr,
                None => {
                    let ptr = $crate::dispatch::resolve(&ENTRIES[index]);
                    SLOTS.set(index, ptr);
                    ptr
                }
            }
        }

        #[cfg(dispatch_tls)]
        fn dispatch_ptr(index: EntryIndex) -> *mut ::std::os::raw::c_void {
            let index = index as usize;
            match SLOTS.with(|slots| slots.get(index)) {
                Some(ptr) => ptr,
                None => {
                    // Resolution may itself dispatch (the probe calls
                    // glGetString), so the slot is written in a second,
                    // re-entrant-safe access.
                    let ptr = $crate::dispatch::resolve(&ENTRIES[index]);
                    SLOTS.with(|slots| slots.set(index, ptr));
                    ptr
                }
            }
        }

        /// Forget this thread's resolved pointers; the next call
        /// through each stub re-resolves against whatever context is
        /// current then.
        #[cfg(dispatch_tls)]
        #[allow(dead_code)]
        pub(crate) fn invalidate_thread_slots() {
            let _ = SLOTS.try_with(|slots| slots.clear());
        }

        $(
            entry_points!(@stub $name ($($arg: $argty),*) ($($ret)?) $($canonical)?);
        )+
    };
}

pub(crate) use entry_points;
