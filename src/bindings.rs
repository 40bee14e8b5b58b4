//! Raw interop surface of the native FITS core.
//!
//! The core ships as two pointer-width builds of one dynamic library exposing
//! an identical entry-point set. [`NativeCore`] picks the build matching the
//! running process once at load time and delegates through resolved function
//! pointers thereafter; nothing else in the crate branches on pointer width.

use std::ffi::CStr;
use std::path::{Path, PathBuf};

use libc::{c_char, c_int, c_void};
use libloading::Library;

use crate::{Dimension, Error};

/// Opaque native-side image state, valid only between create and destroy.
pub type RawHandle = *mut c_void;

/// Dimension struct returned by value across the native boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDimension {
    pub nx: c_int,
    pub ny: c_int,
    pub nc: c_int,
    pub depth: c_int,
}

impl From<RawDimension> for Dimension {
    fn from(raw: RawDimension) -> Self {
        Dimension {
            width: raw.nx,
            height: raw.ny,
            channels: raw.nc,
            bit_depth: raw.depth,
        }
    }
}

type CreateFn = unsafe extern "C" fn(*const c_char) -> RawHandle;
type DimensionFn = unsafe extern "C" fn(RawHandle) -> RawDimension;
type PixelsFn = unsafe extern "C" fn(RawHandle, *mut u8) -> c_int;
type HeaderFn = unsafe extern "C" fn(RawHandle, *mut c_char) -> c_int;
type DestroyFn = unsafe extern "C" fn(RawHandle);

/// Logical operation set of the native core.
///
/// This is the seam between the session layer and the loaded library: the
/// production implementation is [`NativeCore`], and hosts or tests may
/// substitute their own.
///
/// Contract for implementors: every `handle` passed to a method other than
/// [`create`](CoreApi::create) was returned non-null by `create` on the same
/// instance and has not been passed to [`destroy`](CoreApi::destroy) yet.
/// Access to a handle is exclusive and serialized; the bridge never shares a
/// handle across threads.
pub trait CoreApi {
    /// Opens an image and returns its handle, or null on failure.
    fn create(&self, path: &CStr) -> RawHandle;

    /// Dimensions of the image as decoded, before display normalization.
    fn dimension(&self, handle: RawHandle) -> Dimension;

    /// Dimensions of the display-ready raster. All buffer sizing must use
    /// this, never [`dimension`](CoreApi::dimension).
    fn output_dimension(&self, handle: RawHandle) -> Dimension;

    /// Fills `dest` with the display-ready pixels in one call and returns the
    /// native status (0 = success). `dest` must hold exactly
    /// `output_dimension(handle).buffer_len()` bytes; the native side writes
    /// without any bounds check of its own.
    fn fill_pixels(&self, handle: RawHandle, dest: &mut [u8]) -> i32;

    /// Size probe of the two-call header protocol: the header entry point
    /// invoked with a null destination. A value of 0 or less means the image
    /// has no header, which is not an error.
    fn header_len(&self, handle: RawHandle) -> i32;

    /// Fill half of the two-call header protocol: writes the packed
    /// `"key:value; key:value; ..."` text into `dest`, which must hold the
    /// probed length plus one byte for the terminator.
    fn fill_header(&self, handle: RawHandle, dest: &mut [u8]);

    /// Releases the native resources behind `handle`.
    fn destroy(&self, handle: RawHandle);
}

const LIB_BASENAME_32: &str = "fitscore32";
const LIB_BASENAME_64: &str = "fitscore64";

/// Platform file name of the core build matching this process's pointer
/// width. This is the single place the width decision is made.
pub fn default_library_name() -> String {
    let base = if std::mem::size_of::<usize>() == 8 {
        LIB_BASENAME_64
    } else {
        LIB_BASENAME_32
    };
    format!(
        "{}{}{}",
        std::env::consts::DLL_PREFIX,
        base,
        std::env::consts::DLL_SUFFIX
    )
}

/// The production [`CoreApi`]: the dynamically loaded native core.
///
/// All entry points are resolved up front at load time, so a missing symbol
/// surfaces as [`Error::CoreUnavailable`] here rather than mid-session.
pub struct NativeCore {
    // Keeps the resolved function pointers below valid.
    _lib: Library,
    create: CreateFn,
    get_dimension: DimensionFn,
    get_output_dimension: DimensionFn,
    get_pixels: PixelsFn,
    get_header: HeaderFn,
    destroy: DestroyFn,
}

impl NativeCore {
    /// Loads the pointer-width-matching core build from `dir`, or by plain
    /// library name (platform search path) when `dir` is `None`.
    pub fn load(dir: Option<&Path>) -> Result<Self, Error> {
        let name = default_library_name();
        let path = match dir {
            Some(dir) => dir.join(&name),
            None => PathBuf::from(&name),
        };
        Self::load_from(&path)
    }

    /// Loads the core from an explicit library path.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        log::debug!("loading native core from {}", path.display());

        // SAFETY: the library is trusted native code shipped alongside the
        // bridge; loading runs its initializers.
        let lib = unsafe { Library::new(path) }?;

        // SAFETY: symbol names and signatures match the core's export table.
        // Dereferencing a Symbol yields the raw function pointer, which stays
        // valid for as long as `_lib` is held.
        let core = unsafe {
            NativeCore {
                create: *lib.get::<CreateFn>(b"FitsImageCreate")?,
                get_dimension: *lib.get::<DimensionFn>(b"FitsImageGetMeta")?,
                get_output_dimension: *lib.get::<DimensionFn>(b"FitsImageGetOutputSize")?,
                get_pixels: *lib.get::<PixelsFn>(b"FitsImageGetPixData")?,
                get_header: *lib.get::<HeaderFn>(b"FitsImageGetHeader")?,
                destroy: *lib.get::<DestroyFn>(b"FitsImageDestroy")?,
                _lib: lib,
            }
        };
        log::debug!("native core loaded, all entry points resolved");
        Ok(core)
    }
}

impl CoreApi for NativeCore {
    fn create(&self, path: &CStr) -> RawHandle {
        // SAFETY: `path` is a valid NUL-terminated string for the duration of
        // the call; the core copies it.
        unsafe { (self.create)(path.as_ptr()) }
    }

    fn dimension(&self, handle: RawHandle) -> Dimension {
        // SAFETY: caller upholds the live-handle contract of `CoreApi`.
        unsafe { (self.get_dimension)(handle) }.into()
    }

    fn output_dimension(&self, handle: RawHandle) -> Dimension {
        // SAFETY: caller upholds the live-handle contract of `CoreApi`.
        unsafe { (self.get_output_dimension)(handle) }.into()
    }

    fn fill_pixels(&self, handle: RawHandle, dest: &mut [u8]) -> i32 {
        // SAFETY: `dest` is sized to the output dimension by the caller; the
        // core fills exactly that many bytes.
        unsafe { (self.get_pixels)(handle, dest.as_mut_ptr()) }
    }

    fn header_len(&self, handle: RawHandle) -> i32 {
        // SAFETY: a null destination is the documented size-probe form of the
        // header entry point; nothing is written.
        unsafe { (self.get_header)(handle, std::ptr::null_mut()) }
    }

    fn fill_header(&self, handle: RawHandle, dest: &mut [u8]) {
        // SAFETY: `dest` holds the probed length plus one terminator byte,
        // allocated immediately after the probe.
        unsafe {
            (self.get_header)(handle, dest.as_mut_ptr() as *mut c_char);
        }
    }

    fn destroy(&self, handle: RawHandle) {
        // SAFETY: caller passes each live handle exactly once.
        unsafe { (self.destroy)(handle) }
    }
}
