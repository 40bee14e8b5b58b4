//! # fitsbridge
//!
//! A thin bridge between a native FITS-decoding core and a file-preview host.
//!
//! The actual decoding of the FITS format happens inside an opaque native
//! library shipped in two pointer-width builds; this crate never parses the
//! binary format itself. It owns the per-file native handle, moves the pixel
//! buffer and packed header text across the interop boundary, and turns them
//! into a displayable raster plus ordered key/value metadata.
//!
//! ## Features
//!
//! - Open a FITS file into an exclusively owned [`Session`], released exactly
//!   once on close.
//! - Query native (as-decoded) and output (display-ready) dimensions
//!   independently.
//! - Transfer the display-ready 8-bit pixel buffer in one call, sized from a
//!   fresh output-dimension query.
//! - Decode the packed `"key:value; key:value; ..."` header blob into a
//!   [`HeaderMap`] that preserves appearance order.
//! - Compose a [`Raster`] (Gray8 or Rgb24, tightly packed rows) ready for a
//!   bitmap viewer.
//! - A [`Preview`] facade with the closed/open state machine a preview host
//!   expects, including preferred-size fitting and title derivation.
//!
//! ## Getting started
//!
//! ```no_run
//! use fitsbridge::{Error, Preview};
//!
//! fn main() -> Result<(), Error> {
//!     // Loads the core build matching this process's pointer width.
//!     let mut preview = Preview::load_native(None)?;
//!     preview.open("m31.fits")?;
//!
//!     let (w, h) = preview.preferred_size(800, 600)?;
//!     println!("viewport: {w}x{h}");
//!
//!     let view = preview.view_model()?;
//!     println!(
//!         "raster: {}x{} {:?}",
//!         view.raster.descriptor.width, view.raster.descriptor.height,
//!         view.raster.descriptor.format
//!     );
//!     for (key, value) in view.header.iter() {
//!         println!("{key} = {value}");
//!     }
//!
//!     preview.close();
//!     Ok(())
//! }
//! ```
//!
//! ## The native boundary
//!
//! All native calls go through the [`bindings::CoreApi`] trait. The
//! production implementation, [`bindings::NativeCore`], resolves the entry
//! points of `fitscore32`/`fitscore64` once at load time; hosts and tests can
//! inject their own implementation instead. Everything is synchronous and
//! single-owner: a handle is never shared across threads, so a slow native
//! call blocks its caller for the duration.

pub mod bindings;

mod types;
pub use types::*;

pub mod header;

pub mod raster;

mod session;
pub use session::*;

mod preview;
pub use preview::*;
