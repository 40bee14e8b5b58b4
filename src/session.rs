//! Exclusive ownership of one opened native image.

use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bindings::{CoreApi, RawHandle};
use crate::{Dimension, Error, HeaderMap, Raster, header, raster};

/// One opened image: the exclusive owner of its native handle.
///
/// A `Session` is created by [`Session::open`] and releases its handle when
/// dropped, exactly once. The handle is never shared or duplicated, and the
/// type is deliberately not `Send`: access to a handle is serialized for its
/// whole lifetime.
///
/// Queries go straight to the native core on every call; nothing derived
/// (header, pixels) is cached here.
pub struct Session {
    core: Arc<dyn CoreApi>,
    handle: RawHandle,
    path: PathBuf,
}

impl Session {
    /// Opens `path` through the native core.
    ///
    /// No existence check is made here; the core decides whether it can
    /// decode the file. A null handle from the create call becomes
    /// [`Error::OpenFailed`] and nothing is retained.
    pub fn open(core: Arc<dyn CoreApi>, path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let c_path =
            CString::new(path.to_string_lossy().into_owned()).map_err(|_| Error::InvalidPath)?;

        log::debug!("opening {}", path.display());
        let handle = core.create(&c_path);
        if handle.is_null() {
            log::warn!("native core rejected {}", path.display());
            return Err(Error::OpenFailed {
                path: path.to_owned(),
            });
        }

        Ok(Session {
            core,
            handle,
            path: path.to_owned(),
        })
    }

    /// The path this session was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file's base name, used as the preview title.
    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Dimensions of the image as decoded. Pure query, repeatable.
    pub fn native_dimension(&self) -> Dimension {
        self.core.dimension(self.handle)
    }

    /// Dimensions of the display-ready raster. Pure query, repeatable. This
    /// is what sizes every buffer; it may differ from the native dimension
    /// and neither is ever computed from the other.
    pub fn output_dimension(&self) -> Dimension {
        self.core.output_dimension(self.handle)
    }

    /// Display size for this image fitted within the given bounds,
    /// aspect-preserving and never upscaled.
    pub fn preferred_size(&self, max_width: u32, max_height: u32) -> (u32, u32) {
        raster::fit_within(self.output_dimension(), max_width, max_height)
    }

    /// Transfers the display-ready pixels into a freshly sized buffer.
    ///
    /// The output dimension is re-queried here, immediately before the fill,
    /// and the buffer is allocated from that same answer; the two steps are
    /// never split apart because the native fill writes with no bounds check
    /// of its own. Returns the dimension used together with the bytes.
    pub fn read_pixels(&self) -> Result<(Dimension, Vec<u8>), Error> {
        let dimension = self.output_dimension();
        let mut pixels = vec![0u8; dimension.buffer_len()];
        let status = self.core.fill_pixels(self.handle, &mut pixels);
        if status != 0 {
            log::warn!(
                "pixel transfer failed for {} (status {status})",
                self.path.display()
            );
            return Err(Error::TransferFailed { status });
        }
        Ok((dimension, pixels))
    }

    /// Transfers the pixels and composes them into a displayable raster.
    pub fn raster(&self) -> Result<Raster, Error> {
        let (dimension, pixels) = self.read_pixels()?;
        raster::compose(dimension, pixels)
    }

    /// Fetches the packed header text, or `None` when the image has none.
    ///
    /// Two-call protocol dictated by the native boundary: probe the length
    /// with a null destination, then fill a `length + 1` byte buffer. A
    /// probe of 0 or less means "no header" and skips the fill entirely.
    pub fn raw_header(&self) -> Option<String> {
        let len = self.core.header_len(self.handle);
        if len <= 0 {
            return None;
        }
        let mut buf = vec![0u8; len as usize + 1];
        self.core.fill_header(self.handle, &mut buf);
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Some(String::from_utf8_lossy(&buf[..end]).into_owned())
    }

    /// Fetches and decodes the header. An absent header yields an empty map;
    /// a malformed one yields [`Error::HeaderParse`].
    pub fn header(&self) -> Result<HeaderMap, Error> {
        match self.raw_header() {
            None => Ok(HeaderMap::new()),
            Some(raw) => header::parse_header(&raw),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            log::debug!("closing {}", self.path.display());
            self.core.destroy(self.handle);
            self.handle = std::ptr::null_mut();
        }
    }
}
