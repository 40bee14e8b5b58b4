//! Host-facing preview facade.
//!
//! A preview host drives one [`Preview`] per file: open, size a viewport via
//! [`Preview::preferred_size`], build the view model, and close. The facade
//! is a two-state machine (closed / open); queries while closed are caught
//! here and reported as [`Error::SessionClosed`] before anything reaches the
//! native boundary.

use std::path::Path;
use std::sync::Arc;

use crate::bindings::{CoreApi, NativeCore};
use crate::{Dimension, Error, HeaderMap, Raster, Session};

/// Everything the host renders for one file: the displayable raster plus its
/// header metadata. Built fresh on each request, never cached.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub raster: Raster,
    pub header: HeaderMap,
}

/// Per-file preview bridge over the native core.
///
/// Holds at most one open [`Session`]; the session in turn holds only the
/// native handle, so every view model request re-queries the core.
pub struct Preview {
    core: Arc<dyn CoreApi>,
    session: Option<Session>,
}

impl Preview {
    /// Creates a closed preview over an already-available core.
    pub fn new(core: Arc<dyn CoreApi>) -> Self {
        Preview {
            core,
            session: None,
        }
    }

    /// Creates a closed preview, loading the native core from `dir` (or the
    /// platform library search path when `None`).
    pub fn load_native(dir: Option<&Path>) -> Result<Self, Error> {
        Ok(Preview::new(Arc::new(NativeCore::load(dir)?)))
    }

    /// Opens `path`, transitioning to the open state. An already-open
    /// session is closed first, mirroring the host's cleanup-then-view
    /// sequence.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.close();
        self.session = Some(Session::open(self.core.clone(), path)?);
        Ok(())
    }

    /// Closes the current session, releasing its native resources. Safe to
    /// call in any state; closing an already-closed preview is a no-op.
    pub fn close(&mut self) {
        // Dropping the session releases the handle exactly once.
        self.session = None;
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&Session, Error> {
        self.session.as_ref().ok_or(Error::SessionClosed)
    }

    /// Title for the open file: its base name.
    pub fn title(&self) -> Result<String, Error> {
        Ok(self.session()?.title())
    }

    /// Native (as-decoded) dimension of the open file.
    pub fn native_dimension(&self) -> Result<Dimension, Error> {
        Ok(self.session()?.native_dimension())
    }

    /// Output (display-ready) dimension of the open file.
    pub fn output_dimension(&self) -> Result<Dimension, Error> {
        Ok(self.session()?.output_dimension())
    }

    /// Preferred display size fitted within the given bounds.
    pub fn preferred_size(&self, max_width: u32, max_height: u32) -> Result<(u32, u32), Error> {
        Ok(self.session()?.preferred_size(max_width, max_height))
    }

    /// Decoded header of the open file.
    pub fn header(&self) -> Result<HeaderMap, Error> {
        self.session()?.header()
    }

    /// Builds the renderable view model: raster plus header.
    ///
    /// A malformed header degrades to an empty map with a warning so the
    /// image still renders; raster failures are fatal for the preview.
    pub fn view_model(&self) -> Result<ViewModel, Error> {
        let session = self.session()?;
        let raster = session.raster()?;
        let header = match session.header() {
            Ok(header) => header,
            Err(err) => {
                log::warn!(
                    "rendering {} without metadata: {err}",
                    session.path().display()
                );
                HeaderMap::new()
            }
        };
        Ok(ViewModel { raster, header })
    }
}
