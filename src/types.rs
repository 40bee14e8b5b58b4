use std::path::PathBuf;

/// Represents errors that can occur while bridging a FITS file to a raster.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The native core library could not be loaded or is missing an entry point.
    #[error("native core unavailable: {0}")]
    CoreUnavailable(#[from] libloading::Error),
    /// The native create call returned a null handle for this path.
    #[error("cannot open {}", .path.display())]
    OpenFailed { path: PathBuf },
    /// The native pixel fill call signalled an error. The native state is
    /// unknown after a failed fill, so this is never retried.
    #[error("pixel transfer failed (native status {status})")]
    TransferFailed { status: i32 },
    /// A header entry had no `:` separator between key and value.
    #[error("malformed header entry {entry:?}: missing ':' separator")]
    HeaderParse { entry: String },
    /// The image reports a channel count the bitmap layer cannot express.
    #[error("unsupported channel layout: {channels} channel(s)")]
    UnsupportedChannelLayout { channels: i32 },
    /// A query was made against a preview whose session is not open.
    #[error("session is closed")]
    SessionClosed,
    /// The file path contains an interior NUL byte and cannot cross the
    /// native boundary.
    #[error("path contains an interior NUL byte")]
    InvalidPath,
}

/// Image dimensions as reported by the native core.
///
/// Every opened image has two of these: the *native* dimension (the image as
/// decoded) and the *output* dimension (the display-ready raster, possibly
/// resampled or channel-normalized by the core). They are queried
/// independently and one is never derived from the other; all buffer sizing
/// uses the output dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Number of interleaved channels per pixel.
    pub channels: i32,
    /// Bit depth of the source data. The output raster is always 8 bits per
    /// sample; the core performs any depth normalization.
    pub bit_depth: i32,
}

impl Dimension {
    /// Exact byte length of a raster buffer for this dimension:
    /// `width * height * channels`, one byte per sample.
    pub fn buffer_len(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize * self.channels.max(0) as usize
    }
}

/// Pixel layouts the preview raster can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1 byte per pixel, single gray sample.
    Gray8,
    /// 3 bytes per pixel: R, G, B interleaved.
    Rgb24,
}

impl PixelFormat {
    /// Selects the format for a channel count. Only 1 and 3 channels are
    /// renderable; anything else is rejected.
    pub fn from_channels(channels: i32) -> Result<Self, Error> {
        match channels {
            1 => Ok(PixelFormat::Gray8),
            3 => Ok(PixelFormat::Rgb24),
            _ => Err(Error::UnsupportedChannelLayout { channels }),
        }
    }

    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
        }
    }
}

/// Interpretation metadata for a pixel buffer: everything a renderer needs
/// to treat the bytes as an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterDescriptor {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Pixel layout of the buffer.
    pub format: PixelFormat,
    /// Row length in bytes. Rows are tightly packed: always
    /// `width * channels`, no padding.
    pub stride: usize,
}

/// A displayable image: descriptor plus the owned pixel bytes it describes.
///
/// `pixels.len() == descriptor.height * descriptor.stride` always holds for
/// a composed raster.
#[derive(Debug, Clone)]
pub struct Raster {
    pub descriptor: RasterDescriptor,
    pub pixels: Vec<u8>,
}

/// Ordered key/value metadata decoded from an image header.
///
/// Iteration order is first-appearance order. Duplicate keys in the source
/// keep their original position but take the last value written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key/value pair, replacing the value in place if the key is
    /// already present.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates entries in appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
