use std::fmt::{Debug, Display, Formatter};

use crate::images::BufferContainer;
use crate::pixels::Element;
use crate::{
    ArrayDimsError, ArrayError, Extent, ImageBufferError, ImageView, ImageViewMut, MAX_AXES,
};

/// Generic reference to image data that provides [ImageView].
#[derive(Debug, Clone, Copy)]
pub struct TypedImageRef<'a, P> {
    extent: Extent,
    pixels: &'a [P],
}

impl<'a, P: Element> TypedImageRef<'a, P> {
    pub fn new(extent: Extent, pixels: &'a [P]) -> Result<Self, ImageBufferError> {
        let pixels = pixels
            .get(..pixels_count(extent)?)
            .ok_or(ImageBufferError::InvalidBufferSize)?;
        Ok(Self { extent, pixels })
    }

    pub fn from_buffer(extent: Extent, buffer: &'a [u8]) -> Result<Self, ImageBufferError> {
        let size = bytes_count::<P>(extent)?;
        let buffer = buffer
            .get(..size)
            .ok_or(ImageBufferError::InvalidBufferSize)?;
        let pixels = align_buffer_to(buffer)?;
        Self::new(extent, pixels)
    }

    pub fn pixels(&self) -> &[P] {
        self.pixels
    }
}

impl<'a, P: Element> ImageView for TypedImageRef<'a, P> {
    type Pixel = P;

    fn extent(&self) -> Extent {
        self.extent
    }

    fn get_pixel(&self, x: usize, y: usize, z: usize, c: usize) -> Option<P> {
        if !self.extent.contains(x, y, z, c) {
            return None;
        }
        self.pixels.get(self.extent.offset(x, y, z, c)).copied()
    }

    fn iter_pixels(&self) -> impl Iterator<Item = P> + '_ {
        self.pixels.iter().copied()
    }
}

/// Generic image container that provides [ImageView] and [ImageViewMut].
///
/// Pixels are stored in one buffer, `x` is the fastest-varying axis
/// and `c` (spectrum) the slowest one.
#[derive(Debug)]
pub struct TypedImage<'a, P: Element> {
    extent: Extent,
    pixels: BufferContainer<'a, P>,
}

impl<P: Element> TypedImage<'static, P> {
    /// Create an image filled by zeros.
    ///
    /// Panics if the number of values overflows `usize`.
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            pixels: BufferContainer::Owned(vec![P::zero(); extent.size()]),
        }
    }

    /// Create an image without pixels, all its sizes are zero.
    pub fn empty() -> Self {
        Self::new(Extent::default())
    }

    /// Create an image from sizes given in the order `x, y, z, c`.
    ///
    /// Missing sizes are equal to 1, zero sizes are replaced by 1.
    pub fn with_size(sizes: &[usize]) -> Result<Self, ArrayDimsError> {
        if sizes.len() > MAX_AXES {
            return Err(ArrayDimsError(sizes.len()));
        }
        let mut shape = [1; MAX_AXES];
        for (i, &size) in sizes.iter().enumerate() {
            shape[MAX_AXES - 1 - i] = size.max(1);
        }
        Ok(Self::new(Extent::from_shape(shape)))
    }

    pub fn from_pixels(extent: Extent, mut pixels: Vec<P>) -> Result<Self, ImageBufferError> {
        let size = pixels_count(extent)?;
        if pixels.len() < size {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        pixels.truncate(size);
        Ok(Self::from_vec_unchecked(extent, pixels))
    }

    /// Create an image from an array with row-major `shape`
    /// (the slowest-varying axis is first).
    ///
    /// An array with less than 4 dimensions fills the fastest axes:
    /// shape `[3, 4]` gives an image with width 4 and height 3.
    ///
    /// Number of pixels must be equal to the product of `shape`.
    pub fn from_array(shape: &[usize], pixels: Vec<P>) -> Result<Self, ArrayError> {
        let extent = array_extent(shape, pixels.len())?;
        Ok(Self::from_vec_unchecked(extent, pixels))
    }

    pub(crate) fn from_vec_unchecked(extent: Extent, pixels: Vec<P>) -> Self {
        debug_assert_eq!(pixels.len(), extent.size());
        Self {
            extent,
            pixels: BufferContainer::Owned(pixels),
        }
    }
}

impl<'a, P: Element> TypedImage<'a, P> {
    pub fn from_pixels_slice(extent: Extent, pixels: &'a mut [P]) -> Result<Self, ImageBufferError> {
        let pixels = pixels
            .get_mut(..pixels_count(extent)?)
            .ok_or(ImageBufferError::InvalidBufferSize)?;
        Ok(Self {
            extent,
            pixels: BufferContainer::Borrowed(pixels),
        })
    }

    pub fn from_buffer(extent: Extent, buffer: &'a mut [u8]) -> Result<Self, ImageBufferError> {
        let size = bytes_count::<P>(extent)?;
        if buffer.len() < size {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        let pixels = align_buffer_to_mut(&mut buffer[..size])?;
        Self::from_pixels_slice(extent, pixels)
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Sizes in the order `[spectrum, depth, height, width]`.
    #[inline]
    pub fn shape(&self) -> [usize; MAX_AXES] {
        self.extent.shape()
    }

    /// Total number of values in the image.
    #[inline]
    pub fn size(&self) -> usize {
        self.extent.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extent.is_empty()
    }

    pub fn pixels(&self) -> &[P] {
        self.pixels.borrow()
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        self.pixels.borrow_mut()
    }

    pub fn into_vec(self) -> Vec<P> {
        self.pixels.into_vec()
    }

    /// Returns a reference to the same pixels.
    pub fn as_image_ref(&self) -> TypedImageRef<'_, P> {
        TypedImageRef {
            extent: self.extent,
            pixels: self.pixels.borrow(),
        }
    }

    pub fn fill(&mut self, value: P) {
        self.pixels_mut().fill(value);
    }

    /// Returns minimal and maximal values or `None` for an empty image.
    pub fn min_max(&self) -> Option<(P, P)> {
        let mut iter = self.pixels().iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), v| {
            (
                if v < min { v } else { min },
                if v > max { v } else { max },
            )
        }))
    }
}

impl<'a, P: Element> Clone for TypedImage<'a, P> {
    fn clone(&self) -> Self {
        Self {
            extent: self.extent,
            pixels: BufferContainer::Owned(self.pixels.as_vec()),
        }
    }
}

impl<'a, 'b, P: Element> PartialEq<TypedImage<'b, P>> for TypedImage<'a, P> {
    fn eq(&self, other: &TypedImage<'b, P>) -> bool {
        self.extent == other.extent && self.pixels() == other.pixels()
    }
}

impl<'a, P: Element> ImageView for TypedImage<'a, P> {
    type Pixel = P;

    fn extent(&self) -> Extent {
        self.extent
    }

    fn get_pixel(&self, x: usize, y: usize, z: usize, c: usize) -> Option<P> {
        if !self.extent.contains(x, y, z, c) {
            return None;
        }
        self.pixels().get(self.extent.offset(x, y, z, c)).copied()
    }

    fn iter_pixels(&self) -> impl Iterator<Item = P> + '_ {
        self.pixels().iter().copied()
    }
}

impl<'a, P: Element> ImageViewMut for TypedImage<'a, P> {
    fn set_pixel(&mut self, x: usize, y: usize, z: usize, c: usize, value: P) -> bool {
        if !self.extent.contains(x, y, z, c) {
            return false;
        }
        let offset = self.extent.offset(x, y, z, c);
        match self.pixels_mut().get_mut(offset) {
            Some(pixel) => {
                *pixel = value;
                true
            }
            None => false,
        }
    }
}

impl<'a, P: Element> Display for TypedImage<'a, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "height:   {:5}", self.extent.height)?;
        writeln!(f, "width:    {:5}", self.extent.width)?;
        writeln!(f, "depth:    {:5}", self.extent.depth)?;
        writeln!(f, "spectrum: {:5}", self.extent.spectrum)?;
        writeln!(f, "data:    ")?;
        if self.is_empty() {
            return f.write_str("None");
        }
        let values: Vec<String> = self.pixels().iter().map(|v| v.to_string()).collect();
        let width = values.iter().map(|v| v.len()).max().unwrap_or(0);
        write_nested(f, &values, &self.shape(), 0, width)
    }
}

/// Writes values as nested lists, like NumPy prints arrays.
fn write_nested(
    f: &mut Formatter<'_>,
    values: &[String],
    shape: &[usize],
    level: usize,
    width: usize,
) -> std::fmt::Result {
    f.write_str("[")?;
    match shape {
        [] => {}
        [_] => {
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v:>width$}")?;
            }
        }
        [count, rest @ ..] => {
            let chunk = rest.iter().product::<usize>();
            let separator = "\n".repeat(rest.len());
            for (i, part) in values.chunks(chunk.max(1)).take(*count).enumerate() {
                if i > 0 {
                    write!(f, "{separator}{:indent$}", "", indent = level + 1)?;
                }
                write_nested(f, part, rest, level + 1, width)?;
            }
        }
    }
    f.write_str("]")
}

fn pixels_count(extent: Extent) -> Result<usize, ImageBufferError> {
    extent
        .checked_size()
        .ok_or(ImageBufferError::InvalidBufferSize)
}

fn bytes_count<P: Element>(extent: Extent) -> Result<usize, ImageBufferError> {
    pixels_count(extent)?
        .checked_mul(P::size())
        .ok_or(ImageBufferError::InvalidBufferSize)
}

/// Extent of an array with row-major `shape` and `len` values.
///
/// Shape with less than 4 dimensions is padded by ones from the left.
pub(crate) fn array_extent(shape: &[usize], len: usize) -> Result<Extent, ArrayError> {
    if shape.len() > MAX_AXES {
        return Err(ArrayDimsError(shape.len()).into());
    }
    let mut padded = [1; MAX_AXES];
    padded[MAX_AXES - shape.len()..].copy_from_slice(shape);
    let extent = Extent::from_shape(padded);
    let expected = pixels_count(extent)?;
    if len != expected {
        return Err(ArrayError::InvalidLength {
            expected,
            actual: len,
        });
    }
    Ok(extent)
}

pub(crate) fn align_buffer_to<T: Element>(buffer: &[u8]) -> Result<&[T], ImageBufferError> {
    bytemuck::try_cast_slice(buffer).map_err(buffer_error)
}

pub(crate) fn align_buffer_to_mut<T: Element>(
    buffer: &mut [u8],
) -> Result<&mut [T], ImageBufferError> {
    bytemuck::try_cast_slice_mut(buffer).map_err(buffer_error)
}

fn buffer_error(err: bytemuck::PodCastError) -> ImageBufferError {
    match err {
        bytemuck::PodCastError::TargetAlignmentGreaterAndInputNotAligned
        | bytemuck::PodCastError::AlignmentMismatch => ImageBufferError::InvalidBufferAlignment,
        _ => ImageBufferError::InvalidBufferSize,
    }
}
