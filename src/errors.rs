use thiserror::Error;

use crate::{Axis, Extent, PixelType};

/// Kind of a selector that can't be used as an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Float,
}

impl std::fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float => f.write_str("float"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    #[error("Image has 4 dimensions, but {0} indices were given")]
    InvalidIndexArity(usize),
    #[error("Only integers and slices are valid indices, got {found} at position {position}")]
    InvalidIndexType {
        position: usize,
        found: SelectorKind,
    },
    #[error("Slice step cannot be zero")]
    ZeroSliceStep,
    #[error("Index {index} is out of bounds for axis {axis} with size {size}")]
    IndexOutOfRange { axis: Axis, index: i64, size: usize },
}

/// Shapes are given in the backing-store order `[c, z, y, x]`,
/// the shape of value is padded from the left by ones.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Could not broadcast value of shape {value:?} into selection of shape {selection:?}")]
pub struct ShapeMismatchError {
    pub value: [usize; 4],
    pub selection: [usize; 4],
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer is smaller than required")]
    InvalidBufferSize,
    #[error("Alignment of buffer don't match to alignment of pixel type")]
    InvalidBufferAlignment,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Image has at most 4 dimensions, but an array with {0} dimensions was given")]
pub struct ArrayDimsError(pub usize);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    #[error(transparent)]
    Dims(#[from] ArrayDimsError),
    #[error(transparent)]
    Buffer(#[from] ImageBufferError),
    #[error("Array must have {expected} values, but it has {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("The extent of the first image is not equal to the extent of the second image")]
pub struct DifferentExtentsError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Type of pixels of the first image is not equal to pixel type of the second image")]
pub struct DifferentTypesOfPixelsError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown pixel type '{0}'")]
pub struct UnknownPixelTypeError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexParseError {
    #[error("Index expression is empty")]
    Empty,
    #[error("Invalid number '{0}' in index expression")]
    InvalidNumber(String),
    #[error("Slice '{0}' has more than 3 parts")]
    TooManySliceParts(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageConversionError {
    #[error("Unsupported color type of the image")]
    UnsupportedColorType,
    #[error("Unsupported type of pixels {0}")]
    UnsupportedPixelType(PixelType),
    #[error("Image with extent {0} can't be converted")]
    UnsupportedExtent(Extent),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error(transparent)]
    DifferentExtents(#[from] DifferentExtentsError),
    #[error(transparent)]
    DifferentTypesOfPixels(#[from] DifferentTypesOfPixelsError),
}
