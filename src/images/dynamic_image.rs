use std::any::Any;
use std::fmt::{Display, Formatter};

use crate::images::TypedImage;
use crate::pixels::{Element, PixelType};
use crate::{Access, AccessError, Extent, ImageView, ImageViewMut, IndexExpr};

/// Image with type of pixels selected at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicImage {
    U8(TypedImage<'static, u8>),
    U16(TypedImage<'static, u16>),
    U32(TypedImage<'static, u32>),
    F32(TypedImage<'static, f32>),
    F64(TypedImage<'static, f64>),
}

/// One pixel value of [DynamicImage].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelValue {
    U8(u8),
    U16(u16),
    U32(u32),
    F32(f32),
    F64(f64),
}

/// Result of reading [DynamicImage] through an index expression.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicAccess {
    Scalar(PixelValue),
    View(DynamicImage),
}

macro_rules! dispatch {
    ($image:expr, $typed:ident => $body:expr) => {
        match $image {
            DynamicImage::U8($typed) => $body,
            DynamicImage::U16($typed) => $body,
            DynamicImage::U32($typed) => $body,
            DynamicImage::F32($typed) => $body,
            DynamicImage::F64($typed) => $body,
        }
    };
}

macro_rules! typed_conversions {
    ($type:ty, $variant:ident) => {
        impl From<TypedImage<'static, $type>> for DynamicImage {
            fn from(image: TypedImage<'static, $type>) -> Self {
                Self::$variant(image)
            }
        }

        impl From<$type> for PixelValue {
            fn from(value: $type) -> Self {
                Self::$variant(value)
            }
        }
    };
}

typed_conversions!(u8, U8);
typed_conversions!(u16, U16);
typed_conversions!(u32, U32);
typed_conversions!(f32, F32);
typed_conversions!(f64, F64);

impl PixelValue {
    pub fn pixel_type(&self) -> PixelType {
        match self {
            Self::U8(_) => PixelType::U8,
            Self::U16(_) => PixelType::U16,
            Self::U32(_) => PixelType::U32,
            Self::F32(_) => PixelType::F32,
            Self::F64(_) => PixelType::F64,
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Self::U8(v) => v.to_f64(),
            Self::U16(v) => v.to_f64(),
            Self::U32(v) => v.to_f64(),
            Self::F32(v) => v.to_f64(),
            Self::F64(v) => v,
        }
    }
}

impl Display for PixelValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

impl Default for DynamicImage {
    /// Empty image with pixels of [PixelType::F32].
    fn default() -> Self {
        Self::new(Extent::default(), PixelType::default())
    }
}

impl DynamicImage {
    /// Create an image filled by zeros.
    pub fn new(extent: Extent, pixel_type: PixelType) -> Self {
        match pixel_type {
            PixelType::U8 => Self::U8(TypedImage::new(extent)),
            PixelType::U16 => Self::U16(TypedImage::new(extent)),
            PixelType::U32 => Self::U32(TypedImage::new(extent)),
            PixelType::F32 => Self::F32(TypedImage::new(extent)),
            PixelType::F64 => Self::F64(TypedImage::new(extent)),
        }
    }

    pub fn pixel_type(&self) -> PixelType {
        match self {
            Self::U8(_) => PixelType::U8,
            Self::U16(_) => PixelType::U16,
            Self::U32(_) => PixelType::U32,
            Self::F32(_) => PixelType::F32,
            Self::F64(_) => PixelType::F64,
        }
    }

    pub fn extent(&self) -> Extent {
        dispatch!(self, image => image.extent())
    }

    pub fn size(&self) -> usize {
        self.extent().size()
    }

    pub fn is_empty(&self) -> bool {
        self.extent().is_empty()
    }

    /// Returns the typed image if type of its pixels is `P`.
    pub fn typed_image<P: Element>(&self) -> Option<&TypedImage<'static, P>> {
        dispatch!(self, image => (image as &dyn Any).downcast_ref())
    }

    pub fn typed_image_mut<P: Element>(&mut self) -> Option<&mut TypedImage<'static, P>> {
        dispatch!(self, image => (image as &mut dyn Any).downcast_mut())
    }

    /// Reads one value or copies the selected part of the image.
    pub fn read(&self, expr: impl Into<IndexExpr>) -> Result<DynamicAccess, AccessError> {
        let expr = expr.into();
        dispatch!(self, image => Ok(match image.read(expr)? {
            Access::Scalar(v) => DynamicAccess::Scalar(v.into()),
            Access::View(view) => DynamicAccess::View(view.into()),
        }))
    }

    /// Stores the value, converted into the type of pixels,
    /// into the selected part of the image.
    pub fn write_scalar(
        &mut self,
        expr: impl Into<IndexExpr>,
        value: f64,
    ) -> Result<(), AccessError> {
        let expr = expr.into();
        dispatch!(self, image => write_f64(image, expr, value))
    }

    pub fn fill(&mut self, value: f64) {
        dispatch!(self, image => image.fill(Element::from_f64(value)))
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        dispatch!(self, image => image.min_max().map(|(min, max)| (min.to_f64(), max.to_f64())))
    }

    /// Returns copy of the image with pixels of another type.
    pub fn convert(&self, pixel_type: PixelType) -> Self {
        let values: Vec<f64> = dispatch!(self, image => {
            image.pixels().iter().map(|v| v.to_f64()).collect()
        });
        let extent = self.extent();
        match pixel_type {
            PixelType::U8 => Self::U8(from_f64_values(extent, &values)),
            PixelType::U16 => Self::U16(from_f64_values(extent, &values)),
            PixelType::U32 => Self::U32(from_f64_values(extent, &values)),
            PixelType::F32 => Self::F32(from_f64_values(extent, &values)),
            PixelType::F64 => Self::F64(from_f64_values(extent, &values)),
        }
    }
}

fn write_f64<P: Element>(
    image: &mut TypedImage<'static, P>,
    expr: IndexExpr,
    value: f64,
) -> Result<(), AccessError> {
    image.write(expr, P::from_f64(value))
}

fn from_f64_values<P: Element>(extent: Extent, values: &[f64]) -> TypedImage<'static, P> {
    let pixels = values.iter().map(|&v| P::from_f64(v)).collect();
    TypedImage::from_vec_unchecked(extent, pixels)
}

impl Display for DynamicImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, image => Display::fmt(image, f))
    }
}
