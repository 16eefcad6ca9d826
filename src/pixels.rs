//! Types of pixel values that can be stored in an image.
use std::fmt::{Debug, Display};
use std::mem::size_of;
use std::str::FromStr;

use bytemuck::Pod;
use num_traits::Num;

use crate::UnknownPixelTypeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelType {
    U8,
    U16,
    U32,
    #[default]
    F32,
    F64,
}

impl PixelType {
    pub const ALL: [PixelType; 5] = [Self::U8, Self::U16, Self::U32, Self::F32, Self::F64];

    /// Size of one pixel value in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelType {
    type Err = UnknownPixelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uint8" | "u8" => Ok(Self::U8),
            "uint16" | "u16" => Ok(Self::U16),
            "uint32" | "u32" => Ok(Self::U32),
            "float32" | "f32" => Ok(Self::F32),
            "float64" | "f64" => Ok(Self::F64),
            _ => Err(UnknownPixelTypeError(s.to_owned())),
        }
    }
}

/// Numeric type of one pixel value.
///
/// The trait is implemented for all types from [PixelType],
/// all generic code of the crate is instantiated with them.
pub trait Element:
    Copy + Default + Debug + Display + PartialEq + PartialOrd + Num + Pod + Send + Sync + 'static
{
    fn pixel_type() -> PixelType;

    fn size() -> usize {
        size_of::<Self>()
    }

    /// Converts a value with `as` semantic (saturating for integers).
    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! element_impl {
    ($type:tt, $pixel_type:expr) => {
        impl Element for $type {
            fn pixel_type() -> PixelType {
                $pixel_type
            }

            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                value as $type
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

element_impl!(u8, PixelType::U8);
element_impl!(u16, PixelType::U16);
element_impl!(u32, PixelType::U32);
element_impl!(f32, PixelType::F32);
element_impl!(f64, PixelType::F64);
