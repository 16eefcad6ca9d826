//! Element-wise arithmetic.
//!
//! Values are computed in `f64` and converted back into the type of
//! pixels with saturation, so `200u8 + 100u8` gives `255`.
use crate::images::{DynamicImage, TypedImage};
use crate::pixels::Element;
use crate::{ArithmeticError, DifferentExtentsError, DifferentTypesOfPixelsError, ImageView};

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
}

impl Op {
    #[inline(always)]
    fn apply<P: Element>(self, a: P, b: P) -> P {
        let (a, b) = (a.to_f64(), b.to_f64());
        P::from_f64(match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::FloorDiv => (a / b).floor(),
        })
    }
}

fn apply_images<P: Element>(dst: &mut [P], src: &[P], op: Op) {
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            dst.par_iter_mut()
                .zip(src.par_iter())
                .for_each(|(d, &s)| *d = op.apply(*d, s));
        } else {
            dst.iter_mut()
                .zip(src)
                .for_each(|(d, &s)| *d = op.apply(*d, s));
        }
    }
}

fn apply_scalar<P: Element>(dst: &mut [P], value: P, op: Op) {
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            dst.par_iter_mut().for_each(|d| *d = op.apply(*d, value));
        } else {
            dst.iter_mut().for_each(|d| *d = op.apply(*d, value));
        }
    }
}

macro_rules! typed_ops {
    ($($name:ident, $scalar_name:ident => $op:ident;)+) => {
        impl<'a, P: Element> TypedImage<'a, P> {
            $(
                pub fn $name(&mut self, other: &TypedImage<'_, P>) -> Result<(), DifferentExtentsError> {
                    self.apply_image(other, Op::$op)
                }

                pub fn $scalar_name(&mut self, value: P) {
                    apply_scalar(self.pixels_mut(), value, Op::$op);
                }
            )+
        }

        impl DynamicImage {
            $(
                pub fn $name(&mut self, other: &DynamicImage) -> Result<(), ArithmeticError> {
                    self.apply_image(other, Op::$op)
                }

                /// The value is converted into the type of pixels first.
                pub fn $scalar_name(&mut self, value: f64) {
                    match self {
                        Self::U8(image) => image.$scalar_name(Element::from_f64(value)),
                        Self::U16(image) => image.$scalar_name(Element::from_f64(value)),
                        Self::U32(image) => image.$scalar_name(Element::from_f64(value)),
                        Self::F32(image) => image.$scalar_name(Element::from_f64(value)),
                        Self::F64(image) => image.$scalar_name(value),
                    }
                }
            )+
        }
    };
}

typed_ops! {
    add, add_scalar => Add;
    sub, sub_scalar => Sub;
    mul, mul_scalar => Mul;
    div, div_scalar => Div;
    floor_div, floor_div_scalar => FloorDiv;
}

impl<'a, P: Element> TypedImage<'a, P> {
    fn apply_image(&mut self, other: &TypedImage<'_, P>, op: Op) -> Result<(), DifferentExtentsError> {
        if self.extent() != other.extent() {
            return Err(DifferentExtentsError);
        }
        apply_images(self.pixels_mut(), other.pixels(), op);
        Ok(())
    }

    /// Returns `true` if both images have the same extent and pixels.
    pub fn equals(&self, other: &impl ImageView<Pixel = P>) -> bool {
        self.extent() == other.extent() && self.iter_pixels().eq(other.iter_pixels())
    }
}

impl DynamicImage {
    fn apply_image(&mut self, other: &DynamicImage, op: Op) -> Result<(), ArithmeticError> {
        match (self, other) {
            (Self::U8(dst), Self::U8(src)) => dst.apply_image(src, op)?,
            (Self::U16(dst), Self::U16(src)) => dst.apply_image(src, op)?,
            (Self::U32(dst), Self::U32(src)) => dst.apply_image(src, op)?,
            (Self::F32(dst), Self::F32(src)) => dst.apply_image(src, op)?,
            (Self::F64(dst), Self::F64(src)) => dst.apply_image(src, op)?,
            _ => return Err(DifferentTypesOfPixelsError.into()),
        }
        Ok(())
    }
}
