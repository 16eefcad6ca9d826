#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use access::{read, region, region_mut, write, Access, ArrayRef, Value};
pub use errors::*;
pub use extent::{Axis, Extent};
pub use image_view::{ImageView, ImageViewMut};
pub use images::*;
pub use index::{
    translate, AccessMode, AxisRange, AxisSpec, IndexExpr, NormalizedDescriptor, Resolved,
    Selection, Selector, Slice, MAX_AXES,
};
pub use pixels::{Element, PixelType};

mod access;
mod arithmetic;
mod errors;
mod extent;
mod image_view;
mod images;
mod index;
pub mod pixels;
