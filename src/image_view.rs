use crate::images::{ImageRegion, ImageRegionMut, TypedImage};
use crate::pixels::Element;
use crate::{Access, AccessError, Extent, IndexExpr, Value};

/// A trait for getting access to pixels of a four-axis image.
pub trait ImageView {
    type Pixel: Element;

    fn extent(&self) -> Extent;

    /// Returns the value at given coordinates or `None`
    /// if coordinates are out of the image boundaries.
    fn get_pixel(&self, x: usize, y: usize, z: usize, c: usize) -> Option<Self::Pixel>;

    fn width(&self) -> usize {
        self.extent().width
    }

    fn height(&self) -> usize {
        self.extent().height
    }

    fn depth(&self) -> usize {
        self.extent().depth
    }

    fn spectrum(&self) -> usize {
        self.extent().spectrum
    }

    /// Iterates over all values of the image, `x` changes fastest
    /// and `c` slowest.
    fn iter_pixels(&self) -> impl Iterator<Item = Self::Pixel> + '_ {
        self.extent()
            .coords()
            .filter_map(move |(x, y, z, c)| self.get_pixel(x, y, z, c))
    }

    /// Copies pixels into a new independent image.
    fn to_image(&self) -> TypedImage<'static, Self::Pixel> {
        let pixels: Vec<Self::Pixel> = self.iter_pixels().collect();
        TypedImage::from_vec_unchecked(self.extent(), pixels)
    }

    /// Returns one value or an independent copy of the selected part of the image.
    fn read(&self, expr: impl Into<IndexExpr>) -> Result<Access<Self::Pixel>, AccessError>
    where
        Self: Sized,
    {
        crate::read(self, expr)
    }

    /// Returns a view that shares pixels with the image.
    fn region(&self, expr: impl Into<IndexExpr>) -> Result<ImageRegion<'_, Self>, AccessError>
    where
        Self: Sized,
    {
        crate::region(self, expr)
    }
}

/// A trait for getting mutable access to pixels of a four-axis image.
pub trait ImageViewMut: ImageView {
    /// Stores the value at given coordinates.
    /// Returns `false` if coordinates are out of the image boundaries.
    fn set_pixel(&mut self, x: usize, y: usize, z: usize, c: usize, value: Self::Pixel) -> bool;

    fn write<'v>(
        &mut self,
        expr: impl Into<IndexExpr>,
        value: impl Into<Value<'v, Self::Pixel>>,
    ) -> Result<(), AccessError>
    where
        Self: Sized,
    {
        crate::write(self, expr, value)
    }

    fn region_mut(
        &mut self,
        expr: impl Into<IndexExpr>,
    ) -> Result<ImageRegionMut<'_, Self>, AccessError>
    where
        Self: Sized,
    {
        crate::region_mut(self, expr)
    }
}
