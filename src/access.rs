//! Reading and writing pixels through index expressions.
use crate::images::{array_extent, ImageRegion, ImageRegionMut, TypedImage};
use crate::pixels::Element;
use crate::{
    AccessError, AccessMode, ArrayError, Axis, Extent, ImageView, ImageViewMut, IndexError,
    IndexExpr, Resolved, ShapeMismatchError, MAX_AXES,
};

/// Result of reading an image through an index expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Access<P: Element> {
    Scalar(P),
    /// Independent copy of the selected part of the image.
    View(TypedImage<'static, P>),
}

impl<P: Element> Access<P> {
    pub fn mode(&self) -> AccessMode {
        match self {
            Self::Scalar(_) => AccessMode::Scalar,
            Self::View(_) => AccessMode::View,
        }
    }

    pub fn scalar(&self) -> Option<P> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::View(_) => None,
        }
    }

    pub fn into_view(self) -> Option<TypedImage<'static, P>> {
        match self {
            Self::Scalar(_) => None,
            Self::View(image) => Some(image),
        }
    }
}

/// Array-like value with row-major shape (the slowest-varying axis first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayRef<'a, P> {
    shape: [usize; MAX_AXES],
    data: &'a [P],
}

impl<'a, P: Element> ArrayRef<'a, P> {
    /// Shape may have less than 4 dimensions, it is padded by ones from the left.
    /// Length of `data` must be equal to the product of `shape`.
    pub fn new(shape: &[usize], data: &'a [P]) -> Result<Self, ArrayError> {
        let shape = array_extent(shape, data.len())?.shape();
        Ok(Self { shape, data })
    }

    /// Shape padded to 4 dimensions.
    pub fn shape(&self) -> [usize; MAX_AXES] {
        self.shape
    }

    pub fn data(&self) -> &'a [P] {
        self.data
    }
}

impl<'a, 'b: 'a, P: Element> From<&'a TypedImage<'b, P>> for ArrayRef<'a, P> {
    fn from(image: &'a TypedImage<'b, P>) -> Self {
        Self {
            shape: image.shape(),
            data: image.pixels(),
        }
    }
}

/// Right-hand side of [write].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a, P> {
    Scalar(P),
    Array(ArrayRef<'a, P>),
}

impl<'a, P: Element> From<P> for Value<'a, P> {
    fn from(value: P) -> Self {
        Self::Scalar(value)
    }
}

impl<'a, P: Element> From<ArrayRef<'a, P>> for Value<'a, P> {
    fn from(value: ArrayRef<'a, P>) -> Self {
        Self::Array(value)
    }
}

impl<'a, 'b: 'a, P: Element> From<&'a TypedImage<'b, P>> for Value<'a, P> {
    fn from(image: &'a TypedImage<'b, P>) -> Self {
        Self::Array(image.into())
    }
}

impl<'a, P: Element> From<&'a Access<P>> for Value<'a, P> {
    fn from(access: &'a Access<P>) -> Self {
        match access {
            Access::Scalar(v) => Self::Scalar(*v),
            Access::View(image) => image.into(),
        }
    }
}

/// Returns strides of value's buffer to walk over the selection.
///
/// Axes of value with size 1 are repeated (stride 0), all other axes
/// must have the same size as the selection.
pub(crate) fn broadcast_strides(
    value: [usize; MAX_AXES],
    selection: [usize; MAX_AXES],
) -> Result<[usize; MAX_AXES], ShapeMismatchError> {
    let mut strides = [0; MAX_AXES];
    let mut stride = 1;
    for k in (0..MAX_AXES).rev() {
        strides[k] = if value[k] == selection[k] {
            stride
        } else if value[k] == 1 {
            0
        } else {
            return Err(ShapeMismatchError { value, selection });
        };
        stride *= value[k];
    }
    Ok(strides)
}

fn resolve(extent: Extent, expr: impl Into<IndexExpr>) -> Result<Resolved, AccessError> {
    let (descriptor, _) = expr.into().translate()?;
    Ok(descriptor.resolve(extent)?)
}

/// Reads one value or copies the selected part of `store`.
///
/// An expression with integers only returns [Access::Scalar], an
/// expression with at least one range returns [Access::View] with
/// an independent copy of pixels.
pub fn read<V: ImageView>(
    store: &V,
    expr: impl Into<IndexExpr>,
) -> Result<Access<V::Pixel>, AccessError> {
    match resolve(store.extent(), expr)? {
        Resolved::Scalar([c, z, y, x]) => match store.get_pixel(x, y, z, c) {
            Some(v) => Ok(Access::Scalar(v)),
            // The store is smaller than its extent claims.
            None => Err(IndexError::IndexOutOfRange {
                axis: Axis::X,
                index: x as i64,
                size: store.width(),
            }
            .into()),
        },
        Resolved::View(selection) => {
            let region = ImageRegion::from_selection(store, selection);
            Ok(Access::View(region.to_image()))
        }
    }
}

/// Returns a view on the selected part of `store` without copying of pixels.
pub fn region<V: ImageView>(
    store: &V,
    expr: impl Into<IndexExpr>,
) -> Result<ImageRegion<'_, V>, AccessError> {
    let selection = resolve(store.extent(), expr)?.selection();
    Ok(ImageRegion::from_selection(store, selection))
}

/// Returns a mutable view on the selected part of `store`.
pub fn region_mut<V: ImageViewMut>(
    store: &mut V,
    expr: impl Into<IndexExpr>,
) -> Result<ImageRegionMut<'_, V>, AccessError> {
    let selection = resolve(store.extent(), expr)?.selection();
    Ok(ImageRegionMut::from_selection(store, selection))
}

/// Stores `value` into the selected part of `store`.
///
/// All checks are done before the first pixel is changed.
pub fn write<'v, V: ImageViewMut>(
    store: &mut V,
    expr: impl Into<IndexExpr>,
    value: impl Into<Value<'v, V::Pixel>>,
) -> Result<(), AccessError> {
    let selection = resolve(store.extent(), expr)?.selection();
    let mut region = ImageRegionMut::from_selection(store, selection);
    region.assign(value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_of_same_shape() {
        let strides = broadcast_strides([1, 1, 3, 4], [1, 1, 3, 4]).unwrap();
        assert_eq!(strides, [12, 12, 4, 1]);
    }

    #[test]
    fn strides_of_row_and_column() {
        assert_eq!(
            broadcast_strides([1, 1, 1, 4], [1, 1, 3, 4]).unwrap(),
            [4, 4, 0, 1]
        );
        assert_eq!(
            broadcast_strides([1, 1, 3, 1], [1, 1, 3, 4]).unwrap(),
            [3, 3, 1, 0]
        );
    }

    #[test]
    fn strides_of_incompatible_shapes() {
        let err = broadcast_strides([1, 1, 2, 2], [1, 1, 3, 3]).unwrap_err();
        assert_eq!(err.value, [1, 1, 2, 2]);
        assert_eq!(err.selection, [1, 1, 3, 3]);
        assert!(broadcast_strides([1, 1, 1, 2], [1, 1, 1, 1]).is_err());
    }
}
