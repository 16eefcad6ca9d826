use crate::access::{broadcast_strides, Value};
use crate::{Extent, ImageView, ImageViewMut, IndexError, IndexExpr, Selection, ShapeMismatchError};

macro_rules! image_view_impl {
    ($wrapper_name:ident<$view_trait:ident>) => {
        impl<'a, V: $view_trait> ImageView for $wrapper_name<'a, V> {
            type Pixel = V::Pixel;

            fn extent(&self) -> Extent {
                self.selection.extent()
            }

            fn get_pixel(&self, x: usize, y: usize, z: usize, c: usize) -> Option<Self::Pixel> {
                if !self.extent().contains(x, y, z, c) {
                    return None;
                }
                let (x, y, z, c) = self.selection.map(x, y, z, c);
                self.image_view.get_ref().get_pixel(x, y, z, c)
            }
        }

        impl<'a, V: $view_trait> $wrapper_name<'a, V> {
            /// Selected ranges of the wrapped image.
            pub fn selection(&self) -> &Selection {
                &self.selection
            }
        }
    };
}

enum View<'a, V: 'a> {
    Borrowed(&'a V),
    Owned(V),
}

impl<'a, V> View<'a, V> {
    fn get_ref(&self) -> &V {
        match self {
            Self::Borrowed(v_ref) => v_ref,
            Self::Owned(v_own) => v_own,
        }
    }
}

enum ViewMut<'a, V: 'a> {
    Borrowed(&'a mut V),
    Owned(V),
}

impl<'a, V> ViewMut<'a, V> {
    fn get_ref(&self) -> &V {
        match self {
            Self::Borrowed(v_ref) => v_ref,
            Self::Owned(v_own) => v_own,
        }
    }

    fn get_mut(&mut self) -> &mut V {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// It is a wrapper that provides [ImageView] for the selected part of wrapped image.
///
/// Pixels are not copied, the region reads them from the wrapped image.
pub struct ImageRegion<'a, V: ImageView + 'a> {
    image_view: View<'a, V>,
    selection: Selection,
}

/// It is a wrapper that provides [ImageView] and [ImageViewMut]
/// for the selected part of wrapped image.
pub struct ImageRegionMut<'a, V: ImageViewMut> {
    image_view: ViewMut<'a, V>,
    selection: Selection,
}

impl<'a, V: ImageView + 'a> ImageRegion<'a, V> {
    pub fn new(image_view: V, expr: impl Into<IndexExpr>) -> Result<Self, IndexError> {
        let selection = select(image_view.extent(), expr)?;
        Ok(Self {
            image_view: View::Owned(image_view),
            selection,
        })
    }

    pub fn from_ref(image_view: &'a V, expr: impl Into<IndexExpr>) -> Result<Self, IndexError> {
        let selection = select(image_view.extent(), expr)?;
        Ok(Self::from_selection(image_view, selection))
    }

    pub(crate) fn from_selection(image_view: &'a V, selection: Selection) -> Self {
        Self {
            image_view: View::Borrowed(image_view),
            selection,
        }
    }
}

impl<'a, V: ImageViewMut> ImageRegionMut<'a, V> {
    pub fn new(image_view: V, expr: impl Into<IndexExpr>) -> Result<Self, IndexError> {
        let selection = select(image_view.extent(), expr)?;
        Ok(Self {
            image_view: ViewMut::Owned(image_view),
            selection,
        })
    }

    pub fn from_ref(image_view: &'a mut V, expr: impl Into<IndexExpr>) -> Result<Self, IndexError> {
        let selection = select(image_view.extent(), expr)?;
        Ok(Self::from_selection(image_view, selection))
    }

    pub(crate) fn from_selection(image_view: &'a mut V, selection: Selection) -> Self {
        Self {
            image_view: ViewMut::Borrowed(image_view),
            selection,
        }
    }

    /// Stores the value into all pixels of the region.
    pub fn fill(&mut self, value: V::Pixel) {
        for (x, y, z, c) in self.extent().coords() {
            self.set_pixel(x, y, z, c, value);
        }
    }

    /// Copies the value into the region, broadcasting it like NumPy does.
    ///
    /// Nothing is changed if the shape of value is not compatible with
    /// the shape of the region.
    pub fn assign<'v>(
        &mut self,
        value: impl Into<Value<'v, V::Pixel>>,
    ) -> Result<(), ShapeMismatchError> {
        match value.into() {
            Value::Scalar(v) => self.fill(v),
            Value::Array(array) => {
                let [sc, sz, sy, sx] = broadcast_strides(array.shape(), self.selection.shape())?;
                let data = array.data();
                for (x, y, z, c) in self.extent().coords() {
                    let v = data[c * sc + z * sz + y * sy + x * sx];
                    self.set_pixel(x, y, z, c, v);
                }
            }
        }
        Ok(())
    }
}

image_view_impl!(ImageRegion<ImageView>);

image_view_impl!(ImageRegionMut<ImageViewMut>);

impl<'a, V: ImageViewMut> ImageViewMut for ImageRegionMut<'a, V> {
    fn set_pixel(&mut self, x: usize, y: usize, z: usize, c: usize, value: V::Pixel) -> bool {
        if !self.extent().contains(x, y, z, c) {
            return false;
        }
        let (x, y, z, c) = self.selection.map(x, y, z, c);
        self.image_view.get_mut().set_pixel(x, y, z, c, value)
    }
}

fn select(extent: Extent, expr: impl Into<IndexExpr>) -> Result<Selection, IndexError> {
    let (descriptor, _) = expr.into().translate()?;
    Ok(descriptor.resolve(extent)?.selection())
}
