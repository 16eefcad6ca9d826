use std::fmt::{Display, Formatter};

/// One of the four image axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    C,
}

impl Axis {
    /// Axes in the backing-store order (slowest-varying first).
    pub const STORE_ORDER: [Axis; 4] = [Self::C, Self::Z, Self::Y, Self::X];
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::C => "c",
        };
        f.write_str(name)
    }
}

/// Size of an image along each of its four axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub spectrum: usize,
}

impl Extent {
    pub const fn new(width: usize, height: usize, depth: usize, spectrum: usize) -> Self {
        Self {
            width,
            height,
            depth,
            spectrum,
        }
    }

    /// Extent of a single-channel 2D image.
    pub const fn plane(width: usize, height: usize) -> Self {
        Self::new(width, height, 1, 1)
    }

    /// Creates extent from sizes in the backing-store order `[c, z, y, x]`.
    pub const fn from_shape(shape: [usize; 4]) -> Self {
        Self::new(shape[3], shape[2], shape[1], shape[0])
    }

    /// Sizes in the backing-store order `[c, z, y, x]`.
    #[inline]
    pub const fn shape(&self) -> [usize; 4] {
        [self.spectrum, self.depth, self.height, self.width]
    }

    /// Total number of pixel values.
    ///
    /// Panics on overflow, see [Extent::checked_size].
    #[inline]
    pub const fn size(&self) -> usize {
        self.width * self.height * self.depth * self.spectrum
    }

    /// Total number of pixel values or `None` if it overflows `usize`.
    pub fn checked_size(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.depth)?
            .checked_mul(self.spectrum)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0 || self.spectrum == 0
    }

    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
            Axis::C => self.spectrum,
        }
    }

    /// Iterates over all coordinates `(x, y, z, c)` in the buffer order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize, usize, usize)> {
        let Self {
            width,
            height,
            depth,
            spectrum,
        } = *self;
        (0..spectrum).flat_map(move |c| {
            (0..depth).flat_map(move |z| {
                (0..height).flat_map(move |y| (0..width).map(move |x| (x, y, z, c)))
            })
        })
    }

    /// Position of the value in the linear buffer.
    #[inline(always)]
    pub(crate) fn offset(&self, x: usize, y: usize, z: usize, c: usize) -> usize {
        x + self.width * (y + self.height * (z + self.depth * c))
    }

    #[inline(always)]
    pub(crate) fn contains(&self, x: usize, y: usize, z: usize, c: usize) -> bool {
        x < self.width && y < self.height && z < self.depth && c < self.spectrum
    }
}

impl Display for Extent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{}x{}",
            self.width, self.height, self.depth, self.spectrum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_is_reversed() {
        let extent = Extent::new(4, 3, 2, 1);
        assert_eq!(extent.shape(), [1, 2, 3, 4]);
        assert_eq!(Extent::from_shape(extent.shape()), extent);
        assert_eq!(extent.size(), 24);
    }

    #[test]
    fn size_overflow() {
        let extent = Extent::new(usize::MAX, 2, 1, 1);
        assert_eq!(extent.checked_size(), None);
        assert!(!extent.is_empty());
        assert!(Extent::new(usize::MAX, 0, 2, 1).is_empty());
        assert_eq!(Extent::new(4, 3, 2, 1).checked_size(), Some(24));
    }

    #[test]
    fn offsets_follow_x_fastest() {
        let extent = Extent::new(4, 3, 2, 2);
        assert_eq!(extent.offset(1, 0, 0, 0), 1);
        assert_eq!(extent.offset(0, 1, 0, 0), 4);
        assert_eq!(extent.offset(0, 0, 1, 0), 12);
        assert_eq!(extent.offset(0, 0, 0, 1), 24);
        assert_eq!(extent.offset(3, 2, 1, 1), 47);
    }

    #[test]
    fn coords_follow_offsets() {
        let extent = Extent::new(3, 2, 2, 2);
        let offsets: Vec<usize> = extent
            .coords()
            .map(|(x, y, z, c)| extent.offset(x, y, z, c))
            .collect();
        assert_eq!(offsets, (0..extent.size()).collect::<Vec<_>>());
    }
}
