//! Translation of multi-axis index expressions.
//!
//! Callers list axes from the fastest-varying one (`x, y, z, c`), while
//! the pixels buffer is organized from the slowest-varying one
//! (`c, z, y, x`). [IndexExpr::translate] converts the former into a
//! [NormalizedDescriptor] in the latter order.
use std::fmt::{Display, Formatter};
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};
use std::str::FromStr;

use crate::{Axis, Extent, IndexError, IndexParseError, SelectorKind};

/// Maximal number of axes in an index expression.
pub const MAX_AXES: usize = 4;

/// Range selector with semantic of Python's `slice(start, stop, step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    pub const fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// Slice that covers the whole axis.
    pub const fn full() -> Self {
        Self::new(None, None, None)
    }

    pub const fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Slice `[index, index + 1)` that selects exactly one position.
    /// `-1` selects the last position, so its stop is left open.
    pub fn single(index: i64) -> Self {
        let stop = if index == -1 {
            None
        } else {
            index.checked_add(1)
        };
        Self::new(Some(index), stop, None)
    }

    /// Resolves the slice against an axis with given size.
    pub fn indices(&self, size: usize) -> Result<AxisRange, IndexError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(IndexError::ZeroSliceStep);
        }
        let size = i64::try_from(size).unwrap_or(i64::MAX);
        let (lower, upper) = if step > 0 { (0, size) } else { (-1, size - 1) };

        let clamp = |value: Option<i64>, default: i64| match value {
            None => default,
            Some(v) if v < 0 => v.saturating_add(size).max(lower),
            Some(v) => v.min(upper),
        };
        let start = clamp(self.start, if step > 0 { lower } else { upper });
        let stop = clamp(self.stop, if step > 0 { upper } else { lower });

        let len = if step > 0 && start < stop {
            (stop - start - 1) / step + 1
        } else if step < 0 && stop < start {
            (start - stop - 1) / step.saturating_neg() + 1
        } else {
            0
        };
        Ok(AxisRange {
            start,
            step,
            len: len as usize,
        })
    }
}

impl Display for Slice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str(":")?;
        if let Some(stop) = self.stop {
            write!(f, "{stop}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

/// Positions selected by a slice on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisRange {
    pub start: i64,
    pub step: i64,
    pub len: usize,
}

impl AxisRange {
    pub(crate) fn single(position: usize) -> Self {
        Self {
            start: position as i64,
            step: 1,
            len: 1,
        }
    }

    /// Position inside the axis of the `i`-th selected element.
    #[inline(always)]
    pub fn position(&self, i: usize) -> usize {
        debug_assert!(i < self.len);
        (self.start + i as i64 * self.step) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(|i| self.position(i))
    }
}

/// One axis of an index expression as it was received from a caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector {
    Int(i64),
    Slice(Slice),
    Float(f64),
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Slice(s) => write!(f, "{s}"),
            Self::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<Slice> for Selector {
    fn from(value: Slice) -> Self {
        Self::Slice(value)
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Self::Slice(Slice::full())
    }
}

impl From<f64> for Selector {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Selector {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

/// Values that don't fit into `i64` are saturated, so they stay
/// outside of any axis.
fn saturate<T: TryInto<i64>>(value: T) -> i64 {
    value.try_into().unwrap_or(i64::MAX)
}

fn inclusive_stop(end: i64) -> Option<i64> {
    if end == -1 {
        None
    } else {
        end.checked_add(1)
    }
}

macro_rules! selector_from_int {
    ($($int:ty),+) => {
        $(
            impl From<$int> for Selector {
                fn from(value: $int) -> Self {
                    Self::Int(saturate(value))
                }
            }

            impl From<Range<$int>> for Selector {
                fn from(value: Range<$int>) -> Self {
                    Self::Slice(Slice::new(
                        Some(saturate(value.start)),
                        Some(saturate(value.end)),
                        None,
                    ))
                }
            }

            impl From<RangeFrom<$int>> for Selector {
                fn from(value: RangeFrom<$int>) -> Self {
                    Self::Slice(Slice::new(Some(saturate(value.start)), None, None))
                }
            }

            impl From<RangeTo<$int>> for Selector {
                fn from(value: RangeTo<$int>) -> Self {
                    Self::Slice(Slice::new(None, Some(saturate(value.end)), None))
                }
            }

            impl From<RangeInclusive<$int>> for Selector {
                fn from(value: RangeInclusive<$int>) -> Self {
                    let (start, end) = value.into_inner();
                    Self::Slice(Slice::new(
                        Some(saturate(start)),
                        inclusive_stop(saturate(end)),
                        None,
                    ))
                }
            }

            impl From<RangeToInclusive<$int>> for Selector {
                fn from(value: RangeToInclusive<$int>) -> Self {
                    Self::Slice(Slice::new(None, inclusive_stop(saturate(value.end)), None))
                }
            }
        )+
    };
}

selector_from_int!(i32, i64, isize, usize);

/// Validated selector of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSpec {
    Index(i64),
    Range(Slice),
}

impl AxisSpec {
    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    pub fn as_index(&self) -> Option<i64> {
        match *self {
            Self::Index(i) => Some(i),
            Self::Range(_) => None,
        }
    }

    /// Integer is promoted to the slice of length 1.
    pub fn into_range(self) -> Slice {
        match self {
            Self::Index(i) => Slice::single(i),
            Self::Range(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Every axis addresses one position, result is one pixel value.
    Scalar,
    /// At least one axis is a range, result is a sub-image.
    View,
}

/// Index expression with exactly four axes in the backing-store
/// order `[c, z, y, x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedDescriptor {
    axes: [AxisSpec; MAX_AXES],
    /// Integers that were promoted to slices of a view.
    promoted: [Option<i64>; MAX_AXES],
}

impl NormalizedDescriptor {
    #[inline]
    pub fn axes(&self) -> &[AxisSpec; MAX_AXES] {
        &self.axes
    }

    /// Resolves the descriptor against the extent of a store.
    ///
    /// Integer axes must address a position inside the store, even if
    /// they were promoted to slices. Slices are clamped.
    pub fn resolve(&self, extent: Extent) -> Result<Resolved, IndexError> {
        let shape = extent.shape();
        if let [Some(c), Some(z), Some(y), Some(x)] = self.axes.map(|spec| spec.as_index()) {
            let mut coords = [0; MAX_AXES];
            for (k, index) in [c, z, y, x].into_iter().enumerate() {
                coords[k] = resolve_index(index, shape[k], Axis::STORE_ORDER[k])?;
            }
            return Ok(Resolved::Scalar(coords));
        }
        let mut ranges = [AxisRange::single(0); MAX_AXES];
        for (k, spec) in self.axes.iter().enumerate() {
            ranges[k] = match self.promoted[k] {
                Some(index) => {
                    AxisRange::single(resolve_index(index, shape[k], Axis::STORE_ORDER[k])?)
                }
                None => spec.into_range().indices(shape[k])?,
            };
        }
        Ok(Resolved::View(Selection { ranges }))
    }
}

fn resolve_index(index: i64, size: usize, axis: Axis) -> Result<usize, IndexError> {
    let out_of_range = IndexError::IndexOutOfRange { axis, index, size };
    let position = if index < 0 {
        let size = i64::try_from(size).map_err(|_| out_of_range)?;
        index + size
    } else {
        index
    };
    match usize::try_from(position) {
        Ok(position) if position < size => Ok(position),
        _ => Err(out_of_range),
    }
}

/// Descriptor resolved against the extent of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Coordinates in the order `[c, z, y, x]`.
    Scalar([usize; MAX_AXES]),
    View(Selection),
}

impl Resolved {
    pub fn mode(&self) -> AccessMode {
        match self {
            Self::Scalar(_) => AccessMode::Scalar,
            Self::View(_) => AccessMode::View,
        }
    }

    /// Selection covering the same pixels.
    pub fn selection(&self) -> Selection {
        match *self {
            Self::Scalar(coords) => Selection {
                ranges: coords.map(AxisRange::single),
            },
            Self::View(selection) => selection,
        }
    }
}

/// Resolved ranges of all four axes in the order `[c, z, y, x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    ranges: [AxisRange; MAX_AXES],
}

impl Selection {
    pub fn full(extent: Extent) -> Self {
        let ranges = extent.shape().map(|len| AxisRange {
            start: 0,
            step: 1,
            len,
        });
        Self { ranges }
    }

    #[inline]
    pub fn ranges(&self) -> &[AxisRange; MAX_AXES] {
        &self.ranges
    }

    /// Sizes of the selection in the order `[c, z, y, x]`.
    pub fn shape(&self) -> [usize; MAX_AXES] {
        self.ranges.map(|r| r.len)
    }

    pub fn extent(&self) -> Extent {
        Extent::from_shape(self.shape())
    }

    /// Maps coordinates inside the selection into coordinates of the store.
    #[inline(always)]
    pub fn map(&self, x: usize, y: usize, z: usize, c: usize) -> (usize, usize, usize, usize) {
        let [rc, rz, ry, rx] = &self.ranges;
        (
            rx.position(x),
            ry.position(y),
            rz.position(z),
            rc.position(c),
        )
    }
}

/// Index expression as a sequence of selectors in the order `x, y, z, c`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexExpr(Vec<Selector>);

impl IndexExpr {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the expression into the normalized descriptor.
    ///
    /// If any axis is a slice, the access is [AccessMode::View]:
    /// integers are promoted to slices of length 1 and missing axes
    /// are filled with full slices. Promoted integers are still
    /// bounds-checked by [NormalizedDescriptor::resolve]. Otherwise, the access is
    /// [AccessMode::Scalar] and missing axes are filled with `0`.
    /// In both cases the order of axes is reversed.
    pub fn translate(&self) -> Result<(NormalizedDescriptor, AccessMode), IndexError> {
        let count = self.0.len();
        if count == 0 || count > MAX_AXES {
            return Err(IndexError::InvalidIndexArity(count));
        }

        let mut specs = [AxisSpec::Index(0); MAX_AXES];
        for (position, selector) in self.0.iter().enumerate() {
            specs[position] = match *selector {
                Selector::Int(i) => AxisSpec::Index(i),
                Selector::Slice(s) => AxisSpec::Range(s),
                Selector::Float(_) => {
                    return Err(IndexError::InvalidIndexType {
                        position,
                        found: SelectorKind::Float,
                    })
                }
            };
        }

        let mut promoted = [None; MAX_AXES];
        let mode = if specs[..count].iter().any(AxisSpec::is_range) {
            for (spec, index) in specs.iter_mut().zip(promoted.iter_mut()) {
                *index = spec.as_index();
                *spec = AxisSpec::Range(spec.into_range());
            }
            for (spec, index) in specs[count..].iter_mut().zip(promoted[count..].iter_mut()) {
                *spec = AxisSpec::Range(Slice::full());
                *index = None;
            }
            AccessMode::View
        } else {
            AccessMode::Scalar
        };

        specs.reverse();
        promoted.reverse();
        let descriptor = NormalizedDescriptor {
            axes: specs,
            promoted,
        };
        Ok((descriptor, mode))
    }
}

/// Shortcut for [IndexExpr::translate].
pub fn translate(
    expr: impl Into<IndexExpr>,
) -> Result<(NormalizedDescriptor, AccessMode), IndexError> {
    expr.into().translate()
}

impl Display for IndexExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl From<Vec<Selector>> for IndexExpr {
    fn from(value: Vec<Selector>) -> Self {
        Self(value)
    }
}

impl From<&[Selector]> for IndexExpr {
    fn from(value: &[Selector]) -> Self {
        Self(value.to_vec())
    }
}

impl From<&IndexExpr> for IndexExpr {
    fn from(value: &IndexExpr) -> Self {
        value.clone()
    }
}

macro_rules! expr_from_single {
    ($($type:ty),+) => {
        $(
            impl From<$type> for IndexExpr {
                fn from(value: $type) -> Self {
                    Self(vec![value.into()])
                }
            }
        )+
    };
}

expr_from_single!(Selector, Slice, RangeFull, f32, f64);

macro_rules! expr_from_single_int {
    ($($int:ty),+) => {
        $(
            expr_from_single!(
                $int,
                Range<$int>,
                RangeFrom<$int>,
                RangeTo<$int>,
                RangeInclusive<$int>,
                RangeToInclusive<$int>
            );
        )+
    };
}

expr_from_single_int!(i32, i64, isize, usize);

macro_rules! expr_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Selector>),+> From<($($name,)+)> for IndexExpr {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Self(vec![$($name.into()),+])
            }
        }
    };
}

expr_from_tuple!(A);
expr_from_tuple!(A, B);
expr_from_tuple!(A, B, C);
expr_from_tuple!(A, B, C, D);
expr_from_tuple!(A, B, C, D, E);
expr_from_tuple!(A, B, C, D, E, F);

/// Builds [IndexExpr] from a list of integers and ranges.
///
/// ```
/// use image4d::{index, AccessMode};
///
/// let (_, mode) = index![1.., 0].translate().unwrap();
/// assert_eq!(mode, AccessMode::View);
/// ```
#[macro_export]
macro_rules! index {
    ($($selector:expr),+ $(,)?) => {
        $crate::IndexExpr::new(vec![$($crate::Selector::from($selector)),+])
    };
}

impl FromStr for IndexExpr {
    type Err = IndexParseError;

    /// Parses expressions like `"1:, :"`, `"0, 3"` or `"::-1, 2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = [('[', ']'), ('(', ')')]
            .into_iter()
            .find_map(|(open, close)| s.strip_prefix(open)?.strip_suffix(close))
            .unwrap_or(s);
        if s.trim().is_empty() {
            return Err(IndexParseError::Empty);
        }
        let mut parts: Vec<&str> = s.split(',').map(str::trim).collect();
        // "0," is an expression with one axis
        if parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        parts
            .into_iter()
            .map(parse_selector)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

fn parse_selector(part: &str) -> Result<Selector, IndexParseError> {
    if part.contains(':') {
        let bounds: Vec<&str> = part.split(':').map(str::trim).collect();
        if bounds.len() > 3 {
            return Err(IndexParseError::TooManySliceParts(part.to_owned()));
        }
        let bound = |i: usize| -> Result<Option<i64>, IndexParseError> {
            match bounds.get(i) {
                None | Some(&"") => Ok(None),
                Some(v) => v
                    .parse()
                    .map(Some)
                    .map_err(|_| IndexParseError::InvalidNumber((*v).to_owned())),
            }
        };
        return Ok(Selector::Slice(Slice::new(bound(0)?, bound(1)?, bound(2)?)));
    }
    if let Ok(v) = part.parse::<i64>() {
        return Ok(Selector::Int(v));
    }
    match part.parse::<f64>() {
        Ok(v) => Ok(Selector::Float(v)),
        Err(_) => Err(IndexParseError::InvalidNumber(part.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(slice: Slice, size: usize) -> Vec<usize> {
        let range = slice.indices(size).unwrap();
        range.iter().collect()
    }

    #[test]
    fn slice_indices_like_python() {
        assert_eq!(indices(Slice::full(), 4), [0, 1, 2, 3]);
        assert_eq!(indices(Slice::new(Some(1), None, None), 4), [1, 2, 3]);
        assert_eq!(indices(Slice::new(None, Some(-1), None), 4), [0, 1, 2]);
        assert_eq!(indices(Slice::new(Some(-2), None, None), 4), [2, 3]);
        assert_eq!(indices(Slice::new(Some(-10), Some(10), None), 4), [0, 1, 2, 3]);
        assert_eq!(indices(Slice::full().with_step(2), 5), [0, 2, 4]);
        assert_eq!(indices(Slice::full().with_step(-1), 4), [3, 2, 1, 0]);
        assert_eq!(indices(Slice::new(Some(2), None, Some(-2)), 4), [2, 0]);
        assert_eq!(indices(Slice::new(Some(3), Some(1), None), 4), Vec::<usize>::new());
        assert_eq!(indices(Slice::new(Some(7), None, None), 4), Vec::<usize>::new());
        assert_eq!(indices(Slice::full().with_step(-1), 0), Vec::<usize>::new());
    }

    #[test]
    fn zero_step() {
        let res = Slice::full().with_step(0).indices(3);
        assert_eq!(res.unwrap_err(), IndexError::ZeroSliceStep);
    }

    #[test]
    fn single_position_slices() {
        assert_eq!(indices(Slice::single(2), 4), [2]);
        assert_eq!(indices(Slice::single(-1), 4), [3]);
        assert_eq!(indices(Slice::single(-2), 4), [2]);
        assert_eq!(indices(Slice::single(i64::MAX), 4), Vec::<usize>::new());
    }

    #[test]
    fn negative_scalar_index() {
        assert_eq!(resolve_index(-1, 3, Axis::X), Ok(2));
        assert_eq!(
            resolve_index(-4, 3, Axis::Y),
            Err(IndexError::IndexOutOfRange {
                axis: Axis::Y,
                index: -4,
                size: 3
            })
        );
    }
}
