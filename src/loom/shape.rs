//! Compile-time shapes.
//!
//! A shape is a zero-sized marker type such as `Rank2<3, 4>` whose extents are const generic
//! parameters. The shape picks the storage of a tensor: a nested array that is contiguous and
//! row-major, so `Rank2<3, 4>` stores `[[T; 4]; 3]`.

use std::{fmt::Debug, hash::Hash};

use super::tensor::TensorError;

/// Returns the number of elements of a shape: the product of its extents, at least 1.
pub const fn size(extents: &[usize]) -> usize {
    let mut size = 1;
    let mut axis = 0;
    while axis < extents.len() {
        size *= extents[axis];
        axis += 1;
    }
    if size == 0 { 1 } else { size }
}

/// Returns `true` if no extent is zero.
pub const fn is_valid(extents: &[usize]) -> bool {
    let mut axis = 0;
    while axis < extents.len() {
        if extents[axis] == 0 {
            return false;
        }
        axis += 1;
    }
    true
}

/// Returns `true` if two extent lists are identical.
pub const fn same(x: &[usize], y: &[usize]) -> bool {
    if x.len() != y.len() {
        return false;
    }
    let mut axis = 0;
    while axis < x.len() {
        if x[axis] != y[axis] {
            return false;
        }
        axis += 1;
    }
    true
}

/// Resolves a row-major multi-index to a linear offset.
///
/// `indices` may be shorter than `extents`; the missing trailing coordinates count as zero, so a
/// partial index resolves to the first element of the sub-tensor it names. Coordinates are not
/// checked against their extents.
pub const fn offset(extents: &[usize], indices: &[usize]) -> usize {
    let mut offset = 0;
    let mut axis = 0;
    while axis < extents.len() {
        let index = if axis < indices.len() { indices[axis] } else { 0 };
        offset = offset * extents[axis] + index;
        axis += 1;
    }
    offset
}

/// Like [`offset`], but validates the number of coordinates and each coordinate.
pub fn checked_offset(extents: &[usize], indices: &[usize]) -> Result<usize, TensorError> {
    if indices.len() > extents.len() {
        return Err(TensorError::Rank(indices.len(), extents.len()));
    }
    let invalid = indices
        .iter()
        .zip(extents.iter())
        .enumerate()
        .find(|(_, (index, extent))| index >= extent);
    match invalid {
        Some((axis, (&index, &extent))) => Err(TensorError::Axis {
            axis,
            index,
            extent,
        }),
        None => Ok(offset(extents, indices)),
    }
}

pub trait Shape: Debug + Default + Clone + Copy + PartialEq + Eq + Hash + Send + Sync + 'static {
    /// Extents of each axis, outermost first.
    const EXTENTS: &'static [usize];
    /// Number of axes.
    const RANK: usize = Self::EXTENTS.len();
    /// Number of elements.
    const SIZE: usize = size(Self::EXTENTS);

    /// Contiguous storage for [`Self::SIZE`] elements of type `T`.
    type Buffer<T>;

    /// Builds a buffer by calling `f` with each linear offset in order.
    fn from_fn<T>(f: impl FnMut(usize) -> T) -> Self::Buffer<T>;

    fn flatten<T>(buffer: &Self::Buffer<T>) -> &[T];

    fn flatten_mut<T>(buffer: &mut Self::Buffer<T>) -> &mut [T];
}

/// Shapes whose leading `K` axes can be indexed away, leaving [`Split::Tail`].
pub trait Split<const K: usize>: Shape {
    type Tail: Shape;
}

/// The shape of a single element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rank0;

impl Shape for Rank0 {
    const EXTENTS: &'static [usize] = &[];

    type Buffer<T> = [T; 1];

    #[inline]
    fn from_fn<T>(mut f: impl FnMut(usize) -> T) -> Self::Buffer<T> {
        [f(0)]
    }

    #[inline]
    fn flatten<T>(buffer: &Self::Buffer<T>) -> &[T] {
        buffer
    }

    #[inline]
    fn flatten_mut<T>(buffer: &mut Self::Buffer<T>) -> &mut [T] {
        buffer
    }
}

macro_rules! nest {
    ($t:ty; $last:ident) => { [$t; $last] };
    ($t:ty; $head:ident, $($tail:ident),+) => { [nest!($t; $($tail),+); $head] };
}

macro_rules! build {
    ($f:ident, $base:expr; $last:ident) => {
        ::std::array::from_fn(|index| $f($base + index))
    };
    ($f:ident, $base:expr; $head:ident, $next:ident $(, $tail:ident)*) => {
        ::std::array::from_fn(|index| build!($f, ($base + index) * $next; $next $(, $tail)*))
    };
}

macro_rules! flatten {
    ($buffer:expr; $last:ident) => { &$buffer[..] };
    ($buffer:expr; $head:ident, $($tail:ident),+) => { flatten!($buffer.as_flattened(); $($tail),+) };
}

macro_rules! flatten_mut {
    ($buffer:expr; $last:ident) => { &mut $buffer[..] };
    ($buffer:expr; $head:ident, $($tail:ident),+) => { flatten_mut!($buffer.as_flattened_mut(); $($tail),+) };
}

macro_rules! impl_shape {
    ($(#[$attr:meta])* $name:ident<$($dim:ident),+>) => {
        $(#[$attr])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name<$(const $dim: usize),+>;

        impl<$(const $dim: usize),+> Shape for $name<$($dim),+> {
            const EXTENTS: &'static [usize] = &[$($dim),+];

            type Buffer<T> = nest!(T; $($dim),+);

            #[inline]
            fn from_fn<T>(mut f: impl FnMut(usize) -> T) -> Self::Buffer<T> {
                build!(f, 0; $($dim),+)
            }

            #[inline]
            fn flatten<T>(buffer: &Self::Buffer<T>) -> &[T] {
                flatten!(buffer; $($dim),+)
            }

            #[inline]
            fn flatten_mut<T>(buffer: &mut Self::Buffer<T>) -> &mut [T] {
                flatten_mut!(buffer; $($dim),+)
            }
        }
    };
}

impl_shape!(
    /// A vector of `N0` elements.
    Rank1<N0>
);
impl_shape!(
    /// A matrix of `N0` rows and `N1` columns.
    Rank2<N0, N1>
);
impl_shape!(Rank3<N0, N1, N2>);
impl_shape!(Rank4<N0, N1, N2, N3>);
impl_shape!(Rank5<N0, N1, N2, N3, N4>);
impl_shape!(Rank6<N0, N1, N2, N3, N4, N5>);

impl Split<0> for Rank0 {
    type Tail = Rank0;
}

macro_rules! impl_split {
    ($shape:ident<$($dim:ident),+>, $k:literal => $tail:ty) => {
        impl<$(const $dim: usize),+> Split<$k> for $shape<$($dim),+> {
            type Tail = $tail;
        }
    };
}

impl_split!(Rank1<N0>, 0 => Rank1<N0>);
impl_split!(Rank1<N0>, 1 => Rank0);

impl_split!(Rank2<N0, N1>, 0 => Rank2<N0, N1>);
impl_split!(Rank2<N0, N1>, 1 => Rank1<N1>);
impl_split!(Rank2<N0, N1>, 2 => Rank0);

impl_split!(Rank3<N0, N1, N2>, 0 => Rank3<N0, N1, N2>);
impl_split!(Rank3<N0, N1, N2>, 1 => Rank2<N1, N2>);
impl_split!(Rank3<N0, N1, N2>, 2 => Rank1<N2>);
impl_split!(Rank3<N0, N1, N2>, 3 => Rank0);

impl_split!(Rank4<N0, N1, N2, N3>, 0 => Rank4<N0, N1, N2, N3>);
impl_split!(Rank4<N0, N1, N2, N3>, 1 => Rank3<N1, N2, N3>);
impl_split!(Rank4<N0, N1, N2, N3>, 2 => Rank2<N2, N3>);
impl_split!(Rank4<N0, N1, N2, N3>, 3 => Rank1<N3>);
impl_split!(Rank4<N0, N1, N2, N3>, 4 => Rank0);

impl_split!(Rank5<N0, N1, N2, N3, N4>, 0 => Rank5<N0, N1, N2, N3, N4>);
impl_split!(Rank5<N0, N1, N2, N3, N4>, 1 => Rank4<N1, N2, N3, N4>);
impl_split!(Rank5<N0, N1, N2, N3, N4>, 2 => Rank3<N2, N3, N4>);
impl_split!(Rank5<N0, N1, N2, N3, N4>, 3 => Rank2<N3, N4>);
impl_split!(Rank5<N0, N1, N2, N3, N4>, 4 => Rank1<N4>);
impl_split!(Rank5<N0, N1, N2, N3, N4>, 5 => Rank0);

impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 0 => Rank6<N0, N1, N2, N3, N4, N5>);
impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 1 => Rank5<N1, N2, N3, N4, N5>);
impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 2 => Rank4<N2, N3, N4, N5>);
impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 3 => Rank3<N3, N4, N5>);
impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 4 => Rank2<N4, N5>);
impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 5 => Rank1<N5>);
impl_split!(Rank6<N0, N1, N2, N3, N4, N5>, 6 => Rank0);

#[cfg(test)]
mod tests {
    use super::{Rank0, Rank1, Rank2, Rank3, Rank6, Shape, checked_offset, offset, size};
    use crate::loom::tensor::TensorError;

    #[test]
    fn test_size() {
        assert_eq!(size(&[]), 1);
        assert_eq!(size(&[4]), 4);
        assert_eq!(size(&[2, 3, 4]), 24);

        assert_eq!(Rank0::RANK, 0);
        assert_eq!(Rank0::SIZE, 1);
        assert_eq!(Rank1::<5>::SIZE, 5);
        assert_eq!(Rank3::<2, 3, 4>::RANK, 3);
        assert_eq!(Rank3::<2, 3, 4>::SIZE, 24);
        assert_eq!(Rank3::<2, 3, 4>::EXTENTS, &[2, 3, 4]);
        assert_eq!(Rank6::<1, 2, 1, 2, 1, 2>::SIZE, 8);
    }

    #[test]
    fn test_offset() {
        let extents = Rank3::<2, 3, 4>::EXTENTS;
        assert_eq!(offset(extents, &[]), 0);
        assert_eq!(offset(extents, &[1]), 12);
        assert_eq!(offset(extents, &[1, 2]), 20);
        assert_eq!(offset(extents, &[1, 2, 3]), 23);
        assert_eq!(offset(extents, &[0, 1, 1]), 5);

        for i in 0..3 {
            for j in 0..5 {
                assert_eq!(offset(&[3, 5], &[i, j]), i * 5 + j);
            }
            assert_eq!(offset(&[3, 5], &[i]), i * 5);
        }

        const OFFSET: usize = offset(Rank2::<2, 3>::EXTENTS, &[1, 1]);
        assert_eq!(OFFSET, 4);
    }

    #[test]
    fn test_checked_offset() {
        let extents = Rank2::<2, 3>::EXTENTS;
        assert_eq!(checked_offset(extents, &[1, 2]), Ok(5));
        assert_eq!(checked_offset(extents, &[1]), Ok(3));
        assert_eq!(
            checked_offset(extents, &[0, 3]),
            Err(TensorError::Axis {
                axis: 1,
                index: 3,
                extent: 3
            })
        );
        assert_eq!(
            checked_offset(extents, &[0, 0, 0]),
            Err(TensorError::Rank(3, 2))
        );
    }

    #[test]
    fn test_buffer_layout() {
        let buffer = Rank2::<2, 3>::from_fn(|index| index * 10);
        assert_eq!(buffer, [[0, 10, 20], [30, 40, 50]]);
        assert_eq!(Rank2::<2, 3>::flatten(&buffer), &[0, 10, 20, 30, 40, 50]);

        let mut buffer = Rank3::<2, 2, 2>::from_fn(|index| index);
        Rank3::<2, 2, 2>::flatten_mut(&mut buffer)[5] = 0;
        assert_eq!(buffer, [[[0, 1], [2, 3]], [[4, 0], [6, 7]]]);

        let buffer = Rank0::from_fn(|index| index + 7);
        assert_eq!(Rank0::flatten(&buffer), &[7]);
    }
}
