use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
};

use itertools::Itertools;
use thiserror::Error;

use super::{
    component::Arguments,
    num::{DataType, One, Scalar, Zero},
    shape::{self, Rank1, Rank2, Shape},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("tensor index error: linear index {0} is out of range for size {1}")]
    Index(usize, usize),
    #[error("tensor index error: {0} coordinates given for a tensor of rank {1}")]
    Rank(usize, usize),
    #[error("tensor index error: index {index} is out of range for axis {axis} of extent {extent}")]
    Axis {
        axis: usize,
        index: usize,
        extent: usize,
    },
    #[error("tensor creation error: size {0} does not match data len {1}")]
    Create(usize, usize),
    #[error("tensor decode error: expected {0} bytes, got {1}")]
    Bytes(usize, usize),
}

/// A dense tensor whose rank and extents are fixed by its [`Shape`].
///
/// Elements are stored contiguously in row-major order and owned exclusively; copies are deep.
pub struct Tensor<T, S: Shape> {
    elements: S::Buffer<T>,
}

pub type Vector<T, const N: usize> = Tensor<T, Rank1<N>>;
pub type Matrix<T, const M: usize, const N: usize> = Tensor<T, Rank2<M, N>>;

impl<T, S: Shape> Tensor<T, S> {
    pub const RANK: usize = S::RANK;
    pub const SIZE: usize = S::SIZE;
    pub const EXTENTS: &'static [usize] = S::EXTENTS;

    /// Creates a tensor by calling `f` with each linear offset in order.
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        const { assert!(shape::is_valid(S::EXTENTS), "tensor extents must be non-zero") };
        let elements = S::from_fn(f);
        Self { elements }
    }

    /// Creates a tensor from arguments whose components exactly cover it.
    ///
    /// Each argument is either a single element or a tensor of the same element type; their
    /// components fill the buffer left to right. Argument lists that provide too many or too few
    /// components are rejected at compile time.
    ///
    /// ```
    /// use mia_tensor::{Matrix, Vector};
    ///
    /// let row = Vector::<i32, 3>::new([1, 2, 3]);
    /// let m = Matrix::<i32, 2, 3>::new((row, 4, 5, 6));
    /// assert_eq!(m.as_slice(), &[1, 2, 3, 4, 5, 6]);
    /// ```
    #[inline]
    pub fn new<A: Arguments<T>>(args: A) -> Self {
        const {
            assert!(
                A::COUNT == S::SIZE,
                "argument components must cover the tensor exactly"
            )
        };
        Self::from_fn(|index| args.component(index))
    }

    /// Resolves a (possibly partial) multi-index to a linear offset at compile time.
    #[inline]
    pub const fn offset_of(indices: &[usize]) -> usize {
        shape::offset(S::EXTENTS, indices)
    }

    #[inline]
    pub fn rank(&self) -> usize {
        S::RANK
    }

    #[inline]
    pub fn size(&self) -> usize {
        S::SIZE
    }

    #[inline]
    pub fn extents(&self) -> &'static [usize] {
        S::EXTENTS
    }

    /// Returns the extent of one axis.
    ///
    /// # Panics
    /// Panics if `axis` is not less than the rank.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        S::EXTENTS[axis]
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        S::flatten(&self.elements)
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        S::flatten_mut(&mut self.elements)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Linear access, checked.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Linear access, checked.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Linear access, checked, reporting the failure as a [`TensorError`].
    #[inline]
    pub fn try_get(&self, index: usize) -> Result<&T, TensorError> {
        self.get(index).ok_or(TensorError::Index(index, S::SIZE))
    }

    /// Linear access without bounds checking.
    ///
    /// # Safety
    /// `index` must be less than [`Self::SIZE`].
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Linear access without bounds checking.
    ///
    /// # Safety
    /// `index` must be less than [`Self::SIZE`].
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    /// Multi-index access. Supplying fewer coordinates than the rank addresses the first element
    /// of the implied sub-tensor.
    ///
    /// Coordinates are not checked against their extents; only the resolved offset is. Use
    /// [`Self::try_at`] for validated access.
    #[inline]
    pub fn at<const K: usize>(&self, indices: [usize; K]) -> &T {
        const { assert!(K <= S::RANK, "more coordinates than the tensor has axes") };
        &self.as_slice()[shape::offset(S::EXTENTS, &indices)]
    }

    #[inline]
    pub fn at_mut<const K: usize>(&mut self, indices: [usize; K]) -> &mut T {
        const { assert!(K <= S::RANK, "more coordinates than the tensor has axes") };
        &mut self.as_mut_slice()[shape::offset(S::EXTENTS, &indices)]
    }

    /// Multi-index access that validates the coordinates.
    #[inline]
    pub fn try_at(&self, indices: &[usize]) -> Result<&T, TensorError> {
        let offset = shape::checked_offset(S::EXTENTS, indices)?;
        Ok(&self.as_slice()[offset])
    }

    #[inline]
    pub fn try_at_mut(&mut self, indices: &[usize]) -> Result<&mut T, TensorError> {
        let offset = shape::checked_offset(S::EXTENTS, indices)?;
        Ok(&mut self.as_mut_slice()[offset])
    }

    /// Access at an offset fixed at compile time, see [`Self::offset_of`].
    #[inline]
    pub fn fixed<const OFFSET: usize>(&self) -> &T {
        const { assert!(OFFSET < S::SIZE, "fixed offset out of range") };
        &self.as_slice()[OFFSET]
    }

    #[inline]
    pub fn fixed_mut<const OFFSET: usize>(&mut self) -> &mut T {
        const { assert!(OFFSET < S::SIZE, "fixed offset out of range") };
        &mut self.as_mut_slice()[OFFSET]
    }
}

impl<T: Clone, S: Shape> Tensor<T, S> {
    /// Creates a tensor with every element set to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T: Zero, S: Shape> Tensor<T, S> {
    #[inline]
    pub fn zeros() -> Self {
        Self::from_fn(|_| T::zero())
    }
}

impl<T: One, S: Shape> Tensor<T, S> {
    #[inline]
    pub fn ones() -> Self {
        Self::from_fn(|_| T::one())
    }
}

impl<T: Scalar, S: Shape> Tensor<T, S> {
    #[inline]
    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    /// Size of the element buffer in bytes.
    #[inline]
    pub fn data_size(&self) -> usize {
        S::SIZE * T::DATA_TYPE.size()
    }
}

impl<S: Shape> Tensor<bool, S> {
    /// Returns `true` if every element is `true`.
    #[inline]
    pub fn all(&self) -> bool {
        self.iter().all(|&x| x)
    }

    /// Returns `true` if any element is `true`.
    #[inline]
    pub fn any(&self) -> bool {
        self.iter().any(|&x| x)
    }
}

impl<T: Clone, S: Shape> Clone for Tensor<T, S> {
    #[inline]
    fn clone(&self) -> Self {
        let elements = self.as_slice();
        Self::from_fn(|index| elements[index].clone())
    }
}

impl<T: Copy, S: Shape> Copy for Tensor<T, S> where S::Buffer<T>: Copy {}

impl<T: Default, S: Shape> Default for Tensor<T, S> {
    #[inline]
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T: PartialEq, S: Shape> PartialEq for Tensor<T, S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, S: Shape> Eq for Tensor<T, S> {}

impl<T: Hash, S: Shape> Hash for Tensor<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Debug, S: Shape> Debug for Tensor<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("extents", &S::EXTENTS)
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T: Display, S: Shape> Display for Tensor<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.iter().format(", "))
    }
}

impl<T, S: Shape> AsRef<[T]> for Tensor<T, S> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: Shape> AsMut<[T]> for Tensor<T, S> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, S: Shape> std::ops::Index<usize> for Tensor<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, S: Shape> std::ops::IndexMut<usize> for Tensor<T, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T, S: Shape, const K: usize> std::ops::Index<[usize; K]> for Tensor<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, indices: [usize; K]) -> &Self::Output {
        self.at(indices)
    }
}

impl<T, S: Shape, const K: usize> std::ops::IndexMut<[usize; K]> for Tensor<T, S> {
    #[inline]
    fn index_mut(&mut self, indices: [usize; K]) -> &mut Self::Output {
        self.at_mut(indices)
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a Tensor<T, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a mut Tensor<T, S> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Clone, S: Shape> TryFrom<&[T]> for Tensor<T, S> {
    type Error = TensorError;

    fn try_from(value: &[T]) -> Result<Self, Self::Error> {
        if value.len() != S::SIZE {
            return Err(TensorError::Create(S::SIZE, value.len()));
        }
        Ok(Self::from_fn(|index| value[index].clone()))
    }
}

impl<T, S: Shape> TryFrom<Vec<T>> for Tensor<T, S> {
    type Error = TensorError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        if value.len() != S::SIZE {
            return Err(TensorError::Create(S::SIZE, value.len()));
        }
        let mut elements = value.into_iter();
        Ok(Self::from_fn(|_| elements.next().expect("length checked")))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, error::Error};

    use super::{Matrix, Tensor, TensorError, Vector};
    use crate::loom::{
        num::DataType,
        shape::{Rank0, Rank2, Rank3},
    };

    #[test]
    fn test_shape_queries() {
        let t = Tensor::<f32, Rank3<2, 3, 4>>::zeros();
        assert_eq!(t.rank(), 3);
        assert_eq!(t.size(), 24);
        assert_eq!(t.extents(), &[2, 3, 4]);
        assert_eq!(t.extent(1), 3);
        assert_eq!(t.data_type(), DataType::F32);
        assert_eq!(t.data_size(), 96);

        let s = Tensor::<u8, Rank0>::splat(9);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.size(), 1);
        assert_eq!(s.as_slice(), &[9]);
        assert_eq!(Tensor::<u8, Rank0>::SIZE, 1);
    }

    #[test]
    fn test_default_and_fill() {
        let t = Matrix::<i64, 2, 2>::default();
        assert!(t.iter().all(|&x| x == 0));

        let t = Matrix::<f64, 2, 2>::ones();
        assert_eq!(t.as_slice(), &[1.0; 4]);

        let t = Vector::<usize, 4>::from_fn(|index| index * index);
        assert_eq!(t.as_slice(), &[0, 1, 4, 9]);
    }

    #[test]
    fn test_linear_access() {
        let mut t = Vector::<i32, 3>::new([1, 2, 3]);
        assert_eq!(t[2], 3);
        assert_eq!(t.get(3), None);
        assert_eq!(t.try_get(3), Err(TensorError::Index(3, 3)));
        assert_eq!(t.try_get(0), Ok(&1));

        t[0] = 10;
        if let Some(x) = t.get_mut(1) {
            *x = 20;
        }
        // SAFETY: 2 < 3.
        unsafe { *t.get_unchecked_mut(2) = 30 };
        assert_eq!(t.as_slice(), &[10, 20, 30]);
        // SAFETY: 1 < 3.
        assert_eq!(unsafe { *t.get_unchecked(1) }, 20);
    }

    #[test]
    fn test_multi_index() -> Result<(), Box<dyn Error>> {
        let mut t = Tensor::<usize, Rank3<2, 3, 4>>::from_fn(|index| index);
        assert_eq!(*t.at([1, 2, 3]), 23);
        assert_eq!(t[[0, 1, 2]], 6);
        // partial index addresses the first element of the sub-tensor
        assert_eq!(*t.at([1]), 12);
        assert_eq!(*t.at([1, 1]), 16);
        assert_eq!(*t.at([]), 0);

        *t.at_mut([0, 0, 1]) = 100;
        t[[1, 0]] = 200;
        assert_eq!(t[1], 100);
        assert_eq!(t[12], 200);

        assert_eq!(*t.try_at(&[1, 2, 3])?, 23);
        assert_eq!(
            t.try_at(&[0, 3]),
            Err(TensorError::Axis {
                axis: 1,
                index: 3,
                extent: 3
            })
        );
        assert_eq!(t.try_at(&[0, 0, 0, 0]), Err(TensorError::Rank(4, 3)));

        *t.try_at_mut(&[1, 2])? = 7;
        assert_eq!(t[20], 7);

        Ok(())
    }

    #[test]
    fn test_fixed_offset() {
        type M = Matrix<i32, 2, 3>;
        let mut m = M::new([1, 2, 3, 4, 5, 6]);

        const OFFSET: usize = M::offset_of(&[1, 2]);
        assert_eq!(OFFSET, 5);
        assert_eq!(*m.fixed::<OFFSET>(), 6);
        assert_eq!(*m.fixed::<{ M::offset_of(&[1]) }>(), 4);

        *m.fixed_mut::<0>() = -1;
        assert_eq!(m[0], -1);
    }

    #[test]
    fn test_copy_is_deep() {
        let x = Vector::<i32, 3>::new([1, 2, 3]);
        let mut y = x;
        y[0] = 9;
        assert_eq!(x.as_slice(), &[1, 2, 3]);
        assert_eq!(y.as_slice(), &[9, 2, 3]);

        let a = Vector::<String, 2>::new((String::from("a"), String::from("b")));
        let mut b = a.clone();
        b[1].push('!');
        assert_eq!(a[1], "b");
        assert_eq!(b[1], "b!");
    }

    #[test]
    fn test_iteration() {
        let mut t = Matrix::<i32, 2, 2>::new([1, 2, 3, 4]);
        for x in &mut t {
            *x *= 10;
        }
        let sum: i32 = (&t).into_iter().sum();
        assert_eq!(sum, 100);
        assert_eq!(t.iter().copied().max(), Some(40));
    }

    #[test]
    fn test_try_from() {
        let t = Matrix::<i32, 2, 2>::try_from(&[1, 2, 3, 4][..]);
        assert_eq!(t, Ok(Matrix::<i32, 2, 2>::new([1, 2, 3, 4])));

        let t = Matrix::<i32, 2, 2>::try_from(vec![1, 2, 3]);
        assert_eq!(t, Err(TensorError::Create(4, 3)));

        let t = Vector::<String, 2>::try_from(vec![String::from("x"), String::from("y")]);
        assert_eq!(t.map(|t| t[1].clone()), Ok(String::from("y")));
    }

    #[test]
    fn test_reduce() {
        let t = Vector::<bool, 3>::new([true, false, true]);
        assert!(!t.all());
        assert!(t.any());
        assert!(Vector::<bool, 2>::splat(true).all());
        assert!(!Vector::<bool, 2>::default().any());
    }

    #[test]
    fn test_format() {
        let t = Matrix::<i32, 2, 2>::new([1, 2, 3, 4]);
        assert_eq!(t.to_string(), "[1, 2, 3, 4]");
        assert_eq!(Tensor::<i32, Rank0>::splat(5).to_string(), "[5]");

        let rows = Vector::<Vector<i32, 2>, 2>::new((
            Vector::<i32, 2>::new([1, 2]),
            Vector::<i32, 2>::new([3, 4]),
        ));
        assert_eq!(rows.to_string(), "[[1, 2], [3, 4]]");

        let debug = format!("{:?}", Tensor::<u8, Rank2<1, 2>>::new([7, 8]));
        assert_eq!(debug, "Tensor { extents: [1, 2], elements: [7, 8] }");
    }

    #[test]
    fn test_hash() {
        let mut set = HashSet::new();
        set.insert(Vector::<i32, 2>::new([1, 2]));
        set.insert(Vector::<i32, 2>::new([1, 2]));
        set.insert(Vector::<i32, 2>::new([2, 1]));
        assert_eq!(set.len(), 2);
    }
}
