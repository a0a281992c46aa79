use super::{
    shape::{self, Shape, Split},
    tensor::{Tensor, TensorError},
};

impl<T: Clone, S: Shape> Tensor<T, S> {
    /// Copies the sub-tensor at a partial index into a new tensor of the remaining axes.
    ///
    /// Indexing away `K` leading axes leaves a tensor shaped like the trailing `RANK - K` extents.
    /// The result is an independent copy.
    ///
    /// ```
    /// use mia_tensor::Matrix;
    ///
    /// let m = Matrix::<i32, 2, 3>::new([1, 2, 3, 4, 5, 6]);
    /// assert_eq!(m.slice([1]).as_slice(), &[4, 5, 6]);
    /// ```
    ///
    /// # Panics
    /// Coordinates are resolved like [`Tensor::at`]; panics if the run falls outside the buffer.
    #[inline]
    pub fn slice<const K: usize>(&self, indices: [usize; K]) -> Tensor<T, <S as Split<K>>::Tail>
    where
        S: Split<K>,
    {
        let offset = shape::offset(S::EXTENTS, &indices);
        self.copy_run(offset)
    }

    /// Like [`Self::slice`], but validates the coordinates first.
    #[inline]
    pub fn try_slice<const K: usize>(
        &self,
        indices: [usize; K],
    ) -> Result<Tensor<T, <S as Split<K>>::Tail>, TensorError>
    where
        S: Split<K>,
    {
        let offset = shape::checked_offset(S::EXTENTS, &indices)?;
        Ok(self.copy_run(offset))
    }

    fn copy_run<R: Shape>(&self, offset: usize) -> Tensor<T, R> {
        let elements = &self.as_slice()[offset..offset + R::SIZE];
        Tensor::from_fn(|index| elements[index].clone())
    }
}
