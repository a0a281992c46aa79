//! The elementwise transform engine.
//!
//! Every operator on tensors ends up here: a single pass over `0..SIZE` that reads one component
//! of each operand and writes one output element. Operands with a single component broadcast.

use super::{
    num::Scalar,
    shape::{self, Shape},
    tensor::Tensor,
};

/// One side of an elementwise operation.
pub trait Operand {
    type Item;

    /// Number of components this operand provides. An operand of one component is reused at
    /// every position.
    const COUNT: usize;
    /// Extents this operand was declared with.
    const EXTENTS: &'static [usize];

    /// Returns the component read at position `index` of the output.
    fn operand(&self, index: usize) -> &Self::Item;
}

impl<T: Scalar> Operand for T {
    type Item = T;

    const COUNT: usize = 1;
    const EXTENTS: &'static [usize] = &[];

    #[inline]
    fn operand(&self, _index: usize) -> &Self::Item {
        self
    }
}

impl Operand for bool {
    type Item = bool;

    const COUNT: usize = 1;
    const EXTENTS: &'static [usize] = &[];

    #[inline]
    fn operand(&self, _index: usize) -> &Self::Item {
        self
    }
}

impl<T, S: Shape> Operand for Tensor<T, S> {
    type Item = T;

    const COUNT: usize = S::SIZE;
    const EXTENTS: &'static [usize] = S::EXTENTS;

    #[inline]
    fn operand(&self, index: usize) -> &Self::Item {
        match S::SIZE {
            1 => &self[0],
            _ => &self[index],
        }
    }
}

impl<T, S: Shape> Operand for &Tensor<T, S> {
    type Item = T;

    const COUNT: usize = S::SIZE;
    const EXTENTS: &'static [usize] = S::EXTENTS;

    #[inline]
    fn operand(&self, index: usize) -> &Self::Item {
        (**self).operand(index)
    }
}

/// Returns `true` if an operand of `count` components and `extents` can feed an output of
/// `output` extents.
pub const fn fits(count: usize, extents: &[usize], output: &[usize]) -> bool {
    count == 1 || shape::same(extents, output)
}

/// Applies `f` to every element of `x`.
#[inline]
pub fn unary<T, U, S: Shape>(x: &Tensor<T, S>, mut f: impl FnMut(&T) -> U) -> Tensor<U, S> {
    Tensor::from_fn(|index| f(&x[index]))
}

/// Applies `f` to every element of `x`, writing into an existing `output`.
#[inline]
pub fn unary_into<T, U, S: Shape>(
    output: &mut Tensor<U, S>,
    x: &Tensor<T, S>,
    mut f: impl FnMut(&T) -> U,
) {
    output
        .iter_mut()
        .zip(x.iter())
        .for_each(|(output, x)| *output = f(x));
}

/// Replaces every element of `x` with `f` of itself.
#[inline]
pub fn unary_assign<T, S: Shape>(x: &mut Tensor<T, S>, mut f: impl FnMut(&T) -> T) {
    x.iter_mut().for_each(|x| *x = f(&*x));
}

/// Combines two operands position by position into a tensor of shape `S`.
///
/// Each operand must either have one component or match `S` exactly; anything else is rejected at
/// compile time.
#[inline]
pub fn binary<L, R, U, S>(
    lhs: &L,
    rhs: &R,
    mut f: impl FnMut(&L::Item, &R::Item) -> U,
) -> Tensor<U, S>
where
    L: Operand,
    R: Operand,
    S: Shape,
{
    const {
        assert!(
            fits(L::COUNT, L::EXTENTS, S::EXTENTS),
            "left operand does not fit the output shape"
        )
    };
    const {
        assert!(
            fits(R::COUNT, R::EXTENTS, S::EXTENTS),
            "right operand does not fit the output shape"
        )
    };
    Tensor::from_fn(|index| f(lhs.operand(index), rhs.operand(index)))
}

/// Combines `lhs` with `rhs` position by position, storing the result back into `lhs`.
#[inline]
pub fn binary_assign<T, R, S>(
    lhs: &mut Tensor<T, S>,
    rhs: &R,
    mut f: impl FnMut(&T, &R::Item) -> T,
) where
    R: Operand,
    S: Shape,
{
    const {
        assert!(
            fits(R::COUNT, R::EXTENTS, S::EXTENTS),
            "right operand does not fit the output shape"
        )
    };
    lhs.iter_mut()
        .enumerate()
        .for_each(|(index, x)| *x = f(&*x, rhs.operand(index)));
}
