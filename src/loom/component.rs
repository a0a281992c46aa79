//! Component counting and flexible construction.
//!
//! A value contributes *components* to a tensor of element type `T`: an element contributes one,
//! a tensor of `T` contributes all of its elements. [`Arguments`] concatenates the components of
//! a tuple or array of such values, which is what [`Tensor::new`] consumes.

use casey::snake;

use super::{shape::Shape, tensor::Tensor};

/// A value that occupies [`Components::COUNT`] consecutive slots of a buffer of `T`.
pub trait Components<T> {
    const COUNT: usize;

    /// Returns the component at `index`, which must be less than [`Components::COUNT`].
    fn component(&self, index: usize) -> T;
}

impl<T: Clone> Components<T> for T {
    const COUNT: usize = 1;

    #[inline]
    fn component(&self, _index: usize) -> T {
        self.clone()
    }
}

impl<T: Clone, S: Shape> Components<T> for Tensor<T, S> {
    const COUNT: usize = S::SIZE;

    #[inline]
    fn component(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T: Clone, S: Shape> Components<T> for &Tensor<T, S> {
    const COUNT: usize = S::SIZE;

    #[inline]
    fn component(&self, index: usize) -> T {
        self[index].clone()
    }
}

/// An ordered list of construction arguments.
///
/// Destination slot `i` maps to the argument whose run contains `i` and to the offset of `i`
/// within that run; runs are laid out left to right in argument order.
pub trait Arguments<T> {
    /// Total components of all arguments.
    const COUNT: usize;

    fn component(&self, index: usize) -> T;
}

impl<T, A: Components<T>, const N: usize> Arguments<T> for [A; N] {
    const COUNT: usize = N * <A as Components<T>>::COUNT;

    #[inline]
    fn component(&self, index: usize) -> T {
        let count = <A as Components<T>>::COUNT;
        self[index / count].component(index % count)
    }
}

macro_rules! impl_arguments {
    ($($t:ident),+) => {
        impl<T, $($t),+> Arguments<T> for ($($t,)+)
        where
            $($t: Components<T>),+
        {
            const COUNT: usize = 0 $(+ <$t as Components<T>>::COUNT)+;

            #[inline]
            fn component(&self, index: usize) -> T {
                let ($(snake!($t),)+) = self;
                let mut index = index;
                $(
                    let count = <$t as Components<T>>::COUNT;
                    if index < count {
                        return snake!($t).component(index);
                    }
                    index -= count;
                )+
                unreachable!("{index} components past the end of the arguments")
            }
        }
    };
}

impl_arguments!(T0);
impl_arguments!(T0, T1);
impl_arguments!(T0, T1, T2);
impl_arguments!(T0, T1, T2, T3);
impl_arguments!(T0, T1, T2, T3, T4);
impl_arguments!(T0, T1, T2, T3, T4, T5);
impl_arguments!(T0, T1, T2, T3, T4, T5, T6);
impl_arguments!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_arguments!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_arguments!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_arguments!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_arguments!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
