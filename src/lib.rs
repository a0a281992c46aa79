//! Fixed-shape tensors whose rank and extents are part of the type.
//!
//! ```
//! use mia_tensor::{Matrix, Vector};
//!
//! let a = Vector::<f32, 2>::new([1.0, 2.0]);
//! let m = Matrix::<f32, 2, 2>::new((a, 3.0, 4.0));
//! let m = (m * 2.0f32).pow(2i32);
//! assert_eq!(m.slice([1]).as_slice(), &[36.0, 64.0]);
//! assert!(m.greater(1.0f32).all());
//! ```

pub mod loom;
pub mod ops;

pub use loom::{
    codec::{Codec, Reader, Writer, deserialize, serialize},
    component::{Arguments, Components},
    num::{DataType, Scalar},
    shape::{Rank0, Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Shape, Split},
    tensor::{Matrix, Tensor, TensorError, Vector},
    transform::Operand,
};
