//! The `loom` module holds the fixed-shape tensor and the machinery around it.
//!
//! ## Key Components
//! 1. **Shapes** (`shape`):
//!    - Zero-sized markers `Rank0` through `Rank6` carrying extents as const generics.
//!    - Row-major offset resolution, usable in `const` contexts.
//!
//! 2. **Tensor** (`tensor`, `component`, `slice`):
//!    - Stack-resident, contiguous storage selected by the shape.
//!    - Flexible construction from elements and smaller tensors, checked at compile time.
//!    - Linear, multi-index, fixed-offset and sub-tensor access.
//!
//! 3. **Elementwise transforms** (`transform`):
//!    - One pass per operation with scalar broadcasting; see [`crate::ops`] for the operators.
//!
//! 4. **Numerical System** (`num`):
//!    - Scalar types (`f32`, `f16`, `u8`, etc.) and data type metadata (`DataType`).
//!
//! 5. **Codec** (`codec`, `serial`):
//!    - Raw buffer write and read with bulk copies for primitive elements.
//!    - Optional `serde` support behind the `serde` feature.

pub mod codec;
pub mod component;
pub mod num;
#[cfg(feature = "serde")]
pub mod serial;
pub mod shape;
pub mod slice;
pub mod tensor;
pub mod transform;
