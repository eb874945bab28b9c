//! I/O wrappers used by the package writer.

pub mod counting;

pub use counting::CountingWriter;
