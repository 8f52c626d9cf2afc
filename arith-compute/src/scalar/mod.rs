//! Kind-specific scalar kernels.

pub mod decimal;
