pub mod ot;

pub use ot::*;
