//! Demo features built on the [`mvi`](crate::mvi) kernel.

pub mod for_each;
pub mod item;
pub mod navigation;
pub mod number;
pub mod root;
pub mod stack_nav;
