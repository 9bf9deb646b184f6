//! Model representations independent of how they were trained.

pub mod gbdt;
