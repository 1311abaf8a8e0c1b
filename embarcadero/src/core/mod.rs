//! Process-level infrastructure.

pub mod capability;

pub use capability::PrintCapability;
