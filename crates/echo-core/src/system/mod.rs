//! # System Module
//!
//! Stage descriptors for the pipeline.
//!
//! Which agent runs which stage, in what order, with which capability. The
//! descriptors carry no behaviour; the stage logic lives in the capability
//! modules (`lookup`, `model`, `synthesis`, `crud`, `notify`).

mod stage;

pub use stage::*;
