//! Runtime module — process lifecycle: logging, config, the run itself.

pub mod boot;
pub mod run;
