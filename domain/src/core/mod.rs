//! Core domain primitives shared by every module.

pub mod model;
pub mod query;
pub mod string;
