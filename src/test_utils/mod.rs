//! the test_utils folder here shares fixtures and mock builders between the
//! unit tests of every module
mod common;
mod mock;

pub use common::*;
pub use mock::*;
