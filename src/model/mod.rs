//! Plain data carried through the machine: beverage recipes in, reports out.

pub mod beverage;
pub mod outcome;

pub use beverage::*;
pub use outcome::*;
