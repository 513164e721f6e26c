pub mod aggregate;
pub mod powerlaw;
pub mod stats;
pub mod stoch;

pub use aggregate::*;
pub use stats::*;
pub use stoch::*;
