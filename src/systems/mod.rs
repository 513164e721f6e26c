pub mod sdk;
pub mod params;
pub mod constraint;
pub mod policy;
pub mod engine;
pub mod diagnostics;
pub mod curve_fit;
pub mod bootstrap;
#[cfg(feature = "export")] pub mod record;
