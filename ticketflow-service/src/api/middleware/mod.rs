pub mod correlation;
pub mod logging;
