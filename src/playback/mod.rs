pub(crate) mod monitor;
pub(crate) mod simulated;
pub(crate) mod source;
pub(crate) mod surface;
