pub(crate) mod machine;
pub(crate) mod state;
pub(crate) mod timer;
