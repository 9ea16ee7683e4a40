pub(crate) mod bubble;
pub(crate) mod cache;
