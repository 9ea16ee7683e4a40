pub(crate) mod tutorial;
pub(crate) mod validate;
