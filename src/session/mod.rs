pub(crate) mod callbacks;
pub(crate) mod opts;
pub(crate) mod player;
