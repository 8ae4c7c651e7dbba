pub(crate) mod step;
pub(crate) mod wire;
