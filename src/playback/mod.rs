pub(crate) mod controller;
pub(crate) mod debounce;
pub(crate) mod schedule;
