pub(crate) mod form;
pub(crate) mod request;
pub(crate) mod response;
pub(crate) mod sequencer;
pub(crate) mod transport;
