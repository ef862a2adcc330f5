pub(crate) mod decode;
pub(crate) mod host;
pub(crate) mod sequence;
pub(crate) mod store;
