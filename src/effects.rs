pub(crate) mod cursor;
pub(crate) mod reveal;
pub(crate) mod selector;
