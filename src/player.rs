pub(crate) mod clock;
pub(crate) mod detect;
pub(crate) mod driver;
pub(crate) mod frame_player;
pub(crate) mod preload;
