pub(crate) mod content;
pub(crate) mod flashlight;
pub(crate) mod panel;
