pub(crate) mod config;
pub(crate) mod hooks;
pub(crate) mod orchestrator;
pub(crate) mod scroll;
pub(crate) mod stagger;
pub(crate) mod state;
