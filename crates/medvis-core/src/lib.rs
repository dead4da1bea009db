pub mod config;
pub mod consts;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod run;
pub mod sequencer;
pub mod upload;
pub mod viewport;
