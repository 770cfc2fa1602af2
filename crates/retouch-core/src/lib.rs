pub mod annotation;
pub mod config;
pub mod consts;
pub mod crop;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod io;
pub mod mask;
pub mod script;
pub mod session;
pub mod viewport;
