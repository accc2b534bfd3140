//! Filesystem locations for configuration, profiles, and per-workspace data.

pub mod xdg_root;

pub use xdg_root as xdg;
