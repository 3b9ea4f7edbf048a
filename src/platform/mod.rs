//! Platform abstraction layer
//!
//! Handles native/browser differences for:
//! - Logging setup
//! - Demo input (autopilot)
//! - Browser binding (wasm32)

pub mod autopilot;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::autopilot_input;

/// Initialise the `log` backend for the current platform
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Initialise the `log` backend for the current platform
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
