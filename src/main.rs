// A native binary only prints a hint; the modules are exercised by the wasm
// build and by the test suite.
#![cfg_attr(all(not(target_arch = "wasm32"), not(test)), allow(dead_code))]

mod active_section;
mod config;
mod error;
mod nav_menu;
mod parallax;
mod storage;
mod text_prefs;
mod theme;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
