#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod api;
mod clock;
mod components;
mod error;
mod player;
mod settings;
mod surface;

#[cfg(target_arch = "wasm32")]
fn main() {
    dioxus::launch(components::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let settings = settings::load_settings();
    eprintln!(
        "tvclock runs in the browser: build it with `dx serve --platform web` behind a server \
         that answers {}",
        settings.endpoint
    );
}
