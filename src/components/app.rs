use crate::settings::load_settings;
use dioxus::prelude::*;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

/// Full-screen background video with the clock on top.
///
/// The elements are rendered here; the player binds to them by id once they
/// are in the document.
#[component]
pub fn App() -> Element {
    let settings = use_hook(load_settings);

    #[cfg(target_arch = "wasm32")]
    {
        let settings = settings.clone();
        use_effect(move || {
            if let Err(err) = crate::player::web::mount(&settings) {
                tracing::error!(%err, "background player not started");
            }
        });
    }

    rsx! {
        document::Stylesheet { href: APP_CSS }

        video {
            id: "{settings.video_element_id}",
            class: "background-video",
            src: settings.initial_video.clone(),
            muted: true,
            "playsinline": "true",
            preload: "auto",
        }
        div { class: "clock-overlay",
            div { id: "{settings.clock_element_id}", class: "clock" }
        }
    }
}
