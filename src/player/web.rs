//! Browser bindings: the `<video>` element, the clock node, timers, and the
//! listeners that feed the cycle controller.

use crate::api::{endpoint_url, HttpVideoSource};
use crate::clock::ClockUpdater;
use crate::error::PlayerError;
use crate::player::{bind_elements, CycleController};
use crate::settings::PlayerSettings;
use crate::surface::{MediaSurface, Sleeper, TextSurface};
use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, Element, Event, EventTarget, HtmlVideoElement};

/// `HTMLMediaElement.HAVE_FUTURE_DATA`
const HAVE_FUTURE_DATA: u16 = 3;
/// `HTMLMediaElement.NETWORK_NO_SOURCE`
const NETWORK_NO_SOURCE: u16 = 3;
const READY_EVENTS: [&str; 2] = ["canplay", "loadeddata"];
const FAILURE_EVENT: &str = "error";

/// Bind to the page and start the clock and the video cycle.
///
/// Fails before installing anything when either element is missing.
pub fn mount(settings: &PlayerSettings) -> Result<(), PlayerError> {
    let window = window().ok_or_else(|| PlayerError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| PlayerError::MissingElement("document".to_string()))?;

    let clock_element = document.get_element_by_id(&settings.clock_element_id);
    let video_element = document
        .get_element_by_id(&settings.video_element_id)
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());
    bind_elements(settings, clock_element, video_element, |clock_element, video_element| {
        install(&window, settings, clock_element, video_element)
    })
}

/// Start the clock, attach the video listeners and kick off the first playback.
/// Only reached once both elements exist.
fn install(
    window: &web_sys::Window,
    settings: &PlayerSettings,
    clock_element: Element,
    video_element: HtmlVideoElement,
) -> Result<(), PlayerError> {
    // Resolve the endpoint before anything is spawned or attached.
    let origin = window
        .location()
        .origin()
        .map_err(|e| PlayerError::Endpoint(js_error_message(&e)))?;
    let endpoint = endpoint_url(&origin, &settings.endpoint)?;

    let clock = ClockUpdater::new(
        ElementText(clock_element),
        TimerSleeper,
        || chrono::Local::now().time(),
        settings.clock_interval(),
    );
    spawn_local(clock.run());

    let timings = settings.cycle_timings();
    let controller = Rc::new(CycleController::new(
        VideoSurface::new(video_element.clone(), timings.fade_out),
        HttpVideoSource::new(endpoint.clone()),
        TimerSleeper,
        timings,
    ));

    let on_time_update = controller.clone();
    listen(&video_element, "timeupdate", move || {
        // Skip the spawn for the common case of a cycle already running.
        if !on_time_update.state().is_idle() {
            return;
        }
        let controller = on_time_update.clone();
        spawn_local(async move {
            controller.on_time_update().await;
        });
    })?;

    let on_ended = controller.clone();
    listen(&video_element, "ended", move || {
        let controller = on_ended.clone();
        spawn_local(async move {
            controller.on_ended().await;
        });
    })?;

    info!(%endpoint, "background player mounted");
    spawn_local(async move {
        controller.start().await;
    });
    Ok(())
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), PlayerError>
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|e| PlayerError::Bind(format!("{event}: {}", js_error_message(&e))))?;
    // Lives for the page.
    callback.forget();
    Ok(())
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

pub struct VideoSurface {
    video: HtmlVideoElement,
}

impl VideoSurface {
    pub fn new(video: HtmlVideoElement, fade: Duration) -> Self {
        video.set_loop(false);
        // The content attribute alone doesn't mute an element created by script,
        // and unmuted autoplay is blocked.
        video.set_muted(true);
        let transition = format!("opacity {}ms ease-in-out", fade.as_millis());
        if let Err(err) = video.style().set_property("transition", &transition) {
            warn!(error = %js_error_message(&err), "could not set fade transition");
        }
        Self { video }
    }
}

impl MediaSurface for VideoSurface {
    fn src(&self) -> String {
        self.video.src()
    }

    fn set_src(&self, src: &str) {
        self.video.set_src(src);
    }

    fn load(&self) {
        self.video.load();
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_opacity(&self, opacity: f64) {
        if let Err(err) = self
            .video
            .style()
            .set_property("opacity", &opacity.to_string())
        {
            warn!(error = %js_error_message(&err), opacity, "could not set opacity");
        }
    }

    fn is_ready(&self) -> bool {
        self.video.ready_state() >= HAVE_FUTURE_DATA
    }

    fn has_failed(&self) -> bool {
        self.video.error().is_some() || self.video.network_state() == NETWORK_NO_SOURCE
    }

    async fn wait_ready(&self) -> Result<(), PlayerError> {
        let (tx, rx) = oneshot::channel();
        let _listener = ReadyListener::attach(&self.video, tx)?;
        rx.await
            .unwrap_or_else(|_| Err(PlayerError::Load("readiness listener dropped".to_string())))
    }

    async fn play(&self) -> Result<(), PlayerError> {
        let promise = self
            .video
            .play()
            .map_err(|e| PlayerError::Playback(js_error_message(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| PlayerError::Playback(js_error_message(&e)))?;
        Ok(())
    }
}

type ReadySender = oneshot::Sender<Result<(), PlayerError>>;

/// One-shot listener for `canplay` / `loadeddata` / `error`.
///
/// The first event detaches the callback from all three and reports the
/// outcome; dropping the guard detaches it too, so an abandoned wait never
/// leaves a dangling callback on the element.
struct ReadyListener {
    target: EventTarget,
    callback: Closure<dyn FnMut(Event)>,
}

impl ReadyListener {
    fn attach(target: &EventTarget, sender: ReadySender) -> Result<Self, PlayerError> {
        let sender = RefCell::new(Some(sender));
        let function: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));

        let own_function = function.clone();
        let own_target = target.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Some(function) = own_function.borrow().as_ref() {
                detach(&own_target, function);
            }
            let Some(sender) = sender.borrow_mut().take() else {
                return;
            };
            let outcome = if event.type_() == FAILURE_EVENT {
                Err(PlayerError::Load(
                    "media element reported an error".to_string(),
                ))
            } else {
                Ok(())
            };
            let _ = sender.send(outcome);
        }) as Box<dyn FnMut(Event)>);

        let js_function: js_sys::Function = callback.as_ref().unchecked_ref::<js_sys::Function>().clone();
        for event in READY_EVENTS.iter().chain(std::iter::once(&FAILURE_EVENT)) {
            if let Err(err) = target.add_event_listener_with_callback(event, &js_function) {
                detach(target, &js_function);
                return Err(PlayerError::Bind(format!(
                    "{event}: {}",
                    js_error_message(&err)
                )));
            }
        }
        *function.borrow_mut() = Some(js_function);

        Ok(Self {
            target: target.clone(),
            callback,
        })
    }
}

impl Drop for ReadyListener {
    fn drop(&mut self) {
        detach(&self.target, self.callback.as_ref().unchecked_ref());
    }
}

fn detach(target: &EventTarget, function: &js_sys::Function) {
    for event in READY_EVENTS.iter().chain(std::iter::once(&FAILURE_EVENT)) {
        let _ = target.remove_event_listener_with_callback(event, function);
    }
}

struct ElementText(Element);

impl TextSurface for ElementText {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

struct TimerSleeper;

impl Sleeper for TimerSleeper {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
