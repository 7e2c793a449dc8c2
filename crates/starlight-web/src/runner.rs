use serde::Serialize;
use starlight_engine::{CatalogError, Game, Session};
use wasm_bindgen::JsValue;

use crate::advisor::FetchHintAdvisor;
use crate::canvas;
use crate::storage::LocalStorageStore;

type WebSession = Session<LocalStorageStore, FetchHintAdvisor>;

/// Generic game runner that wires a greeting to the browser.
///
/// Each concrete greeting creates a `thread_local!` GameRunner and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    session: Option<WebSession>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        Self { game, session: None }
    }

    /// Load the catalog and start the session. Call once after construction.
    pub fn init(&mut self) -> Result<(), CatalogError> {
        let config = self.game.config();
        let catalog = self.game.catalog()?;
        let store = LocalStorageStore::new(config.storage_key.clone());
        let advisor = FetchHintAdvisor::from_endpoint(config.hint_endpoint.clone());
        if !advisor.is_enabled() {
            log::info!("No hint endpoint configured, using local phrases only");
        }
        self.session = Some(Session::start(catalog, config, store, advisor));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Advance timers and apply queued hint replies.
    pub fn tick(&mut self, dt_ms: f32) {
        if let Some(session) = self.session.as_mut() {
            session.tick(dt_ms);
        }
    }

    /// A negative `letter` means "the active letter".
    pub fn tap(&mut self, index: u32, letter: i32) -> bool {
        let letter = usize::try_from(letter).ok();
        self.session
            .as_mut()
            .is_some_and(|s| s.tap(index as usize, letter))
    }

    pub fn tap_next(&mut self) -> bool {
        self.session.as_mut().is_some_and(|s| s.tap_next())
    }

    pub fn close_message(&mut self) -> bool {
        self.session.as_mut().is_some_and(|s| s.close_message())
    }

    pub fn replay(&mut self) -> bool {
        self.session.as_mut().is_some_and(|s| s.replay())
    }

    pub fn state_json(&self) -> String {
        self.session.as_ref().map_or_else(null, |s| to_json(s.state()))
    }

    pub fn view_json(&self) -> String {
        self.session.as_ref().map_or_else(null, |s| to_json(&s.view()))
    }

    pub fn ribbon_json(&self) -> String {
        self.session.as_ref().map_or_else(null, |s| to_json(&s.ribbon()))
    }

    /// Events raised since the last call, as a JSON array.
    pub fn events_json(&mut self) -> String {
        self.session
            .as_mut()
            .map_or_else(|| "[]".to_string(), |s| to_json(&s.drain_events()))
    }

    /// PNG data URL of the finished-name wallpaper, footer stamped with the current year.
    pub fn wallpaper_png(&self) -> Result<String, JsValue> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| JsValue::from_str("game not initialized"))?;
        let mut scene = session.wallpaper();
        let year = js_sys::Date::new_0().get_full_year();
        scene.footer.text = format!("{} \u{2022} {year}", scene.footer.text);
        canvas::rasterize(&scene)
    }

    /// The same wallpaper as an SVG document.
    pub fn wallpaper_svg(&self) -> String {
        self.session.as_ref().map_or_else(String::new, |s| s.wallpaper().to_svg())
    }

    pub fn teardown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.teardown();
        }
    }
}

fn null() -> String {
    "null".to_string()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize for the renderer: {e}");
        null()
    })
}
