pub mod advisor;
pub mod canvas;
pub mod runner;
pub mod storage;

pub use advisor::FetchHintAdvisor;
pub use runner::GameRunner;
pub use storage::LocalStorageStore;

/// Generate all `#[wasm_bindgen]` exports for a greeting.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - the wasm-bindgen exports the renderer calls (init, tick, taps, state
///   and view accessors, wallpaper export, teardown)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGreeting;
///
/// starlight_web::export_game!(MyGreeting, "my-greeting");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The greeting type that implements `starlight_engine::Game`
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => Some(f(runner)),
                None => {
                    log::warn!("{}: not initialized, call game_init() first", $game_name);
                    None
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            runner
                .init()
                .map_err(|e| JsValue::from_str(&format!("{}: {e}", $game_name)))?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_tick(dt_ms: f32) {
            with_runner(|r| r.tick(dt_ms));
        }

        /// `letter` is the letter occurrence the star belongs to, or -1 for the active one.
        #[wasm_bindgen]
        pub fn game_tap(index: u32, letter: i32) -> bool {
            with_runner(|r| r.tap(index, letter)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn game_tap_next() -> bool {
            with_runner(|r| r.tap_next()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn game_close_message() -> bool {
            with_runner(|r| r.close_message()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn game_replay() -> bool {
            with_runner(|r| r.replay()).unwrap_or(false)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn game_state_json() -> String {
            with_runner(|r| r.state_json()).unwrap_or_else(|| "null".to_string())
        }

        #[wasm_bindgen]
        pub fn game_view_json() -> String {
            with_runner(|r| r.view_json()).unwrap_or_else(|| "null".to_string())
        }

        #[wasm_bindgen]
        pub fn game_ribbon_json() -> String {
            with_runner(|r| r.ribbon_json()).unwrap_or_else(|| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn game_events_json() -> String {
            with_runner(|r| r.events_json()).unwrap_or_else(|| "[]".to_string())
        }

        // ---- Wallpaper ----

        #[wasm_bindgen]
        pub fn game_export_wallpaper() -> Result<String, JsValue> {
            with_runner(|r| r.wallpaper_png())
                .unwrap_or_else(|| Err(JsValue::from_str("game not initialized")))
        }

        #[wasm_bindgen]
        pub fn game_export_wallpaper_svg() -> String {
            with_runner(|r| r.wallpaper_svg()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn game_teardown() {
            with_runner(|r| r.teardown());
        }
    };
}
