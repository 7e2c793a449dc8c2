use crate::catalog::{Catalog, CatalogError};
use crate::hint::FallbackHints;
use crate::wallpaper::WallpaperConfig;

/// Configuration for a session, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Time spent on the intro screen before play starts (default: 2000 ms).
    pub intro_delay_ms: f32,
    /// How long a wrong-tap marker stays visible (default: 500 ms).
    pub wrong_tap_clear_ms: f32,
    /// Auto-dismiss delay for unlock messages. `None` keeps them open until closed.
    pub message_dismiss_ms: Option<f32>,
    /// Durable slot name for the progress snapshot.
    pub storage_key: String,
    /// Endpoint the web hint advisor POSTs to. `None` disables remote hints.
    pub hint_endpoint: Option<String>,
    /// Hint shown while the intro is on screen.
    pub intro_hint: String,
    /// Hint shown when play starts and after a replay.
    pub welcome_hint: String,
    /// Local phrases applied synchronously on every tap.
    pub fallback_hints: FallbackHints,
    /// Wallpaper export settings.
    pub wallpaper: WallpaperConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            intro_delay_ms: 2000.0,
            wrong_tap_clear_ms: 500.0,
            message_dismiss_ms: Some(4000.0),
            storage_key: "starlight-serenade-progress".to_string(),
            hint_endpoint: None,
            intro_hint: "Tap a star to begin.".to_string(),
            welcome_hint: "Tap the glowing star to begin.".to_string(),
            fallback_hints: FallbackHints::default(),
            wallpaper: WallpaperConfig::default(),
        }
    }
}

/// The contract every greeting must fulfill: where its data comes from and
/// how its session is tuned.
pub trait Game {
    /// Return session configuration. Called once before the catalog is loaded.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the validated glyph catalog and name spec.
    fn catalog(&self) -> Result<Catalog, CatalogError>;
}
