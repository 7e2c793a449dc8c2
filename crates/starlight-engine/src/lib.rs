pub mod api;
pub mod catalog;
pub mod core;
pub mod hint;
pub mod input;
pub mod persistence;
pub mod progression;
pub mod session;
pub mod view;
pub mod wallpaper;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig};
pub use api::types::GameEvent;
pub use catalog::{Catalog, CatalogError, LetterGlyph, NameSpec, PathCatalog, Star};
pub use core::time::{TimerKind, Timers};
pub use input::queue::{ActionQueue, ActionSender};
pub use hint::{
    FallbackHints, FnAdvisor, HintAdvisor, HintError, HintRequest, HintResponse, NoAdvisor,
};
pub use persistence::{MemoryStore, SnapshotError, SnapshotStore, StoreError};
pub use progression::{
    reduce, Action, Effect, GameState, MessageSource, OpenMessage, Phase, Transition, WrongTap,
};
pub use session::Session;
pub use view::{ConstellationView, LineView, RibbonEntry, StarView};
pub use wallpaper::{compose, export_svg, Color, WallpaperConfig, WallpaperScene};
