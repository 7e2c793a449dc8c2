use starlight_engine::wallpaper::WallpaperConfig;
use starlight_engine::{Catalog, CatalogError, Game, GameConfig};

const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// A birthday greeting: APARANJITHA, one constellation per letter.
#[derive(Debug, Default)]
pub struct Serenade;

impl Serenade {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Game for Serenade {
    fn config(&self) -> GameConfig {
        GameConfig {
            wallpaper: WallpaperConfig {
                footer: "Made for Aparanjitha".to_string(),
                ..WallpaperConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn catalog(&self) -> Result<Catalog, CatalogError> {
        let catalog = Catalog::from_json(CATALOG_JSON)?;
        log::info!("Serenade catalog: {} letters", catalog.len());
        Ok(catalog)
    }
}
