use wasm_bindgen::prelude::*;

mod game;
use game::Serenade;

starlight_web::export_game!(Serenade, "serenade");
