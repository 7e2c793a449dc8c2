use std::f64::consts::TAU;

use starlight_engine::wallpaper::{Dot, WallpaperScene};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Paint a wallpaper scene on an off-screen canvas and return it as a PNG data URL.
pub fn rasterize(scene: &WallpaperScene) -> Result<String, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(scene.width);
    canvas.set_height(scene.height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("could not get canvas context"))?
        .dyn_into()?;

    paint(&ctx, scene)?;
    canvas.to_data_url_with_type("image/png")
}

fn paint(ctx: &CanvasRenderingContext2d, scene: &WallpaperScene) -> Result<(), JsValue> {
    let (w, h) = (scene.width as f64, scene.height as f64);

    let b = &scene.backdrop;
    let (cx, cy) = (b.center.x as f64, b.center.y as f64);
    let gradient = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, b.radius as f64)?;
    gradient.add_color_stop(0.0, &b.inner.hex())?;
    gradient.add_color_stop(1.0, &b.outer.hex())?;
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);

    for dot in &scene.dust {
        fill_dot(ctx, dot)?;
    }
    ctx.set_global_alpha(1.0);

    let glow = scene.stroke_color.hex();
    ctx.set_shadow_color(&glow);
    ctx.set_shadow_blur(scene.glow as f64);
    ctx.set_stroke_style_str(&glow);
    ctx.set_line_width(scene.stroke_width as f64);
    for s in &scene.strokes {
        ctx.begin_path();
        ctx.move_to(s.from.x as f64, s.from.y as f64);
        ctx.line_to(s.to.x as f64, s.to.y as f64);
        ctx.stroke();
    }
    for dot in &scene.stars {
        fill_dot(ctx, dot)?;
    }
    ctx.set_global_alpha(1.0);
    ctx.set_shadow_blur(0.0);

    let footer = &scene.footer;
    ctx.set_fill_style_str(&footer.color.css());
    ctx.set_font(&format!("{}px Inter, sans-serif", footer.size));
    ctx.set_text_align("center");
    ctx.fill_text(&footer.text, footer.anchor.x as f64, footer.anchor.y as f64)
}

fn fill_dot(ctx: &CanvasRenderingContext2d, dot: &Dot) -> Result<(), JsValue> {
    ctx.set_global_alpha(dot.color.a as f64);
    ctx.set_fill_style_str(&dot.color.hex());
    ctx.begin_path();
    ctx.arc(dot.center.x as f64, dot.center.y as f64, dot.radius as f64, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}
