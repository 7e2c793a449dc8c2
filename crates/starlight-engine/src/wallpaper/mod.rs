//! Wallpaper composition.
//!
//! [`compose`] lays the finished name out as a portrait scene; the scene
//! serializes itself to SVG here and is rasterized by the web bridge.

pub mod rng;

use std::fmt;

use glam::Vec2;

use crate::catalog::Catalog;
use crate::view::slot_position;

use self::rng::Rng;

/// RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from 0-255 channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r: r as f32 / 255.0, g: g as f32 / 255.0, b: b as f32 / 255.0, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }

    /// `rgba(r, g, b, a)` for canvas fill styles.
    pub fn css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({}, {}, {}, {})", channel(self.r), channel(self.g), channel(self.b), self.a)
    }
}

pub const INDIGO: Color = Color::new(75.0 / 255.0, 0.0, 130.0 / 255.0, 1.0);
pub const DEEP_NAVY: Color = Color::new(25.0 / 255.0, 25.0 / 255.0, 112.0 / 255.0, 1.0);
pub const COOL_WHITE: Color = Color::new(224.0 / 255.0, 1.0, 1.0, 1.0);
pub const WARM_ROSE: Color = Color::new(1.0, 90.0 / 255.0, 138.0 / 255.0, 1.0);

/// Export settings. Defaults produce a 1170x2532 phone wallpaper.
#[derive(Debug, Clone, PartialEq)]
pub struct WallpaperConfig {
    pub width: u32,
    pub height: u32,
    /// Horizontal margin on both sides of the name.
    pub padding: f32,
    /// Distance from the top edge to the constellation.
    pub top_offset: f32,
    /// Share of the height the constellation spans.
    pub constellation_ratio: f32,
    pub background_stars: usize,
    pub seed: u64,
    pub footer: String,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            width: 1170,
            height: 2532,
            padding: 150.0,
            top_offset: 200.0,
            constellation_ratio: 0.5,
            background_stars: 400,
            seed: 0x5EED_57A2,
            footer: "Made with starlight".to_string(),
        }
    }
}

/// Radial backdrop, centered on the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub center: Vec2,
    pub radius: f32,
    pub inner: Color,
    pub outer: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub text: String,
    /// Baseline center.
    pub anchor: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Everything drawn on the wallpaper, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct WallpaperScene {
    pub width: u32,
    pub height: u32,
    pub backdrop: Backdrop,
    pub dust: Vec<Dot>,
    pub strokes: Vec<Stroke>,
    pub stroke_color: Color,
    pub stroke_width: f32,
    /// Blur radius of the rose glow behind strokes and stars.
    pub glow: f32,
    pub stars: Vec<Dot>,
    pub footer: Footer,
}

impl WallpaperScene {
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

/// Lay out every letter of the name in its slot over a dusted night sky.
pub fn compose(catalog: &Catalog, config: &WallpaperConfig) -> WallpaperScene {
    let width = config.width as f32;
    let height = config.height as f32;

    let mut rng = Rng::new(config.seed);
    let dust = (0..config.background_stars)
        .map(|_| {
            let center = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
            let radius = rng.range(0.5, 2.5);
            let alpha = rng.range(0.2, 0.9);
            Dot { center, radius, color: COOL_WHITE.with_alpha(alpha) }
        })
        .collect();

    let drawable = Vec2::new(width - config.padding * 2.0, height * config.constellation_ratio);
    let origin = Vec2::new(config.padding, config.top_offset);
    let total = catalog.len();
    let mut stars = Vec::new();
    let mut strokes = Vec::new();
    for letter_index in 0..total {
        let Some(glyph) = catalog.glyph_at(letter_index) else { continue };
        let place = |i: usize| origin + slot_position(&glyph.stars[i], letter_index, total) * drawable;
        for i in 0..glyph.len() {
            stars.push(Dot { center: place(i), radius: 5.0, color: COOL_WHITE });
        }
        for (a, b) in glyph.strokes() {
            strokes.push(Stroke { from: place(a), to: place(b) });
        }
    }

    WallpaperScene {
        width: config.width,
        height: config.height,
        backdrop: Backdrop {
            center: Vec2::new(width / 2.0, height),
            radius: height,
            inner: INDIGO,
            outer: DEEP_NAVY,
        },
        dust,
        strokes,
        stroke_color: WARM_ROSE,
        stroke_width: 3.0,
        glow: 10.0,
        stars,
        footer: Footer {
            text: config.footer.clone(),
            anchor: Vec2::new(width / 2.0, height - 80.0),
            size: 32.0,
            color: Color::new(1.0, 1.0, 1.0, 0.7),
        },
    }
}

/// Compose and serialize in one step.
pub fn export_svg(catalog: &Catalog, config: &WallpaperConfig) -> Vec<u8> {
    compose(catalog, config).to_svg().into_bytes()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for WallpaperScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = (self.width, self.height);
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;

        let b = &self.backdrop;
        writeln!(f, "<defs>")?;
        writeln!(
            f,
            r#"<radialGradient id="sky" gradientUnits="userSpaceOnUse" cx="{:.1}" cy="{:.1}" r="{:.1}">"#,
            b.center.x, b.center.y, b.radius
        )?;
        writeln!(f, r#"<stop offset="0" stop-color="{}"/>"#, b.inner.hex())?;
        writeln!(f, r#"<stop offset="1" stop-color="{}"/>"#, b.outer.hex())?;
        writeln!(f, "</radialGradient>")?;
        // stdDeviation is roughly half a canvas shadowBlur.
        writeln!(
            f,
            r#"<filter id="glow" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{:.1}" flood-color="{}"/></filter>"#,
            self.glow / 2.0,
            self.stroke_color.hex()
        )?;
        writeln!(f, "</defs>")?;
        writeln!(f, r#"<rect width="{w}" height="{h}" fill="url(#sky)"/>"#)?;

        writeln!(f, "<g>")?;
        for dot in &self.dust {
            write_dot(f, dot)?;
        }
        writeln!(f, "</g>")?;

        writeln!(
            f,
            r#"<g stroke="{}" stroke-width="{:.1}" stroke-linecap="round" filter="url(#glow)">"#,
            self.stroke_color.hex(),
            self.stroke_width
        )?;
        for s in &self.strokes {
            writeln!(
                f,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                s.from.x, s.from.y, s.to.x, s.to.y
            )?;
        }
        writeln!(f, "</g>")?;

        writeln!(f, r#"<g filter="url(#glow)">"#)?;
        for dot in &self.stars {
            write_dot(f, dot)?;
        }
        writeln!(f, "</g>")?;

        let t = &self.footer;
        writeln!(
            f,
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-family="Inter, sans-serif" text-anchor="middle" fill="{}" fill-opacity="{:.2}">{}</text>"#,
            t.anchor.x,
            t.anchor.y,
            t.size,
            t.color.hex(),
            t.color.a,
            escape_xml(&t.text)
        )?;
        writeln!(f, "</svg>")
    }
}

fn write_dot(f: &mut fmt::Formatter<'_>, dot: &Dot) -> fmt::Result {
    writeln!(
        f,
        r#"<circle cx="{:.1}" cy="{:.1}" r="{:.2}" fill="{}" fill-opacity="{:.2}"/>"#,
        dot.center.x,
        dot.center.y,
        dot.radius,
        dot.color.hex(),
        dot.color.a
    )
}
