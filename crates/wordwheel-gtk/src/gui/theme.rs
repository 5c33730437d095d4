use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use std::time::Duration;

pub const HIDDEN_CLASS: &str = "wheel-hidden";

/// A named colour from the GTK theme with a fallback and an optional fixed alpha.
struct Swatch {
    name: &'static str,
    fallback: (f64, f64, f64, f64),
    alpha: Option<f64>,
}

impl Swatch {
    const fn new(name: &'static str, fallback: (f64, f64, f64, f64), alpha: Option<f64>) -> Self {
        Self {
            name,
            fallback,
            alpha,
        }
    }

    fn resolve(&self, context: &gtk::StyleContext) -> Srgba<f64> {
        let (r, g, b, a) = context
            .lookup_color(self.name)
            .map(|c| (c.red(), c.green(), c.blue(), c.alpha()))
            .map(|(r, g, b, a)| (r as f64, g as f64, b as f64, a as f64))
            .unwrap_or(self.fallback);
        Srgba::new(r, g, b, self.alpha.unwrap_or(a))
    }
}

const HOVERED: Swatch = Swatch::new("theme_selected_bg_color", (0.4, 0.4, 0.8, 0.95), Some(0.95));
const INNER: Swatch = Swatch::new("theme_fg_color", (0.25, 0.25, 0.25, 0.35), Some(0.35));
const OUTER: Swatch = Swatch::new("theme_fg_color", (0.2, 0.2, 0.2, 0.2), Some(0.2));
const DEAD_ZONE: Swatch = Swatch::new("error_bg_color", (0.8, 0.2, 0.2, 0.15), Some(0.15));
const GUIDE: Swatch = Swatch::new("borders", (0.5, 0.5, 0.5, 0.4), Some(0.4));
const TEXT: Swatch = Swatch::new("theme_fg_color", (1.0, 1.0, 1.0, 1.0), None);
const PREVIEW: Swatch = Swatch::new("theme_bg_color", (0.1, 0.1, 0.1, 0.9), Some(0.9));

pub struct ThemeColors {
    pub hovered: Srgba<f64>,
    pub inner: Srgba<f64>,
    pub outer: Srgba<f64>,
    pub dead_zone: Srgba<f64>,
    pub guide: Srgba<f64>,
    pub text: Srgba<f64>,
    pub preview: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            hovered: HOVERED.resolve(context),
            inner: INNER.resolve(context),
            outer: OUTER.resolve(context),
            dead_zone: DEAD_ZONE.resolve(context),
            guide: GUIDE.resolve(context),
            text: TEXT.resolve(context),
            preview: PREVIEW.resolve(context),
        }
    }
}

fn css(hide_animation: Duration) -> String {
    format!(
        "
.wordwheel-area {{
    transition: opacity {}ms ease-out;
}}
.wordwheel-area.{} {{
    opacity: 0;
}}
",
        hide_animation.as_millis(),
        HIDDEN_CLASS
    )
}

pub fn load_css(hide_animation: Duration) -> gtk::CssProvider {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(&css(hide_animation));

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
    provider
}

/// Reapplies the stylesheet when the hide animation changes.
pub fn update_css(provider: &gtk::CssProvider, hide_animation: Duration) {
    provider.load_from_data(&css(hide_animation));
}
