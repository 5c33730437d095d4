use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use wordwheel::input::SurfaceScale;
use wordwheel::wheel::{Phase, Ring, VisibleSlot};
use wordwheel::{Point, Radii, WheelConfig, WheelSnapshot};

pub const SLOT_RADIUS: f64 = 34.0;
pub const FONT_SIZE: f64 = 15.0;
pub const PREVIEW_FONT_SIZE: f64 = 22.0;
pub const PREVIEW_OFFSET: f64 = 72.0; // above the finger
pub const PREVIEW_PADDING: f64 = 12.0;

/// What the draw function paints: the last on-screen snapshot in logical
/// coordinates plus the scale the input adapter applies to the surface.
pub struct Frame {
    pub snapshot: Option<WheelSnapshot>,
    pub config: WheelConfig,
    pub scale: SurfaceScale,
}

impl Frame {
    pub fn new(config: WheelConfig) -> Self {
        Self {
            snapshot: None,
            config,
            scale: SurfaceScale::IDENTITY,
        }
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn ellipse(cr: &Context, center: Point, radii: Radii) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.scale(radii.x, radii.y);
    cr.new_sub_path();
    cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    cr.restore()
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

fn show_centered(cr: &Context, text: &str, at: Point, size: f64) -> Result<(), cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.width() / 2.0 - ext.x_bearing(),
        at.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Hovered,
    Inner,
    Outer,
}

impl SlotState {
    fn resolve(slot: &VisibleSlot) -> Self {
        match (slot.hovered, slot.ring) {
            (true, _) => Self::Hovered,
            (false, Ring::Inner) => Self::Inner,
            (false, Ring::Outer) => Self::Outer,
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Hovered => colors.hovered,
            Self::Inner => colors.inner,
            Self::Outer => colors.outer,
        }
    }
}

fn draw_slot(cr: &Context, slot: &VisibleSlot, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, SlotState::resolve(slot).color(colors));
    cr.new_path();
    cr.arc(slot.position.x, slot.position.y, SLOT_RADIUS, 0.0, 2.0 * PI);
    cr.fill()?;

    set_color(cr, colors.text);
    show_centered(cr, slot.candidate.text.as_str(), slot.position, FONT_SIZE)
}

fn draw_guides(
    cr: &Context,
    snapshot: &WheelSnapshot,
    config: &WheelConfig,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    // the dead zone is measured against the outer ring, so it stretches with it
    let stretch = config.outer_radius.y / config.outer_radius.x;
    set_color(cr, colors.dead_zone);
    cr.new_path();
    ellipse(
        cr,
        snapshot.center,
        Radii::new(config.dead_zone, config.dead_zone * stretch),
    )?;
    cr.fill()?;

    set_color(cr, colors.guide);
    cr.set_line_width(1.5);
    cr.new_path();
    ellipse(cr, snapshot.center, config.inner_radius)?;
    if snapshot.expanded {
        ellipse(cr, snapshot.center, config.outer_radius)?;
    }
    cr.stroke()
}

fn draw_drag_line(
    cr: &Context,
    snapshot: &WheelSnapshot,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Some(end) = snapshot.drag_point.filter(|_| snapshot.phase == Phase::Dragging) else {
        return Ok(());
    };
    let target = snapshot
        .slots
        .iter()
        .find(|s| s.hovered)
        .map(|s| s.position)
        .unwrap_or(end);

    set_color(cr, colors.hovered);
    cr.set_line_width(3.0);
    cr.new_path();
    cr.move_to(snapshot.center.x, snapshot.center.y);
    cr.line_to(target.x, target.y);
    cr.stroke()
}

/// Floating label of the hovered word just above the finger.
fn draw_preview(
    cr: &Context,
    snapshot: &WheelSnapshot,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (Some(candidate), Some(finger)) = (&snapshot.hovered, snapshot.drag_point) else {
        return Ok(());
    };
    let text = candidate.text.as_str();

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(PREVIEW_FONT_SIZE);
    let ext = cr.text_extents(text)?;
    let (w, h) = (
        ext.width() + PREVIEW_PADDING * 2.0,
        ext.height() + PREVIEW_PADDING * 2.0,
    );
    let at = Point::new(finger.x, finger.y - PREVIEW_OFFSET);

    set_color(cr, colors.preview);
    cr.new_path();
    rounded_rect(cr, at.x - w / 2.0, at.y - h / 2.0, w, h, PREVIEW_PADDING);
    cr.fill()?;

    set_color(cr, colors.text);
    show_centered(cr, text, at, PREVIEW_FONT_SIZE)
}

pub fn draw(cr: &Context, frame: &Frame, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(snapshot) = &frame.snapshot else {
        return Ok(());
    };

    cr.save()?;
    // snapshots are in logical space, the surface may be measured larger or smaller
    cr.scale(1.0 / frame.scale.x, 1.0 / frame.scale.y);

    draw_guides(cr, snapshot, &frame.config, colors)?;
    draw_drag_line(cr, snapshot, colors)?;
    for slot in &snapshot.slots {
        draw_slot(cr, slot, colors)?;
    }
    draw_preview(cr, snapshot, colors)?;

    cr.restore()
}
