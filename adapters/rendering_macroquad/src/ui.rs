//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter
//! can remain agnostic of Macroquad's UI types. The HUD panel shows mission
//! statistics and the mission button; the status banner is plain colored
//! text because skins cannot restyle a single label.

use hexhunt_rendering::HudView;
use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Snapshot of the HUD panel's layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HudUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour applied to the window skin.
    pub background: Color,
    /// Values displayed by the panel.
    pub hud: HudView,
}

/// Outcome of rendering the HUD panel during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct HudUiResult {
    /// Whether the mission button was pressed during this frame.
    pub new_mission_pressed: bool,
}

/// Status banner text and color for the current feedback message.
#[must_use]
pub(crate) fn status_banner(hud: &HudView) -> (&'static str, Color) {
    use hexhunt_core::StatusMessage;

    match hud.status {
        StatusMessage::FindTheAlien => ("FIND THE ALIEN!", WHITE),
        StatusMessage::Warmer => ("GETTING WARMER!", Color::from_rgba(0xfb, 0xbf, 0x24, 255)),
        StatusMessage::Colder => ("GETTING COLDER...", Color::from_rgba(0x60, 0xa5, 0xfa, 255)),
        StatusMessage::MissionSuccess => {
            ("MISSION SUCCESS!", Color::from_rgba(0x4a, 0xde, 0x80, 255))
        }
    }
}

/// Renders the HUD panel's labels and mission button for the current frame.
pub(crate) fn draw_hud_ui(ui: &mut Ui, context: HudUiContext) -> HudUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .color_selected(Color::from_rgba(70, 70, 70, 255))
        .color_selected_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_inactive(Color::from_rgba(56, 56, 56, 200))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut button_pressed = false;
    let _ = ui.window(hash!("hud_panel"), context.origin, context.size, |ui| {
        ui.label(None, &format!("Level: {}", context.hud.level.get()));
        ui.label(None, &format!("Scans: {}", context.hud.scans));
        let best_text = match context.hud.best {
            Some(best) => format!("Best: {} (L{})", best.scans(), best.level().get()),
            None => "Best: --".to_string(),
        };
        ui.label(None, best_text.as_str());

        button_pressed = ui.button(None, mission_button_label(&context.hud));
    });

    ui.pop_skin();

    HudUiResult {
        new_mission_pressed: button_pressed,
    }
}

/// Label for the mission button: a won mission below the level cap advances,
/// everything else restarts at the current level.
#[must_use]
pub(crate) fn mission_button_label(hud: &HudView) -> &'static str {
    use hexhunt_core::Level;

    if hud.mission_complete && hud.level < Level::MAX {
        "Next Mission"
    } else {
        "New Mission"
    }
}
