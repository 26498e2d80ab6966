use eframe::egui::Color32;

pub const TILE_INSET: f32 = 8.0;
pub const TILE_ROUNDING: f32 = 14.0;
pub const LABEL_FONT_SIZE: f32 = 12.0;
pub const LABEL_HEIGHT: f32 = 18.0;
pub const DROP_SHADOW: f32 = 6.0;
pub const PICKUP_SCALE: f32 = 0.667;
pub const PICKUP_ALPHA: f32 = 0.5;

#[derive(Clone, Copy)]
pub struct BoardTheme {
    pub board_bg: Color32,
    pub tray_bg: Color32,
    pub tray_border: Color32,
    pub label: Color32,
    pub shadow: Color32,
    pub drop_hint: Color32,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            board_bg: Color32::from_rgb(14, 20, 31),
            tray_bg: Color32::from_rgba_premultiplied(35, 53, 74, 184),
            tray_border: Color32::from_rgba_premultiplied(147, 169, 194, 78),
            label: Color32::from_rgb(242, 248, 255),
            shadow: Color32::from_rgba_premultiplied(0, 0, 0, 48),
            drop_hint: Color32::from_rgba_premultiplied(93, 214, 189, 186),
        }
    }
}
