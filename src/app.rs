mod state;
mod style;
mod ui;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use log::{info, warn};
use springboard::{BoardConfig, GestureController, Point, RenderRequest, ReorderEngine};
use state::{IconId, IconTile, TileVisual};
use std::collections::HashMap;
use std::time::Instant;

pub const APP_DISPLAY_NAME: &str = "Springboard";
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;
pub const MIN_WINDOW_WIDTH: f32 = 240.0;
pub const MIN_WINDOW_HEIGHT: f32 = 380.0;
const DEMO_TILE_COUNT: usize = 14;

type BoardController = GestureController<IconId, Sender<RenderRequest<IconId>>>;

pub struct SpringboardApp {
    controller: BoardController,
    render_rx: Receiver<RenderRequest<IconId>>,
    tiles: Vec<IconTile>,
    visuals: HashMap<IconId, TileVisual>,
    config: BoardConfig,
    board_rect: egui::Rect,
    press_candidate: Option<(Instant, egui::Pos2)>,
    saved_size: Option<egui::Vec2>,
}

impl SpringboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = BoardConfig::load();

        if let Some((w, h)) = config.last_size {
            let restored = sanitize_window_size(egui::vec2(w, h));
            cc.egui_ctx
                .send_viewport_cmd(egui::ViewportCommand::InnerSize(restored));
        }

        let (render_tx, render_rx) = crossbeam_channel::unbounded();
        let mut engine = ReorderEngine::new(&config, render_tx);
        let tile_count = DEMO_TILE_COUNT.min(config.capacity());
        let tiles: Vec<IconTile> = (0..tile_count).map(IconTile::demo).collect();
        for slot in 0..tiles.len() {
            if let Err(err) = engine.place_item(IconId(slot), slot) {
                warn!("could not place tile {slot}: {err}");
            }
        }
        info!(
            "board populated with {} tiles ({} columns)",
            engine.item_count(),
            config.column_count
        );

        Self {
            controller: GestureController::new(engine),
            render_rx,
            tiles,
            visuals: HashMap::new(),
            saved_size: config.last_size.map(|(w, h)| egui::vec2(w, h)),
            config,
            board_rect: egui::Rect::NOTHING,
            press_candidate: None,
        }
    }

    fn drain_render_requests(&mut self, now: Instant) {
        while let Ok(request) = self.render_rx.try_recv() {
            let item = request.item();
            let rest = self.controller.engine().slot_of(item).map_or_else(Point::default, |slot| {
                self.controller.engine().position_of(slot)
            });
            self.visuals
                .entry(item)
                .or_insert_with(|| TileVisual::at(rest))
                .apply(request, now);
        }
    }

    fn resize_board(&mut self, rect: egui::Rect) {
        if rect == self.board_rect {
            return;
        }
        self.board_rect = rect;
        let engine = self.controller.engine_mut();
        engine.set_container_size(rect.width(), rect.height());
        engine.layout_all();
    }

    fn save_window_size(&mut self, size: egui::Vec2) {
        let size = sanitize_window_size(size);
        if self
            .saved_size
            .is_some_and(|saved| (saved - size).length() < 1.0)
        {
            return;
        }
        self.saved_size = Some(size);
        self.config.last_size = Some((size.x, size.y));
        self.config.save();
    }

    fn to_board(&self, pos: egui::Pos2) -> Point {
        Point::new(pos.x - self.board_rect.min.x, pos.y - self.board_rect.min.y)
    }

    fn to_screen(&self, point: Point) -> egui::Pos2 {
        self.board_rect.min + egui::vec2(point.x, point.y)
    }
}

pub(super) fn sanitize_window_size(size: egui::Vec2) -> egui::Vec2 {
    let width = if size.x.is_finite() {
        size.x
    } else {
        WINDOW_WIDTH
    };
    let height = if size.y.is_finite() {
        size.y
    } else {
        WINDOW_HEIGHT
    };
    egui::vec2(width.max(MIN_WINDOW_WIDTH), height.max(MIN_WINDOW_HEIGHT))
}
