use super::state::IconId;
use super::style::{
    BoardTheme, DROP_SHADOW, LABEL_FONT_SIZE, LABEL_HEIGHT, TILE_INSET, TILE_ROUNDING,
};
use super::SpringboardApp;
use eframe::egui;
use log::debug;
use springboard::{GestureOutcome, PointerEvent, Region};
use std::time::{Duration, Instant};

impl eframe::App for SpringboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_render_requests(now);

        let theme = BoardTheme::default();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme.board_bg))
            .show(ctx, |ui| {
                self.resize_board(ui.max_rect());
                self.handle_pointer(ctx, now);
                self.drain_render_requests(now);
                self.draw_board(ui, ctx, &theme, now);
            });

        let animating = self
            .visuals
            .values_mut()
            .fold(false, |any, visual| visual.settle(now) || any);
        if animating || self.controller.is_dragging() {
            ctx.request_repaint();
        }

        if !ctx.input(|i| i.pointer.any_down()) {
            if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
                self.save_window_size(rect.size());
            }
        }
    }
}

impl SpringboardApp {
    /// Host-side gesture recognition: turns raw egui pointer state into
    /// [`PointerEvent`]s, including the long-press threshold.
    fn handle_pointer(&mut self, ctx: &egui::Context, now: Instant) {
        let (pressed, down, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        if pressed {
            if let Some(p) = pos.filter(|p| self.board_rect.contains(*p)) {
                let point = self.to_board(p);
                self.controller.handle(PointerEvent::Down(point));
                self.press_candidate = Some((now, p));
            }
        }

        if let Some((start, start_pos)) = self.press_candidate {
            // Keep repainting while pressing so long-press timing is reliable even when pointer is still.
            ctx.request_repaint_after(Duration::from_millis(16));
            if !down {
                self.press_candidate = None;
            } else if let Some(p) = pos {
                if p.distance(start_pos) > self.config.press_move_tolerance {
                    self.press_candidate = None;
                } else if now.duration_since(start) >= self.config.long_press() {
                    self.press_candidate = None;
                    if let GestureOutcome::PickedUp { slot } =
                        self.controller.handle(PointerEvent::LongPress)
                    {
                        debug!("picked up tile at slot {slot}");
                    }
                }
            }
        }

        if self.controller.is_dragging() && down {
            if let Some(p) = pos {
                let point = self.to_board(p);
                self.controller.handle(PointerEvent::Move(point));
            }
        }

        if released {
            self.press_candidate = None;
            let event = match pos {
                Some(p) => PointerEvent::Up(self.to_board(p)),
                None => PointerEvent::Cancel,
            };
            self.controller.handle(event);
        } else if !down && self.controller.is_armed() {
            self.controller.handle(PointerEvent::Cancel);
        }
    }

    fn draw_board(&self, ui: &egui::Ui, ctx: &egui::Context, theme: &BoardTheme, now: Instant) {
        let engine = self.controller.engine();
        let layout = engine.layout();
        let painter = ui.painter();

        if let Some(first) = layout.region_range(Region::Tray).next() {
            let top = self.to_screen(layout.position_of(first));
            let strip = egui::Rect::from_min_size(
                egui::pos2(self.board_rect.min.x, top.y),
                egui::vec2(self.board_rect.width(), layout.cell_size),
            );
            painter.rect_filled(strip, 0.0, theme.tray_bg);
            painter.hline(
                strip.x_range(),
                strip.min.y,
                egui::Stroke::new(1.0, theme.tray_border),
            );
        }

        let dragged = engine.dragged_item();
        if let Some(session) = engine.session() {
            let hint = egui::Rect::from_min_size(
                self.to_screen(layout.position_of(session.current_slot())),
                egui::vec2(layout.cell_size, layout.cell_size),
            )
            .shrink(TILE_INSET * 0.5);
            painter.rect_stroke(
                hint,
                TILE_ROUNDING,
                egui::Stroke::new(1.0, theme.drop_hint),
            );
        }

        for (slot, &item) in engine.items().iter().enumerate() {
            if Some(item) == dragged {
                continue;
            }
            let origin = self
                .visuals
                .get(&item)
                .map_or_else(|| layout.position_of(slot), |v| v.position(now));
            self.paint_tile(
                painter,
                theme,
                item,
                self.to_screen(origin),
                layout.cell_size,
                (1.0, 1.0),
            );
        }

        if let Some(item) = dragged {
            let Some(visual) = self.visuals.get(&item) else {
                return;
            };
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("dragged_tile"),
            ));
            let effect = visual.pickup(now, self.config.animation_duration());
            self.paint_tile(
                &painter,
                theme,
                item,
                self.to_screen(visual.position(now)),
                layout.cell_size,
                effect,
            );
        }
    }

    fn paint_tile(
        &self,
        painter: &egui::Painter,
        theme: &BoardTheme,
        item: IconId,
        origin: egui::Pos2,
        cell_size: f32,
        (scale, alpha): (f32, f32),
    ) {
        let Some(tile) = self.tiles.get(item.0) else {
            return;
        };
        let cell = egui::Rect::from_min_size(origin, egui::vec2(cell_size, cell_size));
        let icon_side = ((cell_size - TILE_INSET * 2.0 - LABEL_HEIGHT).max(8.0)) * scale;
        let icon_rect = egui::Rect::from_center_size(
            egui::pos2(cell.center().x, cell.min.y + TILE_INSET + icon_side * 0.5),
            egui::vec2(icon_side, icon_side),
        );

        if scale < 1.0 {
            painter.rect_filled(
                icon_rect.expand(DROP_SHADOW),
                TILE_ROUNDING + DROP_SHADOW,
                theme.shadow.gamma_multiply(alpha),
            );
        }
        painter.rect_filled(icon_rect, TILE_ROUNDING, tile.color.gamma_multiply(alpha));
        painter.text(
            egui::pos2(cell.center().x, icon_rect.max.y + LABEL_HEIGHT * 0.5 + 2.0),
            egui::Align2::CENTER_CENTER,
            &tile.name,
            egui::FontId::proportional(LABEL_FONT_SIZE),
            theme.label.gamma_multiply(alpha),
        );
    }
}
