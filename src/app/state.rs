use super::style::{PICKUP_ALPHA, PICKUP_SCALE};
use eframe::egui::Color32;
use springboard::{Point, RenderRequest};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(pub usize);

pub struct IconTile {
    pub name: String,
    pub color: Color32,
}

impl IconTile {
    pub fn demo(index: usize) -> Self {
        const PALETTE: [Color32; 6] = [
            Color32::from_rgb(66, 133, 244),
            Color32::from_rgb(219, 68, 55),
            Color32::from_rgb(244, 180, 0),
            Color32::from_rgb(15, 157, 88),
            Color32::from_rgb(171, 71, 188),
            Color32::from_rgb(0, 172, 193),
        ];
        Self {
            name: format!("EG {index}"),
            color: PALETTE[index % PALETTE.len()],
        }
    }
}

pub struct MoveAnim {
    pub from: Point,
    pub to: Point,
    pub start: Instant,
    pub duration: Duration,
}

impl MoveAnim {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Renderer-side state of one tile.
pub struct TileVisual {
    pub rest: Point,
    pub anim: Option<MoveAnim>,
    pub picked_at: Option<Instant>,
}

impl TileVisual {
    pub fn at(rest: Point) -> Self {
        Self {
            rest,
            anim: None,
            picked_at: None,
        }
    }

    pub fn apply(&mut self, request: RenderRequest<IconId>, now: Instant) {
        match request {
            RenderRequest::AnimateMove {
                from, to, duration, ..
            } => {
                // A newer move always replaces the one in flight.
                self.anim = Some(MoveAnim {
                    from,
                    to,
                    start: now,
                    duration,
                });
                self.rest = to;
            }
            RenderRequest::PlaceImmediately { at, .. } => {
                self.anim = None;
                self.rest = at;
            }
            RenderRequest::PickupEffect(_) => self.picked_at = Some(now),
            RenderRequest::ClearEffect(_) => self.picked_at = None,
        }
    }

    pub fn position(&self, now: Instant) -> Point {
        match &self.anim {
            Some(anim) => {
                let t = anim.progress(now);
                Point::new(
                    anim.from.x + (anim.to.x - anim.from.x) * t,
                    anim.from.y + (anim.to.y - anim.from.y) * t,
                )
            }
            None => self.rest,
        }
    }

    /// Drops finished animations; returns whether one is still running.
    pub fn settle(&mut self, now: Instant) -> bool {
        if let Some(anim) = &self.anim {
            if anim.progress(now) >= 1.0 {
                self.anim = None;
            }
        }
        self.anim.is_some()
    }

    /// Scale and opacity of the pick-up effect.
    pub fn pickup(&self, now: Instant, duration: Duration) -> (f32, f32) {
        let Some(start) = self.picked_at else {
            return (1.0, 1.0);
        };
        let t = if duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(start).as_secs_f32() / duration.as_secs_f32())
                .clamp(0.0, 1.0)
        };
        (
            1.0 + (PICKUP_SCALE - 1.0) * t,
            1.0 + (PICKUP_ALPHA - 1.0) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_interpolates_linearly_and_settles() {
        let start = Instant::now();
        let mut visual = TileVisual::at(Point::new(0.0, 0.0));
        visual.apply(
            RenderRequest::AnimateMove {
                item: IconId(0),
                from: Point::new(0.0, 0.0),
                to: Point::new(100.0, 50.0),
                duration: Duration::from_millis(100),
            },
            start,
        );
        let mid = visual.position(start + Duration::from_millis(50));
        assert!((mid.x - 50.0).abs() < 0.01);
        assert!((mid.y - 25.0).abs() < 0.01);
        assert!(visual.settle(start + Duration::from_millis(50)));
        assert!(!visual.settle(start + Duration::from_millis(150)));
        assert_eq!(visual.position(start), Point::new(100.0, 50.0));
    }

    #[test]
    fn immediate_placement_cancels_animation() {
        let now = Instant::now();
        let mut visual = TileVisual::at(Point::new(0.0, 0.0));
        visual.apply(
            RenderRequest::AnimateMove {
                item: IconId(1),
                from: Point::new(0.0, 0.0),
                to: Point::new(10.0, 10.0),
                duration: Duration::from_secs(1),
            },
            now,
        );
        visual.apply(
            RenderRequest::PlaceImmediately {
                item: IconId(1),
                at: Point::new(40.0, 40.0),
            },
            now,
        );
        assert!(visual.anim.is_none());
        assert_eq!(visual.position(now), Point::new(40.0, 40.0));
    }

    #[test]
    fn pickup_effect_shrinks_and_fades_until_cleared() {
        let now = Instant::now();
        let duration = Duration::from_millis(150);
        let mut visual = TileVisual::at(Point::default());
        assert_eq!(visual.pickup(now, duration), (1.0, 1.0));
        visual.apply(RenderRequest::PickupEffect(IconId(2)), now);
        let (scale, alpha) = visual.pickup(now + duration, duration);
        assert!((scale - PICKUP_SCALE).abs() < 0.001);
        assert!((alpha - PICKUP_ALPHA).abs() < 0.001);
        visual.apply(RenderRequest::ClearEffect(IconId(2)), now);
        assert_eq!(visual.pickup(now + duration, duration), (1.0, 1.0));
    }
}
