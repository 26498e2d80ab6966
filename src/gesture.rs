//! Turns a press / long-press / move / release pointer stream into engine
//! calls. Long-press recognition itself belongs to the host; it only reports
//! [`PointerEvent::LongPress`] once its hold threshold has elapsed.

use crate::engine::ReorderEngine;
use crate::events::RenderSink;
use crate::geometry::Point;
use log::debug;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    LongPress,
    Move(Point),
    Up(Point),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    Armed,
    PickedUp { slot: usize },
    Dragged { reordered: bool },
    Dropped { slot: usize },
    Released,
}

pub struct GestureController<I, S> {
    engine: ReorderEngine<I, S>,
    down_at: Option<Point>,
    last_pointer: Option<Point>,
    armed: bool,
}

impl<I, S> GestureController<I, S>
where
    I: Copy + Eq + Debug,
    S: RenderSink<I>,
{
    pub fn new(engine: ReorderEngine<I, S>) -> Self {
        Self {
            engine,
            down_at: None,
            last_pointer: None,
            armed: false,
        }
    }

    pub fn engine(&self) -> &ReorderEngine<I, S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReorderEngine<I, S> {
        &mut self.engine
    }

    pub fn into_engine(self) -> ReorderEngine<I, S> {
        self.engine
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    pub fn handle(&mut self, event: PointerEvent) -> GestureOutcome {
        match event {
            PointerEvent::Down(point) => self.press(point),
            PointerEvent::LongPress => self.long_press(),
            PointerEvent::Move(point) => self.move_to(point),
            PointerEvent::Up(point) => self.release(point),
            PointerEvent::Cancel => self.cancel(),
        }
    }

    pub fn press(&mut self, point: Point) -> GestureOutcome {
        self.down_at = Some(point);
        self.last_pointer = Some(point);
        self.armed = true;
        GestureOutcome::Armed
    }

    pub fn long_press(&mut self) -> GestureOutcome {
        if !self.armed || self.engine.is_dragging() {
            return GestureOutcome::Ignored;
        }
        let Some(down_at) = self.down_at else {
            return GestureOutcome::Ignored;
        };
        let Some(slot) = self.engine.slot_at(down_at) else {
            debug!("long press outside any cell at {down_at:?}");
            return GestureOutcome::Ignored;
        };
        if !self.engine.begin_drag(slot) {
            return GestureOutcome::Ignored;
        }
        self.follow_pointer(down_at);
        GestureOutcome::PickedUp { slot }
    }

    pub fn move_to(&mut self, point: Point) -> GestureOutcome {
        self.last_pointer = Some(point);
        if !self.engine.is_dragging() {
            return GestureOutcome::Ignored;
        }
        self.follow_pointer(point);
        let reordered = self.engine.update_drag(point);
        GestureOutcome::Dragged { reordered }
    }

    pub fn release(&mut self, point: Point) -> GestureOutcome {
        self.disarm();
        match self.engine.end_drag(point) {
            Some(slot) => GestureOutcome::Dropped { slot },
            None => GestureOutcome::Released,
        }
    }

    /// Ends any drag at the last pointer position seen.
    pub fn cancel(&mut self) -> GestureOutcome {
        let last = self.last_pointer;
        self.disarm();
        let dropped = match last {
            Some(point) => self.engine.end_drag(point),
            None => self.engine.cancel_drag(),
        };
        match dropped {
            Some(slot) => GestureOutcome::Dropped { slot },
            None => GestureOutcome::Released,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.down_at = None;
        self.last_pointer = None;
    }

    fn follow_pointer(&mut self, point: Point) {
        let Some(item) = self.engine.dragged_item() else {
            return;
        };
        let at = self.engine.layout().centered_on(point);
        self.engine.sink_mut().place_immediately(item, at);
    }
}
