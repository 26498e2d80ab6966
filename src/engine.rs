//! Drag-and-reorder bookkeeping.
//!
//! The engine owns the slot -> item [`Placement`] and keeps it a bijection on
//! `0..len` after every call. While a drag is active, moving inside the
//! dragged item's own region shifts the items in between by one slot; moving
//! into the other region previews a swap with the item under the pointer,
//! undoing any earlier preview first. Visual work is only requested through
//! the [`RenderSink`]; nothing here waits on it.

use crate::config::BoardConfig;
use crate::events::RenderSink;
use crate::geometry::{Point, Region, RegionLayout};
use log::{debug, trace, warn};
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("slot {slot} would leave a gap after {len} placed items")]
    Gap { slot: usize, len: usize },
    #[error("slot {slot} is beyond the board capacity of {capacity}")]
    Full { slot: usize, capacity: usize },
    #[error("item is already placed at slot {slot}")]
    Duplicate { slot: usize },
    #[error("placement cannot change while a drag is in progress")]
    DragInProgress,
}

/// Ordered slot -> item mapping. The first `grid_capacity` items form the
/// grid region, the rest the tray.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<I> {
    items: Vec<I>,
    grid_capacity: usize,
    tray_capacity: usize,
}

impl<I: Copy + Eq + Debug> Placement<I> {
    pub fn new(grid_capacity: usize, tray_capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(grid_capacity + tray_capacity),
            grid_capacity,
            tray_capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.grid_capacity + self.tray_capacity
    }

    pub fn grid_count(&self) -> usize {
        self.items.len().min(self.grid_capacity)
    }

    pub fn tray_count(&self) -> usize {
        self.items.len() - self.grid_count()
    }

    pub fn region_count(&self, region: Region) -> usize {
        match region {
            Region::Grid => self.grid_count(),
            Region::Tray => self.tray_count(),
        }
    }

    pub fn get(&self, slot: usize) -> Option<I> {
        self.items.get(slot).copied()
    }

    pub fn slot_of(&self, item: I) -> Option<usize> {
        self.items.iter().position(|&placed| placed == item)
    }

    pub fn as_slice(&self) -> &[I] {
        &self.items
    }

    /// Puts `item` at `slot`, appending when `slot == len` and replacing the
    /// current occupant otherwise.
    pub fn place(&mut self, item: I, slot: usize) -> Result<Option<I>, PlacementError> {
        if slot >= self.capacity() {
            return Err(PlacementError::Full {
                slot,
                capacity: self.capacity(),
            });
        }
        if slot > self.items.len() {
            return Err(PlacementError::Gap {
                slot,
                len: self.items.len(),
            });
        }
        if let Some(existing) = self.slot_of(item) {
            if existing != slot {
                return Err(PlacementError::Duplicate { slot: existing });
            }
        }
        if slot == self.items.len() {
            self.items.push(item);
            Ok(None)
        } else {
            Ok(Some(std::mem::replace(&mut self.items[slot], item)))
        }
    }

    /// True when no item occupies two slots. Contiguity is structural.
    pub fn is_bijective(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(i, item)| !self.items[i + 1..].contains(item))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// Moves the occupant of `from` to `to`, sliding everything in between
    /// one slot toward `from`.
    fn shift(&mut self, from: usize, to: usize) {
        if to < from {
            self.items[to..=from].rotate_right(1);
        } else if to > from {
            self.items[from..=to].rotate_left(1);
        }
    }
}

/// A previewed cross-region swap: the dragged item sits at `slot` and
/// `displaced` sits at the dragged item's home slot until the preview is
/// undone or the drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwap<I> {
    pub slot: usize,
    pub displaced: I,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession<I> {
    pub item: I,
    pub origin_slot: usize,
    /// Slot of the dragged item inside its own region.
    pub home_slot: usize,
    pub pending_swap: Option<PendingSwap<I>>,
}

impl<I: Copy> DragSession<I> {
    /// Slot the dragged item occupies in the placement right now.
    pub fn current_slot(&self) -> usize {
        self.pending_swap.map_or(self.home_slot, |swap| swap.slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Dragging,
    SwapPreview,
}

pub struct ReorderEngine<I, S> {
    placement: Placement<I>,
    session: Option<DragSession<I>>,
    sink: S,
    column_count: usize,
    tray_bottom_margin: f32,
    animation_duration: Duration,
    container_width: f32,
    container_height: f32,
}

impl<I, S> ReorderEngine<I, S>
where
    I: Copy + Eq + Debug,
    S: RenderSink<I>,
{
    pub fn new(config: &BoardConfig, sink: S) -> Self {
        Self {
            placement: Placement::new(config.grid_region_size, config.tray_size),
            session: None,
            sink,
            column_count: config.column_count.max(1),
            tray_bottom_margin: config.tray_bottom_margin,
            animation_duration: config.animation_duration(),
            container_width: 0.0,
            container_height: 0.0,
        }
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container_width = width;
        self.container_height = height;
    }

    pub fn layout(&self) -> RegionLayout {
        RegionLayout::new(
            self.container_width,
            self.container_height,
            self.column_count,
            self.placement.grid_count(),
            self.placement.tray_count(),
            self.tray_bottom_margin,
        )
    }

    pub fn cell_size(&self) -> f32 {
        self.layout().cell_size
    }

    pub fn position_of(&self, slot: usize) -> Point {
        self.layout().position_of(slot)
    }

    pub fn slot_at(&self, point: Point) -> Option<usize> {
        self.layout().slot_at(point)
    }

    pub fn place_item(&mut self, item: I, slot: usize) -> Result<Option<I>, PlacementError> {
        if self.session.is_some() {
            warn!("rejected placement of {item:?} at {slot} during a drag");
            return Err(PlacementError::DragInProgress);
        }
        let replaced = self.placement.place(item, slot)?;
        debug_assert!(self.placement.is_bijective());
        Ok(replaced)
    }

    pub fn item_count(&self) -> usize {
        self.placement.len()
    }

    pub fn region_count(&self, region: Region) -> usize {
        self.placement.region_count(region)
    }

    pub fn items(&self) -> &[I] {
        self.placement.as_slice()
    }

    pub fn item_at(&self, slot: usize) -> Option<I> {
        self.placement.get(slot)
    }

    pub fn slot_of(&self, item: I) -> Option<usize> {
        self.placement.slot_of(item)
    }

    pub fn placement(&self) -> &Placement<I> {
        &self.placement
    }

    pub fn session(&self) -> Option<&DragSession<I>> {
        self.session.as_ref()
    }

    pub fn dragged_item(&self) -> Option<I> {
        self.session.map(|session| session.item)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> EnginePhase {
        match &self.session {
            None => EnginePhase::Idle,
            Some(session) if session.pending_swap.is_some() => EnginePhase::SwapPreview,
            Some(_) => EnginePhase::Dragging,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Snaps every placed item to its slot, as after a layout pass.
    pub fn layout_all(&mut self) {
        let layout = self.layout();
        for (slot, &item) in self.placement.as_slice().iter().enumerate() {
            self.sink.place_immediately(item, layout.position_of(slot));
        }
    }

    /// Picks up the item at `slot`. Ignored while a drag is active or when
    /// the slot is empty.
    pub fn begin_drag(&mut self, slot: usize) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(item) = self.placement.get(slot) else {
            return false;
        };
        self.session = Some(DragSession {
            item,
            origin_slot: slot,
            home_slot: slot,
            pending_swap: None,
        });
        self.sink.pickup_effect(item);
        debug!("drag started: {item:?} at slot {slot}");
        true
    }

    /// Follows the pointer to `point`. Returns whether the placement changed.
    pub fn update_drag(&mut self, point: Point) -> bool {
        if self.session.is_none() {
            return false;
        }
        match self.slot_at(point) {
            Some(target) => self.step_to(target),
            None => false,
        }
    }

    /// Drops the dragged item and returns its final slot. A point outside
    /// every cell drops it at the last slot of the region it occupies.
    pub fn end_drag(&mut self, point: Point) -> Option<usize> {
        let session = self.session?;
        let layout = self.layout();
        let target = layout.slot_at(point).or_else(|| {
            layout
                .region_of(session.current_slot())
                .and_then(|region| layout.last_slot(region))
        });
        if let Some(target) = target {
            self.step_to(target);
        }
        self.finish()
    }

    /// Ends the drag where the item currently sits.
    pub fn cancel_drag(&mut self) -> Option<usize> {
        self.finish()
    }

    fn finish(&mut self) -> Option<usize> {
        let session = self.session.take()?;
        let slot = session.current_slot();
        let layout = self.layout();
        self.sink.place_immediately(session.item, layout.position_of(slot));
        self.sink.clear_effect(session.item);
        debug!(
            "drag finished: {:?} from slot {} to slot {}",
            session.item, session.origin_slot, slot
        );
        debug_assert!(self.placement.is_bijective());
        Some(slot)
    }

    fn step_to(&mut self, target: usize) -> bool {
        let Some(mut session) = self.session else {
            return false;
        };
        if session.current_slot() == target {
            return false;
        }
        let layout = self.layout();
        let (Some(home_region), Some(target_region)) =
            (layout.region_of(session.home_slot), layout.region_of(target))
        else {
            return false;
        };

        let mut changed = self.undo_pending_swap(&mut session, &layout);
        if target_region == home_region {
            if target != session.home_slot {
                self.shift(&session, target, &layout);
                session.home_slot = target;
                changed = true;
            }
        } else {
            self.preview_swap(&mut session, target, &layout);
            changed = true;
        }

        self.session = Some(session);
        debug_assert!(self.placement.is_bijective());
        debug_assert_eq!(self.placement.get(session.current_slot()), Some(session.item));
        changed
    }

    fn shift(&mut self, session: &DragSession<I>, target: usize, layout: &RegionLayout) {
        let home = session.home_slot;
        trace!("shift {:?}: {home} -> {target}", session.item);
        if target < home {
            for slot in target..home {
                self.animate_slot(slot, slot + 1, layout);
            }
        } else {
            for slot in (home + 1..=target).rev() {
                self.animate_slot(slot, slot - 1, layout);
            }
        }
        self.placement.shift(home, target);
    }

    fn preview_swap(&mut self, session: &mut DragSession<I>, target: usize, layout: &RegionLayout) {
        let Some(displaced) = self.placement.get(target) else {
            return;
        };
        trace!(
            "preview swap {:?} at {} with {displaced:?} at {target}",
            session.item,
            session.home_slot
        );
        self.animate_slot(target, session.home_slot, layout);
        self.placement.swap(session.home_slot, target);
        session.pending_swap = Some(PendingSwap {
            slot: target,
            displaced,
        });
    }

    fn undo_pending_swap(&mut self, session: &mut DragSession<I>, layout: &RegionLayout) -> bool {
        let Some(pending) = session.pending_swap.take() else {
            return false;
        };
        debug_assert_eq!(self.placement.get(session.home_slot), Some(pending.displaced));
        trace!("undo swap preview at {}", pending.slot);
        self.animate_slot(session.home_slot, pending.slot, layout);
        self.placement.swap(session.home_slot, pending.slot);
        true
    }

    /// Requests the move animation for whatever occupies `from` before the
    /// placement is rewritten.
    fn animate_slot(&mut self, from: usize, to: usize, layout: &RegionLayout) {
        if let Some(item) = self.placement.get(from) {
            self.sink.animate_move(
                item,
                layout.position_of(from),
                layout.position_of(to),
                self.animation_duration,
            );
        }
    }
}
