use crate::geometry::Point;
use crossbeam_channel::Sender;
use std::time::Duration;

/// Visual work the engine asks the renderer to do. Requests are fire and
/// forget; a new move on an item supersedes whatever it was playing.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRequest<I> {
    AnimateMove {
        item: I,
        from: Point,
        to: Point,
        duration: Duration,
    },
    PickupEffect(I),
    ClearEffect(I),
    PlaceImmediately { item: I, at: Point },
}

impl<I: Copy> RenderRequest<I> {
    pub fn item(&self) -> I {
        match self {
            RenderRequest::AnimateMove { item, .. } => *item,
            RenderRequest::PickupEffect(item) => *item,
            RenderRequest::ClearEffect(item) => *item,
            RenderRequest::PlaceImmediately { item, .. } => *item,
        }
    }
}

pub trait RenderSink<I> {
    fn submit(&mut self, request: RenderRequest<I>);

    fn animate_move(&mut self, item: I, from: Point, to: Point, duration: Duration) {
        self.submit(RenderRequest::AnimateMove {
            item,
            from,
            to,
            duration,
        });
    }

    fn pickup_effect(&mut self, item: I) {
        self.submit(RenderRequest::PickupEffect(item));
    }

    fn clear_effect(&mut self, item: I) {
        self.submit(RenderRequest::ClearEffect(item));
    }

    fn place_immediately(&mut self, item: I, at: Point) {
        self.submit(RenderRequest::PlaceImmediately { item, at });
    }
}

impl<I> RenderSink<I> for Vec<RenderRequest<I>> {
    fn submit(&mut self, request: RenderRequest<I>) {
        self.push(request);
    }
}

impl<I> RenderSink<I> for Sender<RenderRequest<I>> {
    fn submit(&mut self, request: RenderRequest<I>) {
        let _ = self.send(request);
    }
}
