//! Per-frame update events
//!
//! The host fires one tick per rendered frame. Everything here runs on the
//! host's frame thread; none of these types are `Send`.

use std::cell::{Cell, RefCell};

use tracing::trace;

/// Identifies one subscription for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Source of frame-tick events
pub trait FrameTickSource {
    fn subscribe(&self, callback: Box<dyn FnMut()>) -> TickHandle;

    /// Remove a subscription; unknown handles are ignored
    fn unsubscribe(&self, handle: TickHandle);
}

impl<T: FrameTickSource + ?Sized> FrameTickSource for &T {
    fn subscribe(&self, callback: Box<dyn FnMut()>) -> TickHandle {
        (**self).subscribe(callback)
    }

    fn unsubscribe(&self, handle: TickHandle) {
        (**self).unsubscribe(handle)
    }
}

impl<T: FrameTickSource + ?Sized> FrameTickSource for std::rc::Rc<T> {
    fn subscribe(&self, callback: Box<dyn FnMut()>) -> TickHandle {
        (**self).subscribe(callback)
    }

    fn unsubscribe(&self, handle: TickHandle) {
        (**self).unsubscribe(handle)
    }
}

/// Single-threaded tick dispatcher driven by the owner's frame loop
#[derive(Default)]
pub struct FrameTicker {
    subscribers: RefCell<Vec<(TickHandle, Box<dyn FnMut()>)>>,
    next_id: Cell<u64>,
    frame: Cell<u64>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire one frame tick to every subscriber, in subscription order.
    ///
    /// Subscribers must not subscribe or unsubscribe from inside the callback.
    pub fn tick(&self) {
        self.frame.set(self.frame.get() + 1);
        trace!("Frame {}", self.frame.get());
        for (_, callback) in self.subscribers.borrow_mut().iter_mut() {
            callback();
        }
    }

    /// Number of ticks fired so far
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl FrameTickSource for FrameTicker {
    fn subscribe(&self, callback: Box<dyn FnMut()>) -> TickHandle {
        let handle = TickHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.subscribers.borrow_mut().push((handle, callback));
        handle
    }

    fn unsubscribe(&self, handle: TickHandle) {
        self.subscribers.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

impl std::fmt::Debug for FrameTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTicker")
            .field("subscribers", &self.subscriber_count())
            .field("frame", &self.frame.get())
            .finish()
    }
}
