use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;
use planb_types::WidgetEvent;
use tokio::sync::mpsc;

pub(crate) fn channel() -> (mpsc::UnboundedSender<WidgetEvent>, WidgetEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, WidgetEvents { receiver: rx })
}

/// Notifications emitted by a widget, in emission order
pub struct WidgetEvents {
    receiver: mpsc::UnboundedReceiver<WidgetEvent>,
}

impl WidgetEvents {
    /// Poll for the next event (non-blocking).
    ///
    /// Returns `None` if no event is available immediately.
    pub fn try_next(&mut self) -> Option<WidgetEvent> {
        self.receiver.try_recv().ok()
    }

    /// Take every event emitted so far.
    pub fn drain(&mut self) -> Vec<WidgetEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

impl Stream for WidgetEvents {
    type Item = WidgetEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
