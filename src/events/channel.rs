//! Progress channel between the pipeline and whoever renders it.
//!
//! Backed by an unbounded crossbeam channel: the pipeline emits a handful of
//! events per run, so it never needs to wait on a slow listener.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Pipeline side of the channel. Cheap to clone.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Emit an event; dropped silently once the receiver is gone.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Listener side of the channel.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once every sender dropped
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Next event if one is already queued
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Events until every sender dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Creates connected sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender whose receiver is already gone, for runs nobody watches.
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{OutputEvent, PipelineEvent, PipelinePhase};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn pipeline_thread_reaches_listener() {
        let (sender, receiver) = EventChannel::new();

        thread::spawn(move || {
            sender.send(Event::Output(OutputEvent::ArtifactWritten {
                path: PathBuf::from("output/diff_img1.png"),
            }));
        })
        .join()
        .unwrap();

        match receiver.recv() {
            Some(Event::Output(OutputEvent::ArtifactWritten { path })) => {
                assert_eq!(path, PathBuf::from("output/diff_img1.png"));
            }
            other => panic!("Expected ArtifactWritten, got {:?}", other),
        }
    }

    #[test]
    fn null_sender_discards_events() {
        null_sender().send(Event::Pipeline(PipelineEvent::Started));
    }

    #[test]
    fn try_recv_only_returns_queued_events() {
        let (sender, receiver) = EventChannel::new();
        assert!(receiver.try_recv().is_none());

        sender.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Comparing,
        }));

        assert!(matches!(
            receiver.try_recv(),
            Some(Event::Pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Comparing
            }))
        ));
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn iterator_ends_when_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        sender.send(Event::Pipeline(PipelineEvent::Started));
        drop(sender);

        assert_eq!(receiver.iter().count(), 1);
        assert!(receiver.recv().is_none());
    }
}
