use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;

use alms_types::AccountId;

use crate::event::{EventKind, EventPayload, LedgerEvent};

/// Filter for subscribing to a subset of ledger events.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// If set, only events of these kinds are delivered.
    pub kinds: Option<Vec<EventKind>>,
    /// If set, only events concerning these donors are delivered.
    pub donors: Option<Vec<AccountId>>,
    /// If set, only events with a sequence number beyond this one are delivered.
    pub since_seq: Option<u64>,
}

impl EventFilter {
    /// Returns `true` if the given event matches this filter.
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        if let Some(ref donors) = self.donors {
            match event.payload.donor() {
                Some(donor) if donors.contains(donor) => {}
                _ => return false,
            }
        }
        if let Some(since) = self.since_seq {
            if event.seq <= since {
                return false;
            }
        }
        true
    }
}

/// A broadcast channel receiver for ledger events.
pub type EventStream = broadcast::Receiver<LedgerEvent>;

/// Internal subscriber: a filter paired with a broadcast sender.
struct Subscriber {
    filter: EventFilter,
    sender: broadcast::Sender<LedgerEvent>,
}

/// Fan-out router that delivers events to matching subscribers.
struct EventRouter {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventRouter {
    fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register a new subscriber with the given filter.
    /// Returns a broadcast receiver for the matching events.
    fn subscribe(&self, filter: EventFilter, capacity: usize) -> EventStream {
        let (tx, rx) = broadcast::channel(capacity);
        let sub = Subscriber { filter, sender: tx };
        self.subscribers
            .write()
            .expect("router lock poisoned")
            .push(sub);
        rx
    }

    /// Route an event to all matching subscribers.
    /// Subscribers whose channels are closed are pruned.
    fn route(&self, event: &LedgerEvent) {
        let mut subs = self.subscribers.write().expect("router lock poisoned");
        subs.retain(|sub| {
            if sub.filter.matches(event) {
                // If send fails (no receivers), the subscriber is stale.
                sub.sender.send(event.clone()).is_ok()
            } else {
                // Keep non-matching subscribers; they may match future events.
                // Only prune if the channel itself is closed.
                sub.sender.receiver_count() > 0
            }
        });
    }

    /// Number of active subscribers.
    fn subscriber_count(&self) -> usize {
        self.subscribers.read().expect("router lock poisoned").len()
    }
}

/// Configuration for the [`EventHub`].
#[derive(Clone, Debug)]
pub struct EventHubConfig {
    /// Capacity of per-subscriber broadcast channels.
    pub channel_capacity: usize,
}

impl Default for EventHubConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

/// Central notification hub: stamps events with a monotonically increasing
/// sequence number and fans them out to matching subscribers.
pub struct EventHub {
    seq: AtomicU64,
    router: EventRouter,
    config: EventHubConfig,
}

impl EventHub {
    /// Create a new hub with the given configuration.
    pub fn new(config: EventHubConfig) -> Self {
        Self {
            seq: AtomicU64::new(0),
            router: EventRouter::new(),
            config,
        }
    }

    /// Emit a single event through the hub.
    ///
    /// The event is stamped with the next sequence number and routed to
    /// matching subscribers.
    pub fn emit(&self, payload: EventPayload) -> LedgerEvent {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let event = LedgerEvent::new(seq, payload);
        self.router.route(&event);
        debug!(id = %event.id, kind = %event.kind, seq, "event emitted");
        event
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> EventStream {
        self.router.subscribe(filter, self.config.channel_capacity)
    }

    /// Sequence number of the most recently emitted event (0 if none).
    pub fn last_seq(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.router.subscriber_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(EventHubConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alms_types::{Amount, TokenId};

    fn donation(donor: AccountId, amount: Amount) -> EventPayload {
        EventPayload::Donation { donor, amount }
    }

    #[test]
    fn emit_assigns_increasing_sequence_numbers() {
        let hub = EventHub::default();
        let donor = AccountId::ephemeral();

        let e1 = hub.emit(donation(donor, 1));
        let e2 = hub.emit(donation(donor, 2));

        assert_eq!(e1.seq, 1);
        assert_eq!(e2.seq, 2);
        assert_eq!(hub.last_seq(), 2);
    }

    #[test]
    fn subscriber_receives_matching_events() {
        let hub = EventHub::default();
        let donor = AccountId::ephemeral();
        let mut stream = hub.subscribe(EventFilter::default());

        let emitted = hub.emit(donation(donor, 5));
        let received = stream.try_recv().unwrap();
        assert_eq!(received, emitted);
        assert!(received.verify_integrity());
    }

    #[test]
    fn kind_filter_drops_other_kinds() {
        let hub = EventHub::default();
        let donor = AccountId::ephemeral();
        let token = TokenId::ephemeral();
        let mut stream = hub.subscribe(EventFilter {
            kinds: Some(vec![EventKind::TokenDonationReceived]),
            ..Default::default()
        });

        hub.emit(donation(donor, 1));
        hub.emit(EventPayload::TokenDonation {
            donor,
            token,
            amount: 2,
        });

        let received = stream.try_recv().unwrap();
        assert_eq!(received.kind, EventKind::TokenDonationReceived);
        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn donor_filter_drops_other_donors() {
        let hub = EventHub::default();
        let watched = AccountId::ephemeral();
        let other = AccountId::ephemeral();
        let mut stream = hub.subscribe(EventFilter {
            donors: Some(vec![watched]),
            ..Default::default()
        });

        hub.emit(donation(other, 1));
        hub.emit(donation(watched, 2));

        let received = stream.try_recv().unwrap();
        assert_eq!(received.payload.donor(), Some(&watched));
        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn since_seq_filter_skips_early_events() {
        let hub = EventHub::default();
        let donor = AccountId::ephemeral();
        let mut stream = hub.subscribe(EventFilter {
            since_seq: Some(1),
            ..Default::default()
        });

        hub.emit(donation(donor, 1));
        let e2 = hub.emit(donation(donor, 2));

        assert_eq!(stream.try_recv().unwrap(), e2);
        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let hub = EventHub::default();
        let donor = AccountId::ephemeral();
        {
            let _stream = hub.subscribe(EventFilter::default());
        }
        assert_eq!(hub.subscriber_count(), 1);

        hub.emit(donation(donor, 1));
        assert_eq!(hub.subscriber_count(), 0);
    }
}
