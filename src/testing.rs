//! Test doubles: synchronous publishers and a recording subscriber.
//!
//! Publishers here drive emission from inside `subscribe`, after the
//! subscriber's `on_subscribe` has returned, and stop as soon as demand runs
//! out or the subscription is cancelled.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StreamError;
use crate::reactive::{Publisher, Signal, Subscriber, Subscription};

/// Shared counter usable as hook state.
#[derive(Debug, Default, Clone)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Subscription that tracks outstanding demand and cancellation.
#[derive(Debug, Default)]
pub struct Demand {
    pub(crate) requested: AtomicU64,
    outstanding: AtomicU64,
    cancelled: AtomicBool,
}

impl Demand {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn total_requested(&self) -> u64 {
        self.requested.load(Ordering::SeqCst)
    }

    /// Consumes one unit of demand; `false` if none is left.
    fn take(&self) -> bool {
        self.outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Subscription for Demand {
    fn request(&self, n: u64) {
        if self.is_cancelled() {
            return;
        }
        let add = |cur: u64| Some(cur.saturating_add(n));
        let _ = self.requested.fetch_update(Ordering::SeqCst, Ordering::SeqCst, add);
        let _ = self.outstanding.fetch_update(Ordering::SeqCst, Ordering::SeqCst, add);
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Emits a fixed list of items, then completes.
pub struct Just<T> {
    items: Vec<T>,
    last: Mutex<Option<Arc<Demand>>>,
}

impl<T> Just<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            last: Mutex::new(None),
        }
    }

    /// Subscription handed to the most recent subscriber.
    pub fn demand(&self) -> Arc<Demand> {
        self.last
            .lock()
            .unwrap()
            .clone()
            .expect("no subscriber yet")
    }
}

impl<T: Clone + Send + Sync> Publisher<T> for Just<T> {
    fn subscribe(&self, mut subscriber: Box<dyn Subscriber<T>>) -> Signal {
        let demand = Arc::new(Demand::default());
        *self.last.lock().unwrap() = Some(Arc::clone(&demand));

        subscriber.on_subscribe(demand.clone())?;
        for item in &self.items {
            if demand.is_cancelled() || !demand.take() {
                return Ok(());
            }
            subscriber.on_next(item.clone())?;
        }
        if demand.is_cancelled() {
            return Ok(());
        }
        subscriber.on_complete()
    }
}

/// Completes immediately.
pub struct Empty;

impl<T> Publisher<T> for Empty {
    fn subscribe(&self, mut subscriber: Box<dyn Subscriber<T>>) -> Signal {
        subscriber.on_subscribe(Arc::new(Demand::default()))?;
        subscriber.on_complete()
    }
}

/// Subscribes and never signals again.
pub struct Never;

impl<T> Publisher<T> for Never {
    fn subscribe(&self, mut subscriber: Box<dyn Subscriber<T>>) -> Signal {
        subscriber.on_subscribe(Arc::new(Demand::default()))
    }
}

/// Fails immediately with a fixed error.
pub struct Failing(StreamError);

impl Failing {
    pub fn new(err: StreamError) -> Self {
        Self(err)
    }
}

impl<T> Publisher<T> for Failing {
    fn subscribe(&self, mut subscriber: Box<dyn Subscriber<T>>) -> Signal {
        subscriber.on_subscribe(Arc::new(Demand::default()))?;
        subscriber.on_error(self.0.clone())
    }
}

struct Log<T> {
    subscription: Option<Arc<dyn Subscription>>,
    subscriptions: usize,
    values: Vec<T>,
    errors: Vec<StreamError>,
    completions: usize,
}

/// Read side of a [`Recorder`].
pub struct Recorded<T>(Arc<Mutex<Log<T>>>);

impl<T: Clone> Recorded<T> {
    pub fn values(&self) -> Vec<T> {
        self.0.lock().unwrap().values.clone()
    }

    pub fn errors(&self) -> Vec<StreamError> {
        self.0.lock().unwrap().errors.clone()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(StreamError::message).collect()
    }

    pub fn completions(&self) -> usize {
        self.0.lock().unwrap().completions
    }

    pub fn subscriptions(&self) -> usize {
        self.0.lock().unwrap().subscriptions
    }

    pub fn subscription(&self) -> Option<Arc<dyn Subscription>> {
        self.0.lock().unwrap().subscription.clone()
    }
}

/// Subscriber that records every signal it receives.
pub struct Recorder<T> {
    log: Arc<Mutex<Log<T>>>,
    initial_request: u64,
}

impl<T> Recorder<T> {
    /// Recorder requesting unbounded demand on subscribe.
    pub fn new() -> (Self, Recorded<T>) {
        Self::with_initial_request(u64::MAX)
    }

    pub fn with_initial_request(n: u64) -> (Self, Recorded<T>) {
        let log = Arc::new(Mutex::new(Log {
            subscription: None,
            subscriptions: 0,
            values: Vec::new(),
            errors: Vec::new(),
            completions: 0,
        }));
        let recorder = Self {
            log: Arc::clone(&log),
            initial_request: n,
        };
        (recorder, Recorded(log))
    }
}

impl<T: Send> Subscriber<T> for Recorder<T> {
    fn on_subscribe(&mut self, subscription: Arc<dyn Subscription>) -> Signal {
        {
            let mut log = self.log.lock().unwrap();
            log.subscriptions += 1;
            log.subscription = Some(Arc::clone(&subscription));
        }
        if self.initial_request > 0 {
            subscription.request(self.initial_request);
        }
        Ok(())
    }

    fn on_next(&mut self, item: T) -> Signal {
        self.log.lock().unwrap().values.push(item);
        Ok(())
    }

    fn on_error(&mut self, error: StreamError) -> Signal {
        self.log.lock().unwrap().errors.push(error);
        Ok(())
    }

    fn on_complete(&mut self) -> Signal {
        self.log.lock().unwrap().completions += 1;
        Ok(())
    }
}
