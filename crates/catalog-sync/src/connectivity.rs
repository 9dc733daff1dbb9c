//! Network connectivity monitoring
//!
//! There is no native reachability primitive in the target environment, so the
//! monitor periodically probes a TCP endpoint and debounces the result. State
//! changes are published through a watch channel; the sync engine's watcher
//! task is the single context that turns transitions into state mutation.

use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, watch};
use tokio::time::interval;
use tracing::{debug, info, warn};

/// Configuration for the probe monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Address probed with a plain TCP connect
    pub probe_addr: String,
    /// Time between probes
    pub interval: Duration,
    /// Per-probe connect timeout
    pub timeout: Duration,
    /// Consecutive disagreeing samples required before flipping state
    pub debounce: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            probe_addr: "app.getswipe.in:443".to_string(),
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(3),
            debounce: 2,
        }
    }
}

/// Read side of the connectivity state.
///
/// `is_connected` reports the current value; `subscribe` yields a receiver
/// that fires on every transition.
#[derive(Debug, Clone)]
pub struct ConnectivityHandle {
    rx: watch::Receiver<bool>,
}

impl ConnectivityHandle {
    /// Current connectivity state
    pub fn is_connected(&self) -> bool {
        *self.rx.borrow()
    }

    /// Receiver that fires on every state transition
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }

    /// Handle driven by the caller instead of a probe loop.
    ///
    /// Returns the sender so tests and environments that already know their
    /// connectivity can flip the state directly.
    pub fn manual(initial: bool) -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(initial);
        (Self { rx }, tx)
    }
}

/// Background monitor probing a TCP endpoint on an interval
pub struct ProbeMonitor {
    config: MonitorConfig,
    tx: watch::Sender<bool>,
    debouncer: Debouncer,
}

impl ProbeMonitor {
    /// Create a monitor and the handle observing it.
    ///
    /// The initial state is connected; the first probes correct it if not.
    pub fn new(config: MonitorConfig) -> (Self, ConnectivityHandle) {
        let (tx, rx) = watch::channel(true);
        let debouncer = Debouncer::new(true, config.debounce);
        (
            Self {
                config,
                tx,
                debouncer,
            },
            ConnectivityHandle { rx },
        )
    }

    /// Run the probe loop until shutdown is signaled
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        info!(
            probe_addr = %self.config.probe_addr,
            interval_secs = self.config.interval.as_secs(),
            "Starting connectivity monitor"
        );

        let mut ticker = interval(self.config.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let up = self.probe().await;
                    if let Some(state) = self.debouncer.observe(up) {
                        if state {
                            info!("Connectivity restored");
                        } else {
                            warn!("Connectivity lost");
                        }
                        // send_replace never fails even with no subscribers
                        self.tx.send_replace(state);
                    }
                }
                _ = shutdown.recv() => {
                    info!("Shutting down connectivity monitor");
                    break;
                }
            }
        }
    }

    /// Single connect attempt against the probe address
    async fn probe(&self) -> bool {
        match tokio::time::timeout(
            self.config.timeout,
            TcpStream::connect(&self.config.probe_addr),
        )
        .await
        {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(error = %e, "Connectivity probe failed");
                false
            }
            Err(_) => {
                debug!("Connectivity probe timed out");
                false
            }
        }
    }

    /// One immediate probe, bypassing the debouncer.
    ///
    /// Used by short-lived callers that cannot wait for the loop to settle.
    pub async fn check_now(&self) -> bool {
        let up = self.probe().await;
        self.tx.send_replace(up);
        up
    }
}

/// Requires N consecutive disagreeing samples before flipping state
#[derive(Debug)]
struct Debouncer {
    current: bool,
    streak: u32,
    threshold: u32,
}

impl Debouncer {
    fn new(initial: bool, threshold: u32) -> Self {
        Self {
            current: initial,
            streak: 0,
            threshold: threshold.max(1),
        }
    }

    /// Feed one sample; returns the new state when it flips.
    fn observe(&mut self, sample: bool) -> Option<bool> {
        if sample == self.current {
            self.streak = 0;
            return None;
        }

        self.streak += 1;
        if self.streak >= self.threshold {
            self.current = sample;
            self.streak = 0;
            Some(sample)
        } else {
            None
        }
    }
}
