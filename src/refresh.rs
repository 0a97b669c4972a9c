//! Refresh Orchestrator
//!
//! Runs refresh cycles over every panel: on start, on a fixed timer and on
//! demand. A cycle marks the refresh icon busy, loads all panels
//! concurrently, waits for every one to settle, then clears the indicator
//! and stamps the last-updated time.
//!
//! Triggers that arrive while a cycle is running are coalesced: at most one
//! follow-up cycle runs afterwards, however many triggers came in.
//!
//! A separate clock task rewrites the live clock once a second,
//! independently of data refreshes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::dashboard::Dashboard;
use crate::document::ids;
use crate::format::{format_clock, format_time_of_day, format_uptime};
use crate::views::{Panel, PanelOutcome};

/// Class that spins the refresh icon
pub const BUSY_CLASS: &str = "fa-spin";

/// Refresh timing
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub clock_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            clock_interval: Duration::from_secs(1),
        }
    }
}

/// What started a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Initial,
    Timer,
    Manual,
    /// Follow-up for triggers coalesced during an earlier cycle
    Queued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Refreshing,
}

/// Summary of one refresh cycle
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub cycle: u64,
    pub trigger: Trigger,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub panels: Vec<PanelOutcome>,
}

impl RefreshReport {
    pub fn failed(&self) -> usize {
        self.panels.iter().filter(|p| !p.is_rendered()).count()
    }
}

/// Result of asking for a refresh
#[derive(Debug, Clone)]
pub enum TriggerOutcome {
    /// A cycle ran for this trigger
    Completed(RefreshReport),
    /// A cycle was already running; a follow-up is scheduled
    Queued,
    /// The cycle task panicked before finishing
    Interrupted,
}

struct CycleState {
    phase: Phase,
    pending: bool,
}

/// Handles for the background tasks started by [`RefreshOrchestrator::start`]
pub struct BackgroundTasks {
    pub refresh: JoinHandle<()>,
    pub clock: JoinHandle<()>,
}

pub struct RefreshOrchestrator {
    dashboard: Arc<Dashboard>,
    config: RefreshConfig,
    state: Mutex<CycleState>,
    cycles: AtomicU64,
    last_report: RwLock<Option<RefreshReport>>,
    running: RwLock<bool>,
    created: Instant,
}

impl RefreshOrchestrator {
    pub fn new(dashboard: Arc<Dashboard>, config: RefreshConfig) -> Self {
        Self {
            dashboard,
            config,
            state: Mutex::new(CycleState {
                phase: Phase::Idle,
                pending: false,
            }),
            cycles: AtomicU64::new(0),
            last_report: RwLock::new(None),
            running: RwLock::new(false),
            created: Instant::now(),
        }
    }

    pub fn dashboard(&self) -> &Arc<Dashboard> {
        &self.dashboard
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }

    /// Number of cycles run so far
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    pub async fn last_report(&self) -> Option<RefreshReport> {
        self.last_report.read().await.clone()
    }

    /// Request a refresh.
    ///
    /// Runs a cycle now if idle, along with any follow-up queued while it
    /// ran, and returns the report for this trigger's cycle. If a cycle is
    /// already running, schedules one follow-up and returns immediately.
    ///
    /// The cycles run on their own task, so dropping the returned future
    /// does not leave the orchestrator stuck in [`Phase::Refreshing`].
    pub async fn trigger(self: &Arc<Self>, trigger: Trigger) -> TriggerOutcome {
        {
            let mut state = self.state.lock().await;
            if state.phase == Phase::Refreshing {
                state.pending = true;
                tracing::debug!(trigger = ?trigger, "Refresh in progress, queued follow-up");
                return TriggerOutcome::Queued;
            }
            state.phase = Phase::Refreshing;
        }

        let orchestrator = Arc::clone(self);
        let cycles = tokio::spawn(async move { orchestrator.run_cycles(trigger).await });

        match cycles.await {
            Ok(report) => TriggerOutcome::Completed(report),
            Err(e) => {
                tracing::error!(error = %e, "Refresh cycle task failed");
                self.recover().await;
                TriggerOutcome::Interrupted
            }
        }
    }

    /// Run one cycle, then the follow-ups queued meanwhile, then go idle
    async fn run_cycles(&self, trigger: Trigger) -> RefreshReport {
        let report = self.run_cycle(trigger).await;

        loop {
            {
                let mut state = self.state.lock().await;
                if !state.pending {
                    state.phase = Phase::Idle;
                    break;
                }
                state.pending = false;
            }
            self.run_cycle(Trigger::Queued).await;
        }

        report
    }

    /// Back to idle after a cycle task died
    async fn recover(&self) {
        self.dashboard
            .document()
            .write()
            .await
            .remove_class(ids::REFRESH_ICON, BUSY_CLASS);

        let mut state = self.state.lock().await;
        state.phase = Phase::Idle;
        state.pending = false;
    }

    async fn run_cycle(&self, trigger: Trigger) -> RefreshReport {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        let started_at = Utc::now();
        let start = Instant::now();

        self.dashboard
            .document()
            .write()
            .await
            .add_class(ids::REFRESH_ICON, BUSY_CLASS);

        let panels = self.dashboard.load_all(&Panel::ALL).await;

        {
            let mut doc = self.dashboard.document().write().await;
            doc.remove_class(ids::REFRESH_ICON, BUSY_CLASS);
            doc.set_text(ids::LAST_UPDATED, format_time_of_day(Utc::now()));
            doc.set_text(ids::STAT_UPTIME, self.uptime_text());
        }

        let report = RefreshReport {
            cycle,
            trigger,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            panels,
        };

        tracing::info!(
            cycle,
            trigger = ?trigger,
            duration_ms = report.duration_ms,
            failed = report.failed(),
            "Refresh cycle complete"
        );

        *self.last_report.write().await = Some(report.clone());
        report
    }

    /// How long this dashboard has been up, e.g. `2h 5m`
    fn uptime_text(&self) -> String {
        chrono::Duration::from_std(self.created.elapsed())
            .map(format_uptime)
            .unwrap_or_default()
    }

    /// Write the live clock
    pub async fn tick_clock(&self, now: DateTime<Utc>) {
        self.dashboard
            .document()
            .write()
            .await
            .set_text(ids::CURRENT_TIME, format_clock(now));
    }

    /// Start the refresh timer and the clock.
    ///
    /// The refresh task runs the initial cycle, then triggers a cycle every
    /// interval. Each tick spawns its trigger so a slow cycle does not hold
    /// back the timer.
    pub async fn start(self: Arc<Self>) -> BackgroundTasks {
        *self.running.write().await = true;

        let orchestrator = self.clone();
        let refresh = tokio::spawn(async move {
            orchestrator.trigger(Trigger::Initial).await;

            let period = orchestrator.config.interval;
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                if !*orchestrator.running.read().await {
                    break;
                }

                let orchestrator = orchestrator.clone();
                tokio::spawn(async move {
                    orchestrator.trigger(Trigger::Timer).await;
                });
            }

            tracing::debug!("Refresh timer stopped");
        });

        let orchestrator = self.clone();
        let clock = tokio::spawn(async move {
            let mut interval = tokio::time::interval(orchestrator.config.clock_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                if !*orchestrator.running.read().await {
                    break;
                }

                orchestrator.tick_clock(Utc::now()).await;
            }
        });

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "Refresh orchestrator started"
        );

        BackgroundTasks { refresh, clock }
    }

    /// Stop the background tasks at their next tick
    pub async fn stop(&self) {
        *self.running.write().await = false;
    }
}
