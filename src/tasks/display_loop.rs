//! Client display loop

use std::{future::Future, time::Duration};
use futures::future::join_all;
use tokio::{
    task::JoinHandle,
    time::{interval, timeout, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    client::{Controller, Effect, EndTimeCache, Screen, ServerNotifier},
    utils::{now_millis, shutdown_signal},
};

/// How often the remaining time is recomputed
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Owns a controller and carries out the effects of its transitions
pub struct CountdownRunner<S: Screen> {
    controller: Controller,
    cache: EndTimeCache,
    screen: S,
    notifier: Option<ServerNotifier>,
    ticking: bool,
    pending: Vec<JoinHandle<()>>,
}

impl<S: Screen> CountdownRunner<S> {
    pub fn new(
        controller: Controller,
        cache: EndTimeCache,
        screen: S,
        notifier: Option<ServerNotifier>,
    ) -> Self {
        Self {
            controller,
            cache,
            screen,
            notifier,
            ticking: false,
            pending: Vec::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Restore from the local cache
    pub fn resume(&mut self, now: i64) {
        let cached = self.cache.read();
        let effects = self.controller.resume(cached.as_deref(), now);
        self.apply(effects);
    }

    /// Ask the server for a running countdown when none is running locally
    pub async fn sync_with_server(&mut self) {
        if !self.controller.start_enabled() {
            return;
        }
        let Some(notifier) = &self.notifier else {
            return;
        };

        match notifier.fetch_status().await {
            Ok(status) => {
                let effects = self.controller.adopt_remote(status.end_time, now_millis());
                self.apply(effects);
            }
            Err(e) => warn!("Could not fetch countdown from server: {:#}", e),
        }
    }

    /// Start a new countdown from `now`
    pub fn start(&mut self, now: i64) {
        let effects = self.controller.start(now);
        self.apply(effects);
    }

    /// Recompute the display at `now`
    pub fn tick(&mut self, now: i64) {
        let effects = self.controller.tick(now);
        self.apply(effects);
    }

    /// Carry out effects in order
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTicking => self.ticking = true,
                Effect::StopTicking => self.ticking = false,
                Effect::WriteCache(end_time) => {
                    if let Err(e) = self.cache.write(end_time) {
                        warn!("Failed to write cache {}: {}", self.cache.path().display(), e);
                    }
                }
                Effect::ClearCache => {
                    if let Err(e) = self.cache.clear() {
                        warn!("Failed to clear cache {}: {}", self.cache.path().display(), e);
                    }
                }
                Effect::NotifyServer(end_time) => self.notify(end_time),
                Effect::Render(time) => self.screen.show_time(time),
                Effect::Status(status) => self.screen.show_status(status),
            }
        }
    }

    /// Fire-and-forget start notification; the outcome is only logged
    fn notify(&mut self, end_time: i64) {
        let Some(notifier) = self.notifier.clone() else {
            debug!("Offline, not notifying server of end time {}", end_time);
            return;
        };

        self.pending.retain(|handle| !handle.is_finished());
        self.pending.push(tokio::spawn(async move {
            match notifier.notify_start(end_time).await {
                Ok(outcome) => info!("Server recorded end time {:?}", outcome.end_time),
                Err(e) => warn!("Error updating server: {:#}", e),
            }
        }));
    }

    /// Tick until the countdown ends or a shutdown signal arrives
    pub async fn run(&mut self) {
        self.run_until(shutdown_signal()).await;
    }

    /// Tick until the countdown ends or `shutdown` resolves
    pub async fn run_until<F: Future<Output = ()>>(&mut self, shutdown: F) {
        if !self.ticking {
            debug!("Nothing to display, display loop not started");
            return;
        }

        info!("Starting display loop");
        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        while self.ticking {
            tokio::select! {
                _ = ticker.tick() => self.tick(now_millis()),
                _ = &mut shutdown => {
                    info!("Shutdown requested, leaving display loop");
                    break;
                }
            }
        }
    }

    /// Give outstanding notifications up to `grace` to complete
    pub async fn drain_notifications(&mut self, grace: Duration) {
        let pending: Vec<_> = self.pending.drain(..).collect();
        if pending.is_empty() {
            return;
        }

        debug!("Waiting for {} server notification(s)", pending.len());
        if timeout(grace, join_all(pending)).await.is_err() {
            warn!("Server notification still in flight after {:?}, giving up", grace);
        }
    }
}
