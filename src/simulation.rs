//! Real-time spring simulation.
//!
//! A [`SpringRunner`] drives the spring embedder on a background thread at a
//! fixed rate, ticking the shared [`EmbeddingStore`] while the
//! [`ForceSettings`] say the simulation is active.
//!
//! ```no_run
//! use std::sync::Arc;
//! use flatland::prelude::*;
//! use flatland::simulation::{RunnerOptions, SpringRunner};
//! use parking_lot::Mutex;
//!
//! let graph = Graph::from_edges(2, vec![[0, 1]]).with_coords(vec![vec![0.0, 0.0], vec![2.0, 0.0]]);
//! let mut store = EmbeddingStore::new();
//! store.set_graph(graph).unwrap();
//!
//! let store = Arc::new(Mutex::new(store));
//! let mut runner = SpringRunner::new(Arc::clone(&store), RunnerOptions::default()).unwrap();
//!
//! runner.settings().set_active(true);
//! runner.sync().unwrap();
//! std::thread::sleep(std::time::Duration::from_millis(500));
//! runner.stop();
//!
//! println!("{:?}", store.lock().coords());
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::algo::spring::SpringOptions;
use crate::error::{EmbedError, Result};
use crate::store::EmbeddingStore;

/// Shared switches read by the ticker on every tick.
///
/// Values are plain atomics: the ticker picks up a change on its next tick
/// and nothing is notified when a value changes.
#[derive(Debug)]
pub struct ForceSettings {
    active: AtomicBool,
    tween: AtomicU64,
}

impl Default for ForceSettings {
    fn default() -> Self {
        Self {
            active: AtomicBool::new(false),
            tween: AtomicU64::new(0.0f64.to_bits()),
        }
    }
}

impl ForceSettings {
    /// Whether the simulation should be running.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Turn the simulation on or off.
    ///
    /// A running [`SpringRunner`] stops ticking right away; call
    /// [`SpringRunner::sync`] to also start or join its thread.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    /// Interpolation factor between ticks. Read by the ticker but not yet
    /// applied to the coordinates.
    pub fn tween(&self) -> f64 {
        f64::from_bits(self.tween.load(Ordering::Relaxed))
    }

    /// Set the interpolation factor.
    pub fn set_tween(&self, tween: f64) {
        self.tween.store(tween.to_bits(), Ordering::Relaxed);
    }
}

/// Options for the background runner.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Ticks per second.
    pub fps: f64,

    /// Spring parameters used for every tick.
    pub spring: SpringOptions,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            fps: 60.0,
            spring: SpringOptions::default(),
        }
    }
}

impl RunnerOptions {
    /// Set the tick rate.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Set the spring parameters.
    pub fn with_spring(mut self, spring: SpringOptions) -> Self {
        self.spring = spring;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(EmbedError::invalid_param("fps", self.fps, "must be positive and finite"));
        }
        self.spring.validate()
    }

    /// Time between tick starts.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

struct Ticker {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

/// Start/stop lifecycle around a background spring ticker.
///
/// At most one ticker thread exists per runner. Dropping the runner stops it.
pub struct SpringRunner {
    store: Arc<Mutex<EmbeddingStore>>,
    settings: Arc<ForceSettings>,
    options: RunnerOptions,
    ticks: Arc<AtomicU64>,
    ticker: Option<Ticker>,
}

impl SpringRunner {
    /// Create a stopped runner over a shared store.
    ///
    /// The runner follows the store's [`ForceSettings`].
    pub fn new(store: Arc<Mutex<EmbeddingStore>>, options: RunnerOptions) -> Result<Self> {
        options.validate()?;
        let settings = Arc::clone(store.lock().settings());
        Ok(Self {
            store,
            settings,
            options,
            ticks: Arc::new(AtomicU64::new(0)),
            ticker: None,
        })
    }

    /// The settings the ticker reads.
    pub fn settings(&self) -> &Arc<ForceSettings> {
        &self.settings
    }

    /// Whether a ticker thread is alive.
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Number of ticks applied since the runner was created.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Spawn the ticker with damping reset to 1.0.
    ///
    /// Returns `false` without doing anything if it is already running.
    pub fn start(&mut self) -> Result<bool> {
        if self.ticker.is_some() {
            return Ok(false);
        }

        let stop = Arc::new(AtomicBool::new(false));
        let thread = {
            let store = Arc::clone(&self.store);
            let settings = Arc::clone(&self.settings);
            let options = self.options.clone();
            let stop = Arc::clone(&stop);
            let ticks = Arc::clone(&self.ticks);
            thread::Builder::new()
                .name("spring-ticker".into())
                .spawn(move || run_ticker(&store, &settings, &options, &stop, &ticks))?
        };

        log::debug!("spring ticker started at {} fps", self.options.fps);
        self.ticker = Some(Ticker { stop, thread });
        Ok(true)
    }

    /// Signal the ticker and wait for it to finish its current tick.
    ///
    /// Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        let Some(ticker) = self.ticker.take() else {
            return false;
        };

        ticker.stop.store(true, Ordering::Release);
        ticker.thread.thread().unpark();
        if ticker.thread.join().is_err() {
            log::error!("spring ticker panicked");
        }
        log::debug!("spring ticker stopped after {} ticks", self.ticks());
        true
    }

    /// Start or stop to match [`ForceSettings::is_active`].
    pub fn sync(&mut self) -> Result<()> {
        if self.settings.is_active() {
            self.start()?;
        } else {
            self.stop();
        }
        Ok(())
    }
}

impl Drop for SpringRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SpringRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpringRunner")
            .field("options", &self.options)
            .field("running", &self.is_running())
            .field("ticks", &self.ticks())
            .finish_non_exhaustive()
    }
}

fn run_ticker(
    store: &Mutex<EmbeddingStore>,
    settings: &ForceSettings,
    options: &RunnerOptions,
    stop: &AtomicBool,
    ticks: &AtomicU64,
) {
    let interval = options.interval();
    let mut damping = 1.0;

    while !stop.load(Ordering::Acquire) {
        let started = Instant::now();

        let tween = settings.tween();
        if settings.is_active() {
            store.lock().spring_tick(&options.spring, damping);
            damping *= options.spring.damping_decay;
            let tick = ticks.fetch_add(1, Ordering::Relaxed) + 1;
            log::trace!("spring tick {tick} (damping {damping}, tween {tween})");
        }

        if let Some(remaining) = interval.checked_sub(started.elapsed()) {
            thread::park_timeout(remaining);
        }
    }
}
