//! Threaded driver for interactive runs.
//!
//! A [`ColonyDriver`] moves the colony onto a worker thread. The control
//! side only sends commands and reads [`DriverEvent`]s; it never touches
//! engine state directly. Every event carries a detached [`Snapshot`], so
//! a renderer can draw from it while the worker keeps stepping.
//!
//! Commands are handled between iterations: pause and cancel never
//! interrupt a step in progress.

use super::colony::AntColony;
use super::types::{AcoState, Phase};
use crate::error::AcoError;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Copy of a colony's state at a step boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub n_iterations: usize,
    pub state: AcoState,
    /// Progress line, e.g. `"Iter 3: 12.4051"`.
    pub log_line: String,
}

/// Notifications sent from the worker to the control side.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Loaded(Snapshot),
    Stepped(Snapshot),
    Paused(Snapshot),
    Resumed(Snapshot),
    /// The run reached `n_iterations`.
    Finished(Snapshot),
    Cancelled(Snapshot),
    Reset(Snapshot),
    /// Reply to [`ColonyDriver::query`]. `snapshot` is `None` while the
    /// phase is [`Phase::Uninitialized`].
    Status {
        phase: Phase,
        snapshot: Option<Snapshot>,
    },
    /// A command was refused; engine state is unchanged.
    Rejected(AcoError),
}

enum Command<R> {
    Load(Box<AntColony<R>>),
    Step,
    Run,
    Pause,
    Resume,
    Cancel,
    Reset,
    SetDelay(Duration),
    Query,
    Shutdown,
}

/// Owns a worker thread that steps a colony on command.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, AntColony, ColonyDriver, DriverEvent};
/// use u_aco::distance::DistanceMatrix;
/// use std::time::Duration;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let colony = AntColony::new(dm, AcoConfig::default().with_n_iterations(5).with_seed(1)).unwrap();
///
/// let driver = ColonyDriver::spawn();
/// driver.load(colony).unwrap();
/// driver.run().unwrap();
///
/// loop {
///     match driver.events().recv_timeout(Duration::from_secs(5)).unwrap() {
///         DriverEvent::Finished(snapshot) => {
///             assert_eq!(snapshot.state.iteration, 5);
///             break;
///         }
///         _ => continue,
///     }
/// }
/// ```
pub struct ColonyDriver<R: Rng + Send + 'static = StdRng> {
    commands: Sender<Command<R>>,
    events: Receiver<DriverEvent>,
    worker: Option<JoinHandle<()>>,
}

impl<R: Rng + Send + 'static> ColonyDriver<R> {
    /// Starts an idle worker with no colony loaded.
    pub fn spawn() -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            Worker {
                colony: None,
                events: event_tx,
                running: false,
                paused: false,
                delay: Duration::ZERO,
                next_step_at: Instant::now(),
            }
            .serve(command_rx)
        });

        Self {
            commands: command_tx,
            events: event_rx,
            worker: Some(worker),
        }
    }

    /// Installs `colony`, replacing any previous one.
    ///
    /// Rejected with [`AcoError::AlreadyRunning`] during a run.
    pub fn load(&self, colony: AntColony<R>) -> Result<(), AcoError> {
        self.send(Command::Load(Box::new(colony)))
    }

    /// Runs a single iteration.
    pub fn step(&self) -> Result<(), AcoError> {
        self.send(Command::Step)
    }

    /// Steps until the colony's iteration budget is used up.
    pub fn run(&self) -> Result<(), AcoError> {
        self.send(Command::Run)
    }

    pub fn pause(&self) -> Result<(), AcoError> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<(), AcoError> {
        self.send(Command::Resume)
    }

    /// Stops an active run after the current iteration.
    pub fn cancel(&self) -> Result<(), AcoError> {
        self.send(Command::Cancel)
    }

    /// Stops any active run and resets the colony.
    pub fn reset(&self) -> Result<(), AcoError> {
        self.send(Command::Reset)
    }

    /// Sets the pause between iterations of a run.
    pub fn set_delay(&self, delay: Duration) -> Result<(), AcoError> {
        self.send(Command::SetDelay(delay))
    }

    /// Requests a [`DriverEvent::Status`] without touching the colony.
    pub fn query(&self) -> Result<(), AcoError> {
        self.send(Command::Query)
    }

    /// Event stream from the worker.
    pub fn events(&self) -> &Receiver<DriverEvent> {
        &self.events
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn send(&self, command: Command<R>) -> Result<(), AcoError> {
        self.commands.send(command).map_err(|_| AcoError::Disconnected)
    }

    fn stop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("colony driver worker panicked");
            }
        }
    }
}

impl<R: Rng + Send + 'static> Drop for ColonyDriver<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker<R> {
    colony: Option<AntColony<R>>,
    events: Sender<DriverEvent>,
    running: bool,
    paused: bool,
    delay: Duration,
    /// When the active run takes its next step.
    next_step_at: Instant,
}

impl<R: Rng> Worker<R> {
    fn serve(mut self, commands: Receiver<Command<R>>) {
        loop {
            let was_active = self.is_active();

            // While a run is active, commands are only awaited until the next
            // step is due, so a steady stream of them cannot hold the run back.
            let received = if was_active {
                let wait = self.next_step_at.saturating_duration_since(Instant::now());
                match commands.recv_timeout(wait) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            } else {
                match commands.recv() {
                    Ok(command) => Some(command),
                    Err(_) => return,
                }
            };

            if let Some(command) = received {
                if matches!(command, Command::Shutdown) {
                    return;
                }
                self.handle(command);
                if !was_active && self.is_active() {
                    self.next_step_at = Instant::now();
                }
            }

            if self.is_active() && Instant::now() >= self.next_step_at {
                self.advance();
                self.next_step_at = Instant::now() + self.delay;
            }
        }
    }

    fn is_active(&self) -> bool {
        self.running && !self.paused
    }

    fn handle(&mut self, command: Command<R>) {
        match command {
            Command::Load(colony) => {
                if self.running {
                    return self.reject(AcoError::AlreadyRunning);
                }
                self.colony = Some(*colony);
                debug!("colony loaded");
                self.emit_with(DriverEvent::Loaded);
            }
            Command::Step => {
                if self.running {
                    return self.reject(AcoError::AlreadyRunning);
                }
                let Some(colony) = self.colony.as_mut() else {
                    return self.reject(AcoError::NotInitialized);
                };
                colony.step();
                self.emit_with(DriverEvent::Stepped);
            }
            Command::Run => {
                if self.running {
                    return self.reject(AcoError::AlreadyRunning);
                }
                let Some(colony) = self.colony.as_ref() else {
                    return self.reject(AcoError::NotInitialized);
                };
                if colony.phase() == Phase::Exhausted {
                    self.emit_with(DriverEvent::Finished);
                } else {
                    debug!("run started at iteration {}", colony.iteration());
                    self.running = true;
                    self.paused = false;
                }
            }
            Command::Pause => {
                if self.running && !self.paused {
                    self.paused = true;
                    debug!("run paused");
                    self.emit_with(DriverEvent::Paused);
                }
            }
            Command::Resume => {
                if self.running && self.paused {
                    self.paused = false;
                    debug!("run resumed");
                    self.emit_with(DriverEvent::Resumed);
                }
            }
            Command::Cancel => {
                if self.running {
                    self.running = false;
                    self.paused = false;
                    debug!("run cancelled");
                    self.emit_with(DriverEvent::Cancelled);
                }
            }
            Command::Reset => {
                let Some(colony) = self.colony.as_mut() else {
                    return self.reject(AcoError::NotInitialized);
                };
                self.running = false;
                self.paused = false;
                colony.reset();
                debug!("colony reset");
                self.emit_with(DriverEvent::Reset);
            }
            Command::SetDelay(delay) => self.delay = delay,
            Command::Query => {
                let snapshot = self.snapshot();
                let phase = snapshot.as_ref().map_or(Phase::Uninitialized, |s| s.phase);
                self.emit(DriverEvent::Status { phase, snapshot });
            }
            Command::Shutdown => {}
        }
    }

    /// One iteration of an active run.
    fn advance(&mut self) {
        let Some(colony) = self.colony.as_mut() else {
            self.running = false;
            return;
        };
        colony.step();
        let exhausted = colony.phase() == Phase::Exhausted;

        self.emit_with(DriverEvent::Stepped);
        if exhausted {
            self.running = false;
            debug!("run finished");
            self.emit_with(DriverEvent::Finished);
        }
    }

    fn snapshot(&self) -> Option<Snapshot> {
        let colony = self.colony.as_ref()?;
        Some(Snapshot {
            phase: if self.running {
                Phase::Stepping
            } else {
                colony.phase()
            },
            n_iterations: colony.config().n_iterations,
            state: colony.state(),
            log_line: colony.progress_line(),
        })
    }

    fn emit_with(&self, event: fn(Snapshot) -> DriverEvent) {
        if let Some(snapshot) = self.snapshot() {
            self.emit(event(snapshot));
        }
    }

    fn emit(&self, event: DriverEvent) {
        // The control side may have stopped listening; the run carries on.
        let _ = self.events.send(event);
    }

    fn reject(&self, error: AcoError) {
        warn!("driver command rejected: {error}");
        self.emit(DriverEvent::Rejected(error));
    }
}
