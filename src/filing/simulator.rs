use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::config::SimulatorConfig;
use super::random::{FailureSource, entropy_source};
use super::receipt::Acknowledgment;
use crate::core::GstError;

/// Return being filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnKind {
    Gstr1,
    Gstr3b,
    Gstr9,
}

impl ReturnKind {
    /// Display name, e.g. `GSTR-3B`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gstr1 => "GSTR-1",
            Self::Gstr3b => "GSTR-3B",
            Self::Gstr9 => "GSTR-9",
        }
    }

    /// Compact code used inside acknowledgment ids, e.g. `GSTR3B`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gstr1 => "GSTR1",
            Self::Gstr3b => "GSTR3B",
            Self::Gstr9 => "GSTR9",
        }
    }

    /// Whether a tax payment must clear before the return can be filed.
    pub fn requires_payment(&self) -> bool {
        matches!(self, Self::Gstr3b)
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed steps of a submission, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStep {
    DataValidation,
    FormatConversion,
    DigitalSignature,
    PortalSubmission,
    Acknowledgment,
}

impl SubmissionStep {
    pub const ALL: [SubmissionStep; 5] = [
        Self::DataValidation,
        Self::FormatConversion,
        Self::DigitalSignature,
        Self::PortalSubmission,
        Self::Acknowledgment,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::DataValidation => 0,
            Self::FormatConversion => 1,
            Self::DigitalSignature => 2,
            Self::PortalSubmission => 3,
            Self::Acknowledgment => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DataValidation => "Data validation",
            Self::FormatConversion => "Format conversion",
            Self::DigitalSignature => "Digital signature",
            Self::PortalSubmission => "Portal submission",
            Self::Acknowledgment => "Acknowledgment",
        }
    }
}

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    InProgress(SubmissionStep),
    Acknowledged,
}

impl SubmissionPhase {
    /// -1 when idle, the step index while running, 5 once acknowledged.
    pub fn step_index(&self) -> i32 {
        match self {
            Self::Idle => -1,
            Self::InProgress(step) => step.index() as i32,
            Self::Acknowledged => SubmissionStep::ALL.len() as i32,
        }
    }
}

/// Observable simulator state. Reset at the start of every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionState {
    pub phase: SubmissionPhase,
    /// Set only after the final step completes.
    pub acknowledgment: Option<String>,
    /// Set only after a failed attempt.
    pub error: Option<String>,
}

/// Why a submission attempt ended without an acknowledgment.
///
/// All variants are transient; the attempt can be retried from step 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    /// Another submission is running on this simulator.
    #[error("a submission is already in progress")]
    InProgress,

    /// The readiness check at the data validation step failed.
    #[error("return is not ready for filing: {0}")]
    NotReady(String),

    /// GSTR-3B tax payment was declined.
    #[error("tax payment failed, please try again")]
    Payment,

    /// The portal rejected the submission.
    #[error("portal submission failed, please try again")]
    Portal,
}

/// A return payload that can be put through the simulator.
pub trait Filing {
    fn return_kind(&self) -> ReturnKind;

    /// Readiness check run at the data validation step. The error string
    /// is surfaced in [`SubmissionError::NotReady`].
    fn check_ready(&self) -> Result<(), String>;
}

/// Simulated GST portal submission.
///
/// Runs the five [`SubmissionStep`]s with artificial delays, injecting a
/// failure at the portal step (and, for GSTR-3B, at a payment gate before
/// step 0). At most one submission runs at a time; progress is published
/// on a [`watch`] channel.
pub struct SubmissionSimulator {
    config: SimulatorConfig,
    source: Mutex<Box<dyn FailureSource>>,
    state: watch::Sender<SubmissionState>,
    busy: AtomicBool,
}

impl fmt::Debug for SubmissionSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionSimulator")
            .field("config", &self.config)
            .field("state", &*self.state.borrow())
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl SubmissionSimulator {
    /// Simulator with an entropy-seeded failure source.
    pub fn new(config: SimulatorConfig) -> Result<Self, GstError> {
        Self::build(config, entropy_source())
    }

    /// Simulator with a caller-supplied failure source, e.g. a seeded
    /// [`StdRng`](rand::rngs::StdRng).
    pub fn with_source(
        config: SimulatorConfig,
        source: impl FailureSource + 'static,
    ) -> Result<Self, GstError> {
        Self::build(config, Box::new(source))
    }

    fn build(config: SimulatorConfig, source: Box<dyn FailureSource>) -> Result<Self, GstError> {
        config.validate()?;
        let (state, _) = watch::channel(SubmissionState::default());
        Ok(Self {
            config,
            source: Mutex::new(source),
            state,
            busy: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one submission attempt to completion.
    ///
    /// Returns [`SubmissionError::InProgress`] without touching the state
    /// when another attempt is running. On failure the phase goes back to
    /// idle with the error message recorded; the payload is untouched.
    pub async fn submit<F>(&self, payload: &F) -> Result<Acknowledgment, SubmissionError>
    where
        F: Filing + ?Sized,
    {
        let Some(_guard) = BusyGuard::acquire(&self.busy, &self.state) else {
            warn!("submission rejected: another submission is in progress");
            return Err(SubmissionError::InProgress);
        };

        let kind = payload.return_kind();
        self.state.send_replace(SubmissionState::default());
        info!(return_kind = %kind, "submission started");

        match self.run(kind, payload).await {
            Ok(ack) => {
                self.state.send_replace(SubmissionState {
                    phase: SubmissionPhase::Acknowledged,
                    acknowledgment: Some(ack.id.clone()),
                    error: None,
                });
                info!(return_kind = %kind, ack = %ack.id, "submission acknowledged");
                Ok(ack)
            }
            Err(err) => {
                self.state.send_replace(SubmissionState {
                    phase: SubmissionPhase::Idle,
                    acknowledgment: None,
                    error: Some(err.to_string()),
                });
                warn!(return_kind = %kind, error = %err, "submission failed");
                Err(err)
            }
        }
    }

    async fn run<F>(&self, kind: ReturnKind, payload: &F) -> Result<Acknowledgment, SubmissionError>
    where
        F: Filing + ?Sized,
    {
        if kind.requires_payment() {
            sleep(self.config.payment_delay).await;
            if self.inject_failure(self.config.payment_failure_probability) {
                return Err(SubmissionError::Payment);
            }
            debug!(return_kind = %kind, "tax payment cleared");
        }

        for step in SubmissionStep::ALL {
            self.state.send_modify(|s| s.phase = SubmissionPhase::InProgress(step));
            info!(step = step.label(), index = step.index(), "submission step");
            sleep(self.config.step_delay(step)).await;

            match step {
                SubmissionStep::DataValidation => {
                    payload.check_ready().map_err(SubmissionError::NotReady)?;
                }
                SubmissionStep::PortalSubmission => {
                    if self.inject_failure(self.config.portal_failure_probability) {
                        return Err(SubmissionError::Portal);
                    }
                }
                _ => {}
            }
        }

        Ok(Acknowledgment::issue(
            &self.config.acknowledgment_prefix,
            kind,
            Utc::now(),
        ))
    }

    fn inject_failure(&self, probability: f64) -> bool {
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        source.fails(probability)
    }
}

/// Holds the busy flag for the lifetime of one submission.
///
/// Dropping it mid-run (the `submit` future was dropped) puts the phase
/// back to idle before the flag is released.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<SubmissionState>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool, state: &'a watch::Sender<SubmissionState>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| {
            if !matches!(s.phase, SubmissionPhase::InProgress(_)) {
                return false;
            }
            warn!(step = s.phase.step_index(), "submission abandoned mid-run");
            s.phase = SubmissionPhase::Idle;
            s.error = Some("submission cancelled".into());
            true
        });
        self.flag.store(false, Ordering::Release);
    }
}
