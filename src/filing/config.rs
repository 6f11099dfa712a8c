use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::simulator::SubmissionStep;
use crate::core::GstError;

/// Timing and failure-injection settings for the [`SubmissionSimulator`].
///
/// [`SubmissionSimulator`]: super::SubmissionSimulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Artificial delay of each step, indexed by [`SubmissionStep::index`].
    pub step_delays: [Duration; 5],
    /// Delay of the GSTR-3B payment gate.
    pub payment_delay: Duration,
    /// Chance that the portal submission step fails.
    pub portal_failure_probability: f64,
    /// Chance that the GSTR-3B tax payment fails.
    pub payment_failure_probability: f64,
    /// Leading segment of generated acknowledgment ids.
    pub acknowledgment_prefix: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            step_delays: [
                Duration::from_millis(1500),
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(3000),
                Duration::from_millis(1000),
            ],
            payment_delay: Duration::from_millis(2000),
            portal_failure_probability: 0.10,
            payment_failure_probability: 0.10,
            acknowledgment_prefix: "ARN".to_string(),
        }
    }
}

impl SimulatorConfig {
    pub fn step_delay(&self, step: SubmissionStep) -> Duration {
        self.step_delays[step.index()]
    }

    /// Total delay of one successful run, excluding the payment gate.
    pub fn total_step_delay(&self) -> Duration {
        self.step_delays.iter().sum()
    }

    /// Check that both probabilities lie in `[0, 1]` and the prefix is set.
    pub fn validate(&self) -> Result<(), GstError> {
        check_probability("portal_failure_probability", self.portal_failure_probability)?;
        check_probability("payment_failure_probability", self.payment_failure_probability)?;
        if self.acknowledgment_prefix.trim().is_empty() {
            return Err(GstError::Config(
                "acknowledgment_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), GstError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GstError::Config(format!(
            "{name} must be between 0 and 1, got {value}"
        )))
    }
}

/// Builder for [`SimulatorConfig`].
///
/// # Example
///
/// ```
/// use gst_filing::filing::SimulatorConfigBuilder;
///
/// let config = SimulatorConfigBuilder::new()
///     .no_delays()
///     .portal_failure_probability(0.0)
///     .build()
///     .unwrap();
/// assert!(config.total_step_delay().is_zero());
///
/// assert!(SimulatorConfigBuilder::new().payment_failure_probability(1.5).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulatorConfigBuilder {
    config: SimulatorConfig,
}

impl SimulatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_delay(mut self, step: SubmissionStep, delay: Duration) -> Self {
        self.config.step_delays[step.index()] = delay;
        self
    }

    pub fn step_delays(mut self, delays: [Duration; 5]) -> Self {
        self.config.step_delays = delays;
        self
    }

    pub fn payment_delay(mut self, delay: Duration) -> Self {
        self.config.payment_delay = delay;
        self
    }

    /// Zero every delay, including the payment gate.
    pub fn no_delays(mut self) -> Self {
        self.config.step_delays = [Duration::ZERO; 5];
        self.config.payment_delay = Duration::ZERO;
        self
    }

    pub fn portal_failure_probability(mut self, probability: f64) -> Self {
        self.config.portal_failure_probability = probability;
        self
    }

    pub fn payment_failure_probability(mut self, probability: f64) -> Self {
        self.config.payment_failure_probability = probability;
        self
    }

    pub fn acknowledgment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.acknowledgment_prefix = prefix.into();
        self
    }

    /// Build the config, rejecting out-of-range values.
    pub fn build(self) -> Result<SimulatorConfig, GstError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.portal_failure_probability, 0.10);
        assert_eq!(config.payment_failure_probability, 0.10);
        assert_eq!(config.total_step_delay(), Duration::from_millis(8500));
        assert!(
            config
                .step_delays
                .iter()
                .all(|d| *d >= Duration::from_secs(1) && *d <= Duration::from_secs(3))
        );
    }

    #[test]
    fn builder_overrides_one_step() {
        let config = SimulatorConfigBuilder::new()
            .step_delay(SubmissionStep::PortalSubmission, Duration::from_millis(10))
            .build()
            .unwrap();
        assert_eq!(
            config.step_delay(SubmissionStep::PortalSubmission),
            Duration::from_millis(10)
        );
        assert_eq!(
            config.step_delay(SubmissionStep::DataValidation),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let err = SimulatorConfigBuilder::new()
            .portal_failure_probability(-0.1)
            .build()
            .unwrap_err();
        assert!(matches!(err, GstError::Config(_)));
        assert!(err.to_string().contains("portal_failure_probability"));

        assert!(
            SimulatorConfigBuilder::new()
                .payment_failure_probability(f64::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn boundary_probabilities_accepted() {
        assert!(
            SimulatorConfigBuilder::new()
                .portal_failure_probability(0.0)
                .payment_failure_probability(1.0)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn rejects_blank_prefix() {
        assert!(
            SimulatorConfigBuilder::new()
                .acknowledgment_prefix("  ")
                .build()
                .is_err()
        );
    }
}
