//! Training configuration.

use crate::network::DEFAULT_LEARNING_RATE;

/// Configuration for [`Network::train_with_config`](crate::Network::train_with_config).
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of passes over the training set.
    pub epochs: usize,
    /// Gradient-descent step size.
    pub learning_rate: f64,
    /// Measure and log the mean squared error every this many epochs (0 = never).
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100_000,
            learning_rate: DEFAULT_LEARNING_RATE,
            log_interval: 0,
        }
    }
}

impl TrainingConfig {
    /// Creates a new TrainingConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of epochs.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Sets how often progress is measured and logged.
    pub fn log_interval(mut self, every: usize) -> Self {
        self.log_interval = every;
        self
    }

    /// Whether the error should be measured after `epoch` (0-based).
    pub(crate) fn is_checkpoint(&self, epoch: usize) -> bool {
        self.log_interval > 0 && ((epoch + 1) % self.log_interval == 0 || epoch + 1 == self.epochs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.epochs, 100_000);
        assert!((config.learning_rate - 0.8).abs() < 1e-10);
        assert_eq!(config.log_interval, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = TrainingConfig::new()
            .epochs(50)
            .learning_rate(0.5)
            .log_interval(20);

        assert_eq!(config.epochs, 50);
        assert!((config.learning_rate - 0.5).abs() < 1e-10);
        assert_eq!(config.log_interval, 20);
    }

    #[test]
    fn test_checkpoints() {
        let config = TrainingConfig::new().epochs(50).log_interval(20);
        let checkpoints: Vec<_> = (0..50).filter(|&e| config.is_checkpoint(e)).collect();
        assert_eq!(checkpoints, vec![19, 39, 49]);

        let silent = TrainingConfig::new().epochs(50);
        assert!((0..50).all(|e| !silent.is_checkpoint(e)));
    }
}
