//! Feedforward network with sigmoid layers trained by backpropagation

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::config::NetworkConfig;
use crate::{NetworkError, Result};
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Initial weights and biases are drawn from `[-INIT_RANGE, INIT_RANGE)`
const INIT_RANGE: f64 = 0.2;

/// One supervised example: an input window and the value that followed it
pub trait TrainingSample {
    /// Input vector, one value per input unit
    fn input(&self) -> &[f64];
    /// Expected network output
    fn target(&self) -> f64;
}

impl TrainingSample for (Vec<f64>, f64) {
    fn input(&self) -> &[f64] {
        &self.0
    }

    fn target(&self) -> f64 {
        self.1
    }
}

/// Why a training run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Mean training error dropped below the configured threshold
    ErrorThreshold,
    /// The configured number of iterations was exhausted
    IterationLimit,
    /// The configured wall-clock limit elapsed
    TimeLimit,
}

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Number of full passes over the training set
    pub iterations_run: usize,
    /// Mean squared error of the last pass
    pub final_error: f64,
    /// Condition that ended training
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    /// Shape `(units, inputs)`
    weights: Array2<f64>,
    biases: Array1<f64>,
    /// Previous weight updates, kept for momentum
    changes: Array2<f64>,
}

impl DenseLayer {
    fn new<R: Rng>(inputs: usize, units: usize, rng: &mut R) -> Self {
        let range = Uniform::new(-INIT_RANGE, INIT_RANGE);

        Self {
            weights: Array2::random_using((units, inputs), range, rng),
            biases: Array1::random_using(units, range, rng),
            changes: Array2::zeros((units, inputs)),
        }
    }

    fn forward(&self, input: ArrayView1<f64>) -> Array1<f64> {
        (self.weights.dot(&input) + &self.biases).mapv(sigmoid)
    }

    fn is_finite(&self) -> bool {
        self.weights
            .iter()
            .chain(self.biases.iter())
            .all(|v| v.is_finite())
    }
}

/// Feedforward regression network mapping a window of values to the next value
///
/// Inputs and targets are expected in `[0, 1]`; anything else is rejected
/// rather than trained on. Each instance is owned by a single forecast and
/// nothing is shared between instances, so independent networks can train
/// concurrently.
#[derive(Debug, Clone)]
pub struct ForecastNetwork {
    input_size: usize,
    layers: Vec<DenseLayer>,
    config: NetworkConfig,
    /// Iteration at which training diverged; such a network refuses to predict
    diverged_at: Option<usize>,
}

impl ForecastNetwork {
    /// Create a network with randomly initialized weights
    ///
    /// # Arguments
    /// * `input_size` - Number of input values (the window length)
    /// * `config` - Hyperparameters; the seed, if any, fixes the initial weights
    pub fn new(input_size: usize, config: NetworkConfig) -> Result<Self> {
        if input_size == 0 {
            return Err(NetworkError::InvalidConfig(
                "Input size must be positive".to_string(),
            ));
        }
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut layers = Vec::with_capacity(config.hidden_layers.len() + 1);
        let mut fan_in = input_size;
        for &units in config.hidden_layers.iter().chain(std::iter::once(&1)) {
            layers.push(DenseLayer::new(fan_in, units, &mut rng));
            fan_in = units;
        }

        Ok(Self {
            input_size,
            layers,
            config,
            diverged_at: None,
        })
    }

    /// Number of inputs the network expects
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Hyperparameters the network was built with
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Run one forward pass; the result lies in `(0, 1)`
    pub fn predict(&self, input: &[f64]) -> Result<f64> {
        if let Some(iteration) = self.diverged_at {
            return Err(NetworkError::Diverged { iteration });
        }
        self.check_input(input)?;
        if input.iter().any(|v| !v.is_finite()) {
            return Err(NetworkError::InvalidInput(
                "prediction input contains non-finite values".to_string(),
            ));
        }

        let mut signal = Array1::from_vec(input.to_vec());
        for layer in &self.layers {
            signal = layer.forward(signal.view());
        }
        Ok(signal[0])
    }

    /// Train on the given samples until the error threshold, the iteration
    /// limit or the time limit is reached
    ///
    /// Every input value and target must be finite and lie in `[0, 1]`;
    /// unnormalized data fails with [`NetworkError::InvalidInput`] before any
    /// weight moves. Non-finite weights or error abort training with
    /// [`NetworkError::Diverged`], after which the network refuses to predict.
    pub fn train<S: TrainingSample>(&mut self, samples: &[S]) -> Result<TrainingStats> {
        if let Some(iteration) = self.diverged_at {
            return Err(NetworkError::Diverged { iteration });
        }
        if samples.is_empty() {
            return Err(NetworkError::EmptyTrainingSet);
        }
        for (index, sample) in samples.iter().enumerate() {
            self.check_input(sample.input())?;
            check_sample(index, sample)?;
        }

        let started = Instant::now();
        let time_limit = self.config.time_limit();
        let log_period = self.config.log_period;
        let mut error = f64::INFINITY;

        for iteration in 1..=self.config.iterations {
            let mut sum = 0.0;
            for sample in samples {
                let input = ArrayView1::from(sample.input());
                sum += self.train_sample(input, sample.target());
            }
            error = sum / samples.len() as f64;

            if !error.is_finite() || !self.layers.iter().all(DenseLayer::is_finite) {
                warn!("Training diverged at iteration {}", iteration);
                self.diverged_at = Some(iteration);
                return Err(NetworkError::Diverged { iteration });
            }

            if log_period > 0 && iteration % log_period == 0 {
                debug!("iterations: {}, training error: {:.6}", iteration, error);
            }

            if error < self.config.error_threshold {
                info!(
                    "Training reached error {:.6} after {} iterations",
                    error, iteration
                );
                return Ok(TrainingStats {
                    iterations_run: iteration,
                    final_error: error,
                    stop_reason: StopReason::ErrorThreshold,
                });
            }

            if let Some(limit) = time_limit {
                if started.elapsed() >= limit {
                    warn!(
                        "Training stopped by {:?} time limit after {} iterations (error {:.6})",
                        limit, iteration, error
                    );
                    return Ok(TrainingStats {
                        iterations_run: iteration,
                        final_error: error,
                        stop_reason: StopReason::TimeLimit,
                    });
                }
            }
        }

        info!(
            "Training finished {} iterations with error {:.6}",
            self.config.iterations, error
        );
        Ok(TrainingStats {
            iterations_run: self.config.iterations,
            final_error: error,
            stop_reason: StopReason::IterationLimit,
        })
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size {
            return Err(NetworkError::InputSize {
                expected: self.input_size,
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Outputs of every layer, starting with the input itself
    fn activations(&self, input: ArrayView1<f64>) -> Vec<Array1<f64>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_owned());
        for layer in &self.layers {
            let next = layer.forward(activations[activations.len() - 1].view());
            activations.push(next);
        }
        activations
    }

    /// One backpropagation step; returns the squared error before the update
    fn train_sample(&mut self, input: ArrayView1<f64>, target: f64) -> f64 {
        let activations = self.activations(input);
        let output = activations[activations.len() - 1][0];
        let error = target - output;

        // Deltas are computed for every layer before any weight moves.
        let last = self.layers.len() - 1;
        let mut deltas: Vec<Array1<f64>> = vec![Array1::zeros(0); self.layers.len()];
        deltas[last] = Array1::from_elem(1, error * sigmoid_derivative(output));
        for l in (0..last).rev() {
            let propagated = self.layers[l + 1].weights.t().dot(&deltas[l + 1]);
            deltas[l] = propagated * activations[l + 1].mapv(sigmoid_derivative);
        }

        let learning_rate = self.config.learning_rate;
        let momentum = self.config.momentum;
        for (l, layer) in self.layers.iter_mut().enumerate() {
            let delta = deltas[l].view().insert_axis(Axis(1));
            let incoming = activations[l].view().insert_axis(Axis(0));
            let change = delta.dot(&incoming) * learning_rate + &layer.changes * momentum;

            layer.weights += &change;
            layer.biases.scaled_add(learning_rate, &deltas[l]);
            layer.changes = change;
        }

        error * error
    }
}

fn check_sample<S: TrainingSample>(index: usize, sample: &S) -> Result<()> {
    if let Some(value) = sample
        .input()
        .iter()
        .find(|v| !(v.is_finite() && (0.0..=1.0).contains(*v)))
    {
        return Err(NetworkError::InvalidInput(format!(
            "sample {} has input value {} outside [0, 1]",
            index, value
        )));
    }

    let target = sample.target();
    if !(target.is_finite() && (0.0..=1.0).contains(&target)) {
        return Err(NetworkError::InvalidInput(format!(
            "sample {} has target {} outside [0, 1]",
            index, target
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_samples() -> Vec<(Vec<f64>, f64)> {
        (0..7)
            .map(|i| {
                let base = 0.1 * i as f64;
                (vec![base, base + 0.05], base + 0.1)
            })
            .collect()
    }

    #[test]
    fn test_layer_shapes_follow_config() {
        let config = NetworkConfig::default().with_hidden_layers(vec![4, 2]);
        let network = ForecastNetwork::new(5, config).unwrap();

        assert_eq!(network.layers.len(), 3);
        assert_eq!(network.layers[0].weights.dim(), (4, 5));
        assert_eq!(network.layers[1].weights.dim(), (2, 4));
        assert_eq!(network.layers[2].weights.dim(), (1, 2));
        assert_eq!(network.layers[2].biases.len(), 1);
        assert_eq!(network.layers[0].changes.dim(), (4, 5));
    }

    #[test]
    fn test_initial_weights_within_range() {
        let network = ForecastNetwork::new(5, NetworkConfig::default().with_seed(3)).unwrap();
        for layer in &network.layers {
            for value in layer.weights.iter().chain(layer.biases.iter()) {
                assert!(*value >= -INIT_RANGE && *value < INIT_RANGE);
            }
        }
    }

    #[test]
    fn test_zero_input_size_rejected() {
        let result = ForecastNetwork::new(0, NetworkConfig::default());
        assert!(matches!(result, Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn test_training_reduces_error() {
        let config = NetworkConfig::default()
            .with_seed(11)
            .with_error_threshold(0.0);

        let mut short = ForecastNetwork::new(2, config.clone().with_iterations(1)).unwrap();
        let mut long = ForecastNetwork::new(2, config.with_iterations(2000)).unwrap();

        let first = short.train(&ramp_samples()).unwrap();
        let last = long.train(&ramp_samples()).unwrap();

        assert_eq!(last.iterations_run, 2000);
        assert_eq!(last.stop_reason, StopReason::IterationLimit);
        assert!(last.final_error < first.final_error);
    }

    #[test]
    fn test_sample_size_mismatch_rejected_before_training() {
        let mut network = ForecastNetwork::new(3, NetworkConfig::default()).unwrap();
        let samples = vec![(vec![0.1, 0.2, 0.3], 0.4), (vec![0.1, 0.2], 0.3)];

        let result = network.train(&samples);
        assert_eq!(
            result,
            Err(NetworkError::InputSize {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_divergence_disables_prediction() {
        let mut network = ForecastNetwork::new(2, NetworkConfig::default().with_seed(4)).unwrap();
        network.layers[0].weights[[0, 0]] = f64::NAN;

        let result = network.train(&ramp_samples());
        assert_eq!(result, Err(NetworkError::Diverged { iteration: 1 }));
        assert_eq!(
            network.predict(&[0.2, 0.3]),
            Err(NetworkError::Diverged { iteration: 1 })
        );
        assert_eq!(
            network.train(&ramp_samples()),
            Err(NetworkError::Diverged { iteration: 1 })
        );
    }
}
