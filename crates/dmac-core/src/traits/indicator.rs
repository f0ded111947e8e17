//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for batch technical indicators.
///
/// Indicators process a price slice and produce derived values. Output is
/// aligned to the input's tail: the first output corresponds to input index
/// `period() - 1`.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Streaming indicator that maintains internal state and can be updated
/// incrementally with new data points.
pub trait StreamingIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Update the indicator with a new value.
    ///
    /// Returns the current indicator value, or None while warming up.
    fn update(&mut self, value: f64) -> Option<Self::Output>;

    /// Get the current value without adding new data.
    fn current(&self) -> Option<Self::Output>;

    /// Reset the indicator state.
    fn reset(&mut self);

    /// Check if the indicator has enough data to produce values.
    fn is_ready(&self) -> bool;

    /// Get the minimum data points required.
    fn period(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SumIndicator {
        period: usize,
    }

    impl Indicator for SumIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            data.windows(self.period).map(|w| w.iter().sum()).collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "sum"
        }
    }

    #[test]
    fn test_validate_data() {
        let indicator = SumIndicator { period: 5 };
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator
            .validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0])
            .is_ok());
    }

    #[test]
    fn test_output_alignment() {
        let indicator = SumIndicator { period: 3 };
        let result = indicator.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(result.len(), 3);
        assert!((result[0] - 6.0).abs() < 1e-10);
        assert!((result[2] - 12.0).abs() < 1e-10);
    }
}
