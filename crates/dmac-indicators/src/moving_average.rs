//! Simple moving averages, batch and streaming.

use dmac_core::traits::{Indicator, StreamingIndicator};

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the trailing N values. The first output corresponds
/// to input index `period - 1`; shorter input yields an empty vector.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial window sum, then slide
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Streaming SMA that maintains its window for incremental updates.
#[derive(Debug, Clone)]
pub struct StreamingSma {
    period: usize,
    window: std::collections::VecDeque<f64>,
    sum: f64,
}

impl StreamingSma {
    /// Create a new streaming SMA.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            window: std::collections::VecDeque::with_capacity(period),
            sum: 0.0,
        }
    }
}

impl StreamingIndicator for StreamingSma {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.window.push_back(value);
        self.sum += value;
        if self.window.len() > self.period {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
            }
        }
        self.current()
    }

    fn current(&self) -> Option<f64> {
        if self.window.len() < self.period {
            None
        } else {
            Some(self.sum / self.period as f64)
        }
    }

    fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
    }

    fn is_ready(&self) -> bool {
        self.window.len() >= self.period
    }

    fn period(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        assert!(sma.calculate(&[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn test_sma_period_one_is_identity() {
        let sma = Sma::new(1);
        let data = vec![3.0, 1.0, 4.0];
        assert_eq!(sma.calculate(&data), data);
    }

    #[test]
    fn test_sma_window_pair() {
        // closes [1,2,3,4,5]: short(2) means 1.5..4.5, long(3) means 2..4
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(Sma::new(2).calculate(&data), vec![1.5, 2.5, 3.5, 4.5]);
        assert_eq!(Sma::new(3).calculate(&data), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_streaming_sma() {
        let mut sma = StreamingSma::new(3);

        assert!(!sma.is_ready());
        assert!(sma.update(1.0).is_none());
        assert!(sma.update(2.0).is_none());

        let first = sma.update(3.0).unwrap();
        assert!((first - 2.0).abs() < 1e-10);
        assert!(sma.is_ready());

        // Window slides: (2+3+4)/3
        let second = sma.update(4.0).unwrap();
        assert!((second - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_streaming_sma_reset() {
        let mut sma = StreamingSma::new(2);
        sma.update(1.0);
        sma.update(2.0);
        assert!(sma.is_ready());

        sma.reset();
        assert!(!sma.is_ready());
        assert!(sma.current().is_none());
    }

    #[test]
    fn test_streaming_matches_batch() {
        let data = vec![10.0, 11.0, 9.5, 12.0, 13.5, 12.5];
        let batch = Sma::new(3).calculate(&data);

        let mut streaming = StreamingSma::new(3);
        let incremental: Vec<f64> = data.iter().filter_map(|&v| streaming.update(v)).collect();

        assert_eq!(batch.len(), incremental.len());
        for (b, s) in batch.iter().zip(incremental.iter()) {
            assert!((b - s).abs() < 1e-10);
        }
    }
}
