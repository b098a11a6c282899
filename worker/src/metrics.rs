/// Receives one loss value per completed epoch.
pub trait MetricsSink {
    fn record_loss(&mut self, epoch: usize, loss: f32);
}

/// Keeps every reported loss, in epoch order.
#[derive(Debug, Default, Clone)]
pub struct LossHistory {
    pub losses: Vec<f32>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn last(&self) -> Option<f32> {
        self.losses.last().copied()
    }
}

impl MetricsSink for LossHistory {
    fn record_loss(&mut self, _epoch: usize, loss: f32) {
        self.losses.push(loss);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_records_in_order() {
        let mut history = LossHistory::new();
        history.record_loss(0, 3.0);
        history.record_loss(1, 1.5);

        assert_eq!(history.losses, vec![3.0, 1.5]);
        assert_eq!(history.last(), Some(1.5));
    }
}
