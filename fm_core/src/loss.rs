/// Training objective.
///
/// Each mode carries its own loss-derivative multiplier, so a
/// misconfigured objective cannot reach the update path: there is no third
/// variant to fall through to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningMode {
    /// Logistic loss over `±1` labels.
    Classification,
    /// Squared error, with the constant factor folded into the step size.
    Regression,
}

impl LearningMode {
    /// Loss-derivative multiplier for one instance: the scalar that turns
    /// a parameter's prediction-gradient into its loss-gradient.
    ///
    /// For classification this is `-y * (1 - sigmoid(y * pre))`, for
    /// regression the plain residual `pre - y`.
    #[inline]
    pub fn multiplier(self, prediction: f32, target: f32) -> f32 {
        match self {
            LearningMode::Classification => {
                -target * (1.0 - 1.0 / (1.0 + (-target * prediction).exp()))
            }
            LearningMode::Regression => prediction - target,
        }
    }
}
