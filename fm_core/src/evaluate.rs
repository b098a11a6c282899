use crate::{
    data::DataSource,
    error::Result,
    model::{Clip, FmParams},
};

/// Sum of squared error of `params` over every instance in `source`.
///
/// The source is rewound first, so a source just consumed by a training
/// pass is rescanned from the start. The parameters are read-only here;
/// evaluating twice over the same source returns the same value.
pub fn sum_squared_error<S: DataSource>(
    params: &FmParams,
    clip: Clip,
    source: &mut S,
) -> Result<f32> {
    source.reset();

    let mut sum = 0.0;
    for _ in 0..source.size() {
        let instance = source.read()?;
        let residual = params.predict(&instance.features, clip) - instance.label;
        sum += residual * residual;
    }

    Ok(sum)
}
