use std::num::NonZeroUsize;

use fm_core::{Clip, FmConfig, LearningMode, Regularization};

/// A full single-process run description: worker count, data size, the
/// demo data seed and the model hyperparameters.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workers: NonZeroUsize,
    pub seed: u64,
    pub instances: usize,
    pub fm: FmConfig,
}

/// Loads a [`RunConfig`] from a JSON file, falling back to defaults for
/// missing fields.
///
/// # Errors
/// Returns a human-readable message if the file cannot be read or a field
/// is out of range.
pub fn load_run_config(path: &str) -> Result<RunConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;
    parse_run_config(&content)
}

/// Parses a [`RunConfig`] from a JSON string.
pub fn parse_run_config(content: &str) -> Result<RunConfig, String> {
    let val: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

    let mode = match val["mode"].as_str().unwrap_or("regression") {
        "classification" => LearningMode::Classification,
        "regression" => LearningMode::Regression,
        other => return Err(format!("unknown mode: {other}")),
    };

    let nonzero = |key: &str, default: u64| -> Result<NonZeroUsize, String> {
        let raw = val[key].as_u64().unwrap_or(default) as usize;
        NonZeroUsize::new(raw).ok_or_else(|| format!("{key} must be positive"))
    };

    let clip_min = val["clip_min"].as_f64().unwrap_or(-10.0) as f32;
    let clip_max = val["clip_max"].as_f64().unwrap_or(10.0) as f32;
    if clip_min > clip_max {
        return Err("clip_min must not exceed clip_max".into());
    }

    let fm = FmConfig {
        mode,
        num_features: val["num_features"].as_u64().unwrap_or(16) as usize,
        epochs: nonzero("epochs", 20)?,
        rank: nonzero("rank", 4)?,
        learning_rate: val["lr"].as_f64().unwrap_or(0.01) as f32,
        reg: Regularization::new(
            val["reg_bias"].as_f64().unwrap_or(0.0) as f32,
            val["reg_linear"].as_f64().unwrap_or(0.0) as f32,
            val["reg_factor"].as_f64().unwrap_or(0.0) as f32,
        ),
        init_std_dev: val["init_std_dev"].as_f64().unwrap_or(0.01) as f32,
        clip: Clip::new(clip_min, clip_max),
    };

    Ok(RunConfig {
        workers: nonzero("workers", 2)?,
        seed: val["seed"].as_u64().unwrap_or(42),
        instances: val["instances"].as_u64().unwrap_or(512) as usize,
        fm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let run = parse_run_config("{}").unwrap();

        assert_eq!(run.workers.get(), 2);
        assert_eq!(run.instances, 512);
        assert_eq!(run.fm.num_features, 16);
        assert_eq!(run.fm.mode, LearningMode::Regression);
        assert_eq!(run.fm.rank.get(), 4);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let run = parse_run_config(
            r#"{"mode": "classification", "workers": 3, "rank": 8, "lr": 0.5,
                "clip_min": -2.0, "clip_max": 2.0, "reg_linear": 0.001}"#,
        )
        .unwrap();

        assert_eq!(run.workers.get(), 3);
        assert_eq!(run.fm.mode, LearningMode::Classification);
        assert_eq!(run.fm.rank.get(), 8);
        assert_eq!(run.fm.learning_rate, 0.5);
        assert_eq!(run.fm.reg.linear, 0.001);
        assert_eq!(run.fm.clip.min(), -2.0);
        assert_eq!(run.fm.clip.max(), 2.0);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(parse_run_config(r#"{"mode": "ranking"}"#).is_err());
    }

    #[test]
    fn zero_epochs_are_rejected() {
        assert!(parse_run_config(r#"{"epochs": 0}"#).is_err());
    }

    #[test]
    fn inverted_clip_bounds_are_rejected() {
        assert!(parse_run_config(r#"{"clip_min": 1.0, "clip_max": -1.0}"#).is_err());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(parse_run_config("{").is_err());
    }
}
