use crate::core::{RunConfig, TransformProfile};
use crate::utils::{ValidationError, ConvertResult};

const MAX_EFFORT: u8 = 6;

/// Validates a run configuration before any filesystem work happens.
pub fn validate_config(config: &RunConfig) -> ConvertResult<()> {
    if config.workers == 0 {
        return Err(ValidationError::settings("Worker count cannot be 0").into());
    }
    validate_profile(&config.profile)
}

/// Validates transform profile settings
pub fn validate_profile(profile: &TransformProfile) -> ConvertResult<()> {
    if profile.quality == 0 || profile.quality > 100 {
        return Err(ValidationError::settings(format!(
            "Invalid quality value: {}. Must be between 1 and 100",
            profile.quality
        ))
        .into());
    }

    if profile.effort > MAX_EFFORT {
        return Err(ValidationError::settings(format!(
            "Invalid effort value: {}. Must be between 0 and {MAX_EFFORT}",
            profile.effort
        ))
        .into());
    }

    if let Some(cover) = profile.resize {
        if cover.width == 0 {
            return Err(ValidationError::settings("Width cannot be 0").into());
        }
        if cover.height == 0 {
            return Err(ValidationError::settings("Height cannot be 0").into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoverBox;

    #[test]
    fn built_in_profiles_are_valid() {
        validate_profile(&TransformProfile::transcode()).unwrap();
        validate_profile(&TransformProfile::thumbnail()).unwrap();
    }

    #[test]
    fn rejects_out_of_range_quality_and_effort() {
        let mut profile = TransformProfile::transcode();
        profile.quality = 0;
        assert!(validate_profile(&profile).unwrap_err().is_fatal());
        profile.quality = 101;
        assert!(validate_profile(&profile).is_err());

        let mut profile = TransformProfile::transcode();
        profile.effort = 7;
        let err = validate_profile(&profile).unwrap_err();
        assert!(err.to_string().contains("effort"));
    }

    #[test]
    fn rejects_empty_cover_box() {
        let mut profile = TransformProfile::thumbnail();
        profile.resize = Some(CoverBox { width: 500, height: 0 });
        assert!(validate_profile(&profile).unwrap_err().to_string().contains("Height"));
    }

    #[test]
    fn rejects_zero_workers() {
        let config = RunConfig::new(TransformProfile::transcode()).with_workers(0);
        assert!(validate_config(&config).is_err());
    }
}
