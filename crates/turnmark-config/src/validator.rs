//! Configuration validation.

use crate::schema::Config;

/// Upper bound on scheduled lookups; anything above this is a typo.
const MAX_RETRY_ATTEMPTS: u32 = 100;

/// Duration of the first CSS `<time>` in a `transition` shorthand, in
/// milliseconds. The first time in the shorthand is the duration; a second
/// one would be the delay.
pub(crate) fn transition_duration_ms(transition: &str) -> Option<u64> {
    transition.split_whitespace().find_map(|token| {
        let token = token.trim_end_matches(',');
        let (number, scale) = match token.strip_suffix("ms") {
            Some(number) => (number, 1.0),
            None => (token.strip_suffix('s')?, 1000.0),
        };
        let value: f64 = number.parse().ok()?;
        (value.is_finite() && value >= 0.0).then(|| (value * scale).round() as u64)
    })
}

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_engine(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_store(config, &mut result);

        result
    }

    fn validate_engine(config: &Config, result: &mut ValidationResult) {
        let engine = &config.engine;

        if engine.retry_interval_ms == 0 && engine.retry_attempts > 0 {
            result.add_error(ValidationError::new(
                "engine.retry_interval_ms",
                "retry_interval_ms must be greater than 0 when retries are enabled",
            ));
        }

        if engine.retry_attempts > MAX_RETRY_ATTEMPTS {
            result.add_error(ValidationError::new(
                "engine.retry_attempts",
                format!("retry_attempts cannot exceed {}", MAX_RETRY_ATTEMPTS),
            ));
        }

        if engine.retry_attempts == 0 {
            result.add_warning(ValidationWarning::new(
                "engine.retry_attempts",
                "retries disabled, turns rendered after the first lookup will not be found",
            ));
        }

        if engine.highlight_color.trim().is_empty() {
            result.add_error(ValidationError::new(
                "engine.highlight_color",
                "highlight_color cannot be empty",
            ));
        }

        if let Some(fade_ms) = transition_duration_ms(&engine.highlight_transition) {
            if engine.highlight_duration_ms < fade_ms {
                result.add_warning(ValidationWarning::new(
                    "engine.highlight_duration_ms",
                    format!(
                        "highlight lasts {}ms but its transition takes {}ms and may not be visible",
                        engine.highlight_duration_ms, fade_ms
                    ),
                ));
            }
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if config.browser.load_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.load_timeout_ms",
                "load_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_store(config: &Config, result: &mut ValidationResult) {
        if config.store.path.as_os_str().is_empty() {
            result.add_error(ValidationError::new("store.path", "store path cannot be empty"));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
