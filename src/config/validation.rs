use super::*;

impl EnvConfig {
    /// Get a value and check it with `validator`; on failure the error
    /// names the declaring line and `valid_values`.
    pub fn get_validated<T, F>(&self, key: &str, validator: F, valid_values: &str) -> Result<T, EnvError>
    where
        T: TryFrom<Value, Error = EnvError>,
        F: FnOnce(&T) -> bool,
    {
        let typed_value: T = self.get(key)?;

        if !validator(&typed_value) {
            let (line, snippet) = helpers::find_config_line(key, &self.raw_content);
            return Err(EnvError::ValidationError {
                message: format!("Invalid value for `{}`\nExpected: {}", key, valid_values),
                line,
                hint: Some(format!("Valid values are: {}\n  → {}", valid_values, snippet)),
                code: Some(450),
            });
        }

        Ok(typed_value)
    }

    /// Get a string value and check it is one of `allowed_values`, ignoring case.
    pub fn get_string_enum(&self, key: &str, allowed_values: &[&str]) -> Result<String, EnvError> {
        let value: String = self.get(key)?;

        if !allowed_values.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
            let (line, snippet) = helpers::find_config_line(key, &self.raw_content);
            return Err(EnvError::ValidationError {
                message: format!("Invalid value '{}' for `{}`", value, key),
                line,
                hint: Some(format!("Expected one of: {}\n  → {}", allowed_values.join(", "), snippet)),
                code: Some(451),
            });
        }

        Ok(value)
    }
}
