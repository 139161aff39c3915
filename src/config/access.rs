use super::*;

impl EnvConfig {
    /// Get a typed value by key.
    ///
    /// # Examples
    /// ```no_run
    /// # use env_cfg::EnvConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = EnvConfig::from_file(".env")?;
    /// let host: String = config.get("DB_HOST")?;
    /// let port: u16 = config.get("DB_PORT")?;
    /// let debug: bool = config.get("DEBUG")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the key doesn't exist or the value can't be converted to type T.
    pub fn get<T>(&self, key: &str) -> Result<T, EnvError>
    where
        T: TryFrom<Value, Error = EnvError>,
    {
        let value = self.get_value(key)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, key, &self.raw_content))
    }

    /// Get an optional typed value. Missing keys and `null` values are `None`.
    pub fn get_optional<T>(&self, key: &str) -> Result<Option<T>, EnvError>
    where
        T: TryFrom<Value, Error = EnvError>,
    {
        match self.get::<Option<T>>(key) {
            Ok(v) => Ok(v),
            Err(EnvError::KeyNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use env_cfg::EnvConfig;
    /// # let config = EnvConfig::from_file(".env").unwrap();
    /// let timeout = config.get_or("TIMEOUT", 30u64);
    /// let debug = config.get_or("DEBUG", false);
    /// ```
    pub fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = EnvError>,
    {
        self.get(key).unwrap_or(default)
    }

    /// Get the raw `Value` stored under a key.
    pub fn get_value(&self, key: &str) -> Result<Value, EnvError> {
        self.contents.get(key).cloned().ok_or_else(|| EnvError::KeyNotFound {
            key: key.to_string(),
            hint: Some(format!("Check that {} is declared in {}", key, self.source)),
            code: Some(304),
        })
    }

    pub fn keys(&self) -> Vec<String> {
        self.contents.keys().cloned().collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.contents.contains_key(key)
    }
}

/// Attach the line that declared `key` to type and validation errors.
pub(super) fn enhance_error_with_line_info(e: EnvError, key: &str, raw_content: &str) -> EnvError {
    match e {
        EnvError::TypeError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_config_line(key, raw_content);
            if line > 0 {
                EnvError::TypeError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    hint,
                    code,
                }
            } else {
                EnvError::TypeError { message, line: 0, hint, code }
            }
        }
        EnvError::ValidationError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_config_line(key, raw_content);
            if line > 0 {
                EnvError::ValidationError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    hint,
                    code,
                }
            } else {
                EnvError::ValidationError { message, line: 0, hint, code }
            }
        }
        other => other,
    }
}
