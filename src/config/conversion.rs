// Author: Dustin Pilgrim
// License: MIT

use crate::{EnvError, Value};

fn expected(what: &str, value: &Value, hint: &str, code: u32) -> EnvError {
    EnvError::TypeError {
        message: format!("Expected {}, got {} {:?}", what, value.type_name(), value),
        line: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

fn out_of_range(n: impl std::fmt::Display, target: &str, hint: &str, code: u32) -> EnvError {
    EnvError::TypeError {
        message: format!("Number {} out of range for {}", n, target),
        line: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(expected("string", &value, "Quote the value in your .env file", 401)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(n) => Ok(n),
            Value::Integer(n) => Ok(n as f64),
            _ => Err(expected("number", &value, "Use a number value in your .env file", 402)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

impl TryFrom<Value> for i64 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(n) => Ok(n),
            Value::Float(_) => Err(expected(
                "integer",
                &value,
                "Remove the decimal point to declare an integer",
                402,
            )),
            _ => Err(expected("integer", &value, "Use a number value in your .env file", 402)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        i32::try_from(n).map_err(|_| {
            out_of_range(n, "i32", "Use a number between -2147483648 and 2147483647", 403)
        })
    }
}

impl TryFrom<Value> for u16 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        u16::try_from(n).map_err(|_| out_of_range(n, "u16", "Use a number between 0 and 65535", 403))
    }
}

impl TryFrom<Value> for u32 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        u32::try_from(n).map_err(|_| out_of_range(n, "u32", "Use a number between 0 and 4294967295", 403))
    }
}

impl TryFrom<Value> for u64 {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        u64::try_from(n).map_err(|_| out_of_range(n, "u64", "Use a positive integer", 403))
    }
}

impl TryFrom<Value> for usize {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        usize::try_from(n).map_err(|_| out_of_range(n, "usize", "Use a positive integer", 403))
    }
}

impl TryFrom<Value> for bool {
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s) if s.to_lowercase().starts_with("tru") || s.to_lowercase().starts_with("fal") => {
                Err(EnvError::TypeError {
                    message: format!("Invalid boolean value '{}'. Did you mean 'true' or 'false'?", s),
                    line: 0,
                    hint: Some("Booleans are true/false or yes/no, in any case".into()),
                    code: Some(404),
                })
            }
            _ => Err(expected("boolean", &value, "Use true/false or yes/no", 404)),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = EnvError>,
{
    type Error = EnvError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}
