use serde_json::Value;

pub struct JsonHelper;

impl JsonHelper {
    fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
        path.iter().try_fold(value, |current, key| current.get(key))
    }

    pub fn parse_string(value: &Value, path: &[&str]) -> anyhow::Result<String> {
        if let Some(Value::String(text)) = Self::lookup(value, path) {
            return Ok(text.clone());
        }

        Err(anyhow::anyhow!("{} missing", path.join(".")))
    }

    pub fn parse_optional_string(value: &Value, path: &[&str]) -> Option<String> {
        Self::parse_string(value, path).ok()
    }

    pub fn parse_u64(value: &Value, path: &[&str]) -> anyhow::Result<u64> {
        if let Some(number) = Self::lookup(value, path).and_then(Value::as_u64) {
            return Ok(number);
        }

        Err(anyhow::anyhow!("{} missing", path.join(".")))
    }

    /// Any non-negative JSON number, rounded up so page counts derived from
    /// it match dividing the raw value.
    pub fn parse_count(value: &Value, path: &[&str]) -> anyhow::Result<u64> {
        match Self::lookup(value, path) {
            Some(Value::Number(number)) => {
                if let Some(count) = number.as_u64() {
                    return Ok(count);
                }
                match number.as_f64() {
                    Some(count) if count.is_finite() && count >= 0.0 => Ok(count.ceil() as u64),
                    _ => Err(anyhow::anyhow!("{} is not a count", path.join("."))),
                }
            }
            _ => Err(anyhow::anyhow!("{} missing", path.join("."))),
        }
    }

    pub fn parse_string_array(value: &Value, path: &[&str]) -> anyhow::Result<Vec<String>> {
        if let Some(Value::Array(items)) = Self::lookup(value, path) {
            return Ok(items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect());
        }

        Err(anyhow::anyhow!("{} missing", path.join(".")))
    }
}
