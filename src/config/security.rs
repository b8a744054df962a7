use crate::errors::ScanError;

/// Schemes that must never reach the fetcher or a rendered report link.
const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:", "file:"];

/// Markup that would be injected verbatim into an HTML report.
const DANGEROUS_MARKUP: &[&str] = &["<script", "<iframe", "onerror="];

/// Walk every string in the raw YAML tree before it is deserialised.
pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), ScanError> {
    check_value(value, &mut Vec::new())
}

fn check_value(value: &serde_yaml::Value, path: &mut Vec<String>) -> Result<(), ScanError> {
    match value {
        serde_yaml::Value::String(s) => check_string(s, path),
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                path.push(k.as_str().unwrap_or("?").to_string());
                let result = check_value(v, path);
                path.pop();
                result?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                path.push(format!("[{}]", i));
                let result = check_value(v, path);
                path.pop();
                result?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_string(s: &str, path: &[String]) -> Result<(), ScanError> {
    let lower = s.trim().to_lowercase();
    let hit = DANGEROUS_SCHEMES
        .iter()
        .find(|scheme| lower.starts_with(**scheme))
        .or_else(|| DANGEROUS_MARKUP.iter().find(|m| lower.contains(**m)));

    match hit {
        Some(pattern) => {
            let location = if path.is_empty() { "root".to_string() } else { path.join(".") };
            Err(ScanError::Config(format!(
                "Dangerous pattern '{}' found at config path: {}",
                pattern, location
            )))
        }
        None => Ok(()),
    }
}
