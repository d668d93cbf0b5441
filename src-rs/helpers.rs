use std::env;
use std::str::FromStr;

/// Value of `key`, or `fallback` when unset or blank.
pub fn env_or(key: &str, fallback: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => fallback,
    }
}

pub fn env_parse<T: FromStr>(key: &str, fallback: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse::<T>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Comma separated list. `None` when the variable is unset; set but empty yields an empty list.
pub fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = env::var(key).ok()?;
    Some(split_list(&raw))
}

fn split_list(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    for item in raw.split(',') {
        let trimmed = item.trim();
        if !trimmed.is_empty() {
            items.push(trimmed.to_string());
        }
    }
    items
}
