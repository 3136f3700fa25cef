use std::collections::HashMap;
use std::env;
use std::fs;

/// Settings read through `option_env!` in `src/config.rs`.
const CONFIG_KEYS: [&str; 5] = [
    "API_BASE_URL",
    "API_BASE_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "STORAGE_KEY",
];

/// `KEY=value`, `export KEY=value` and quoted values. Comments and
/// malformed lines yield `None`.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim();
    let value = ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(value);
    Some((key, value))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let dotenv: HashMap<String, String> = match fs::read_to_string(".env") {
        Ok(contents) => contents
            .lines()
            .filter_map(parse_line)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        Err(_) => {
            println!("cargo:warning=.env not found; built-in defaults apply (see .env.example)");
            return;
        }
    };

    // The process environment overrides .env
    for key in CONFIG_KEYS {
        if env::var_os(key).is_some() {
            continue;
        }
        if let Some(value) = dotenv.get(key) {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
