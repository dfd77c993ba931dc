pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Load a typed request from `--input <path>` or piped stdin.
pub fn load_request<T: DeserializeOwned>(
    input: &Option<String>,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = load_value(input)?;
    Ok(serde_json::from_value(value)?)
}

/// Load a raw JSON value from `--input <path>` or piped stdin.
pub fn load_value(input: &Option<String>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        return file::read_json(path);
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(value),
        None => Err("no input: provide --input <file> or pipe JSON on stdin".into()),
    }
}
