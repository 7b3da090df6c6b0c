use std::sync::OnceLock;

use regex::{Captures, Regex};

/// `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"\{\{\s*(?P<scope>[A-Za-z0-9_]+)\.(?P<name>[A-Za-z0-9_]+)\s*(?:\|\s*default\("(?P<default>[^"]*)"\)\s*)?\}\}"#,
        )
        .expect("placeholder regex is valid")
    })
}

/// Substitute environment placeholders in raw TOML text
///
/// Runs before deserialization so config structs hold plain values.
/// Comment lines are copied through untouched, which lets an example
/// config mention variables that are not set.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };
        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let scope = &captures["scope"];
    let name = &captures["name"];

    if scope != "env" {
        return Err(format!("unsupported placeholder scope `{scope}.{name}`, expected `env.`"));
    }

    match (std::env::var(name), captures.name("default")) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_owned()),
        (Err(_), None) => Err(format!("environment variable `{name}` is not set")),
    }
}
