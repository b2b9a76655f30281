//! Template file parsing (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Template file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip `//` and `/* */` comments from JSONC content.
///
/// Comment markers inside string literals are kept. A line comment keeps its
/// terminating newline so line numbers in parse errors stay meaningful.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' || skipped == '\r' {
                        result.push(skipped);
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse content based on the file type of `path`
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Expand a path or glob pattern into the matching files, sorted.
///
/// Unreadable directory entries are skipped.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read and parse a single file.
pub async fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_config(&content, &path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template::TemplateCategory;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case("test.yaml", ConfigFileType::Yaml)]
    #[case("test.YAML", ConfigFileType::Yaml)]
    #[case("test.yml", ConfigFileType::Yaml)]
    #[case("test.json", ConfigFileType::Json)]
    #[case("test.JSON", ConfigFileType::Json)]
    #[case("test.jsonc", ConfigFileType::Jsonc)]
    #[case("test.txt", ConfigFileType::Unknown)]
    #[case("test", ConfigFileType::Unknown)]
    #[case("", ConfigFileType::Unknown)]
    fn test_get_file_type(#[case] path: &str, #[case] expected: ConfigFileType) {
        assert_eq!(get_file_type(path), expected);
    }

    #[rstest]
    #[case("{\"key\": \"value\"}", "{\"key\": \"value\"}")]
    #[case("{\"key\": \"value\"} // comment", "{\"key\": \"value\"} ")]
    #[case("{\"key\": \"value\"} /* block */", "{\"key\": \"value\"} ")]
    #[case("{\"key\": 1} // comment\n", "{\"key\": 1} \n")]
    #[case("{/* a */\"k\"/* b */: 1}", "{\"k\": 1}")]
    #[case("[1, // one\n2]", "[1, \n2]")]
    fn test_strip_json_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_json_comments(input), expected);
    }

    #[rstest]
    #[case(r#"{"key": "value // not a comment"}"#)]
    #[case(r#"{"key": "value /* not a comment */"}"#)]
    #[case(r#"{"key": "value \"quote\" // still string"}"#)]
    #[case(r#"{"key": "ends with backslash \\"}"#)]
    fn test_strip_json_comments_preserves_strings(#[case] input: &str) {
        assert_eq!(strip_json_comments(input), input);
    }

    #[rstest]
    fn test_parse_json_invalid() {
        let result: Result<serde_json::Value, _> = parse_json("invalid json");
        assert!(matches!(result.unwrap_err(), ConfigError::Json(_)));
    }

    #[rstest]
    fn test_parse_jsonc_valid() {
        let content = "{\"id\": \"test\"} /* block */ // line";
        let value: serde_json::Value = parse_jsonc(content).unwrap();
        assert_eq!(value["id"], "test");
    }

    #[rstest]
    fn test_parse_yaml_invalid() {
        let result: Result<serde_json::Value, _> = parse_yaml("invalid: yaml: [");
        assert!(matches!(result.unwrap_err(), ConfigError::Yaml(_)));
    }

    #[rstest]
    #[case("templates.json", r#"[{"name": "Users", "endpoints": []}]"#)]
    #[case("templates.jsonc", "// categories\n[{\"name\": \"Users\", \"endpoints\": []}]")]
    #[case("templates.yaml", "- name: Users\n  endpoints: []\n")]
    fn test_parse_config_categories(#[case] path: &str, #[case] content: &str) {
        let categories: Vec<TemplateCategory> = parse_config(content, path).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Users");
    }

    #[rstest]
    #[case("test.txt")]
    #[case("")]
    fn test_parse_config_unknown_file_type(#[case] path: &str) {
        let result: Result<serde_json::Value, _> = parse_config("{}", path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnknownFileType(_)
        ));
    }

    #[rstest]
    fn test_expand_pattern_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.yaml"), "[]").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let pattern = format!("{}/*.*", dir.path().display());
        let paths = expand_pattern(&pattern).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.json"]);
    }

    #[rstest]
    fn test_expand_pattern_invalid() {
        assert!(matches!(
            expand_pattern("[").unwrap_err(),
            ConfigError::Pattern(_)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_load_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<serde_json::Value, _> =
            load_file(&dir.path().join("missing.json")).await;
        assert!(matches!(result.unwrap_err(), ConfigError::Io { .. }));
    }
}
