use crate::error::ContentError;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

const DELIMITER: &str = "---";

/// Metadata header of a post source file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub featured_image: Option<String>,
}

/// Accept any YAML scalar as a string, so `date: 2024-01-01` and `title: 2024` both load
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split a source file into its front matter block (if any) and body
pub fn split(source: &str) -> Result<(Option<&str>, &str), ContentError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    let first = match lines.next() {
        Some(line) if is_delimiter(line) => line,
        _ => return Ok((None, source)),
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            let body = &source[offset + line.len()..];
            return Ok((Some(&source[start..offset]), body));
        }
        offset += line.len();
    }

    Err(ContentError::UnterminatedFrontMatter)
}

/// Parse front matter and return it with the remaining body
pub fn parse(source: &str) -> Result<(FrontMatter, &str), ContentError> {
    let (block, body) = split(source)?;

    let front_matter = match block {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
        _ => FrontMatter::default(),
    };

    Ok((front_matter, body))
}
