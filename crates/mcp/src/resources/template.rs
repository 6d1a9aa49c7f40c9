//! Minimal RFC 6570 level-1 URI templates (`scheme://{var}/...`).

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UriTemplateError {
    #[error("unclosed variable in template: {0}")]
    Unclosed(String),
    #[error("empty variable name in template: {0}")]
    EmptyName(String),
    #[error("adjacent variables cannot be matched unambiguously: {0}")]
    AdjacentVariables(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Variable(String),
}

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    pub fn parse(template: &str) -> Result<Self, UriTemplateError> {
        let mut parts = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                parts.push(Part::Literal(rest[..open].to_string()));
            }
            let close = rest[open..]
                .find('}')
                .ok_or_else(|| UriTemplateError::Unclosed(template.to_string()))?;
            let name = &rest[open + 1..open + close];
            if name.is_empty() {
                return Err(UriTemplateError::EmptyName(template.to_string()));
            }
            if matches!(parts.last(), Some(Part::Variable(_))) {
                return Err(UriTemplateError::AdjacentVariables(template.to_string()));
            }
            parts.push(Part::Variable(name.to_string()));
            rest = &rest[open + close + 1..];
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a concrete URI, returning the variable bindings.
    ///
    /// A variable binds a non-empty run of characters that contains no `/`.
    pub fn match_uri(&self, uri: &str) -> Option<HashMap<String, String>> {
        let mut bindings = HashMap::new();
        let mut pos = 0;

        for (i, part) in self.parts.iter().enumerate() {
            match part {
                Part::Literal(literal) => {
                    if !uri[pos..].starts_with(literal.as_str()) {
                        return None;
                    }
                    pos += literal.len();
                }
                Part::Variable(name) => {
                    let remaining = &uri[pos..];
                    let end = match self.parts.get(i + 1) {
                        Some(Part::Literal(next)) => remaining.find(next.as_str())?,
                        _ => remaining.len(),
                    };
                    let value = &remaining[..end];
                    if value.is_empty() || value.contains('/') {
                        return None;
                    }
                    bindings.insert(name.clone(), value.to_string());
                    pos += end;
                }
            }
        }

        (pos == uri.len()).then_some(bindings)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_single_variable() {
        let template = UriTemplate::parse("event://{id}").unwrap();
        let bindings = template.match_uri("event://42").unwrap();
        assert_eq!(bindings.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_no_match() {
        let template = UriTemplate::parse("event://{id}").unwrap();
        assert!(template.match_uri("listing://42").is_none());
        assert!(template.match_uri("event://").is_none());
        assert!(template.match_uri("event://42/extra").is_none());
    }

    #[test]
    fn test_match_with_trailing_literal() {
        let template = UriTemplate::parse("event://{id}/photos/{photo}").unwrap();
        let bindings = template.match_uri("event://7/photos/cover").unwrap();
        assert_eq!(bindings["id"], "7");
        assert_eq!(bindings["photo"], "cover");
        assert!(template.match_uri("event://7/videos/cover").is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            UriTemplate::parse("event://{id"),
            Err(UriTemplateError::Unclosed("event://{id".to_string()))
        );
        assert!(matches!(
            UriTemplate::parse("event://{}"),
            Err(UriTemplateError::EmptyName(_))
        ));
        assert!(matches!(
            UriTemplate::parse("event://{a}{b}"),
            Err(UriTemplateError::AdjacentVariables(_))
        ));
    }

    #[test]
    fn test_display_is_source() {
        let template = UriTemplate::parse("event://{id}").unwrap();
        assert_eq!(template.to_string(), "event://{id}");
    }
}
