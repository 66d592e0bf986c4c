use std::path::Path;

use crate::{
    domain::BenchmarkSet,
    web::errors::{RenderError, StartupError},
};

const OPEN_DELIM: &str = "{{";
const CLOSE_DELIM: &str = "}}";
const RESULTS_PLACEHOLDER: &str = "results";

#[mockall::automock]
pub trait Render: Send + Sync {
    fn render(&self, results: &[BenchmarkSet]) -> Result<String, RenderError>;
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Text(String),
    Results,
}

/// The dashboard page, parsed once at startup and read-only afterwards.
///
/// The only supported placeholder is `{{ results }}`, replaced with the
/// received benchmark sets as a JSON array.
#[derive(Clone, Debug)]
pub struct DashboardTemplate {
    segments: Vec<Segment>,
}

impl DashboardTemplate {
    pub async fn load(path: &Path) -> Result<Self, StartupError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StartupError::Read {
                path: path.into(),
                source,
            })?;
        let template = Self::parse(&source)?;
        tracing::info!(path = %path.display(), "Dashboard template loaded");
        Ok(template)
    }

    pub fn parse(source: &str) -> Result<Self, StartupError> {
        if source.trim().is_empty() {
            return Err(StartupError::Malformed("template is empty".to_string()));
        }

        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(start) = rest.find(OPEN_DELIM) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after_open = &rest[start + OPEN_DELIM.len()..];
            let Some(end) = after_open.find(CLOSE_DELIM) else {
                return Err(StartupError::Malformed(
                    "unterminated placeholder".to_string(),
                ));
            };
            let name = after_open[..end].trim();
            if name != RESULTS_PLACEHOLDER {
                return Err(StartupError::Malformed(format!(
                    "unknown placeholder {:?}",
                    name
                )));
            }
            segments.push(Segment::Results);
            rest = &after_open[end + CLOSE_DELIM.len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }
}

impl Render for DashboardTemplate {
    fn render(&self, results: &[BenchmarkSet]) -> Result<String, RenderError> {
        let json = if self.segments.contains(&Segment::Results) {
            script_safe_json(results)?
        } else {
            String::new()
        };

        let mut page = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => page.push_str(text),
                Segment::Results => page.push_str(&json),
            }
        }
        Ok(page)
    }
}

/// Serializes results so they can sit inside a `<script>` element.
fn script_safe_json(results: &[BenchmarkSet]) -> Result<String, RenderError> {
    Ok(serde_json::to_string(results)?.replace("</", "<\\/"))
}
