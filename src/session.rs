//! Recorded sessions and headless replay.
//!
//! A session file seeds an engine and lists the actions to apply:
//!
//! ```yaml
//! initial: []
//! context:
//!   mode: normal
//! catalogues:
//!   - categories: [steel]
//!     catalogue:
//!       countryDomain: [DE, FR]
//! actions:
//!   - action: set_boolean
//!     field: recycled
//!     value: true
//! ```
//!
//! Catalogue requests issued while replaying are served from the session's
//! catalogues, in the order the engine issues them.

use crate::catalogue::{CatalogueSource, NoOpCatalogueSource, StaticCatalogueSource};
use crate::config::EngineConfig;
use crate::engine::{EngineAction, FilterEngine, RecordingSink, SinkEvent};
use crate::error::{CriteriaError, ErrorContext, IngestErrorKind, Result};
use crate::model::{Catalogue, CatalogueScope, Criteria, FilterContext, FilterGroup};
use crate::summary::ActiveFilterSummary;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A catalogue served for one category scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedCatalogue {
    /// Category selection the catalogue belongs to; empty = unrestricted
    #[serde(default)]
    pub categories: Vec<String>,
    pub catalogue: Catalogue,
}

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// The owner's draft at mount time
    #[serde(alias = "initialGroups")]
    pub initial: Vec<FilterGroup>,
    /// Overrides the configured context
    pub context: Option<FilterContext>,
    pub catalogues: Vec<ScopedCatalogue>,
    pub actions: Vec<EngineAction>,
}

/// Input formats a session or draft may come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            other => Err(CriteriaError::ingest(
                path.display().to_string(),
                IngestErrorKind::UnsupportedFormat(other.unwrap_or("<none>").to_string()),
            )),
        }
    }
}

impl Session {
    /// Parse a session from text.
    pub fn parse(content: &str, format: InputFormat) -> Result<Self> {
        Ok(match format {
            InputFormat::Json => serde_json::from_str(content)?,
            InputFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }

    /// Load a session file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = InputFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| CriteriaError::io(path, e))?;
        Self::parse(&content, format).with_context(|| format!("loading session {}", path.display()))
    }

    fn catalogue_source(&self) -> Box<dyn CatalogueSource> {
        if self.catalogues.is_empty() {
            return Box::new(NoOpCatalogueSource);
        }
        let mut source = StaticCatalogueSource::new();
        for entry in &self.catalogues {
            source.insert(CatalogueScope::new(entry.categories.iter().cloned()), entry.catalogue.clone());
        }
        Box::new(source)
    }
}

/// Parse an external draft (a JSON or YAML list of groups), normalizing
/// malformed groups on the way in.
pub fn parse_groups(content: &str, format: InputFormat) -> Result<Vec<FilterGroup>> {
    Ok(match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml::from_str(content)?,
    })
}

/// What one action produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub action: &'static str,
    pub events: Vec<SinkEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Result of replaying a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    /// Criteria of the final draft
    pub criteria: Criteria,
    pub summary: ActiveFilterSummary,
}

impl ReplayReport {
    /// Every outbound event, in order.
    pub fn events(&self) -> impl Iterator<Item = &SinkEvent> {
        self.steps.iter().flat_map(|s| s.events.iter())
    }

    /// Every rejected action's warning, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|s| s.warning.as_deref())
    }
}

/// Run a session through a fresh engine.
#[must_use]
pub fn replay(session: &Session, config: &EngineConfig) -> ReplayReport {
    let mut config = config.clone();
    if let Some(context) = &session.context {
        config.context = context.clone();
    }

    let source = session.catalogue_source();
    let mut engine = FilterEngine::new(session.initial.clone(), &config, RecordingSink::new());
    serve_pending(&mut engine, source.as_ref());
    engine.sink_mut().take();

    let mut steps = Vec::with_capacity(session.actions.len());
    for (index, action) in session.actions.iter().enumerate() {
        let name = action.name();
        let warning = engine.dispatch(action.clone()).err().map(|w| w.to_string());
        serve_pending(&mut engine, source.as_ref());
        steps.push(ReplayStep {
            index,
            action: name,
            events: engine.sink_mut().take(),
            warning,
        });
    }

    tracing::debug!("Replayed {} action(s)", steps.len());
    ReplayReport {
        steps,
        criteria: engine.criteria(),
        summary: engine.summary(),
    }
}

fn serve_pending(engine: &mut FilterEngine<RecordingSink>, source: &dyn CatalogueSource) {
    if let Some(ticket) = engine.take_pending_refresh() {
        let result = source.fetch(&ticket.scope);
        engine.complete_catalogue_refresh(ticket.token, result);
    }
}
