use std::sync::Arc;

use segmenter_core::error::RulesLoadError;
use segmenter_core::rules::{load_rule_set_from_paths, RuleSet};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The rule set is
/// read-only for the lifetime of the process; a new rule file takes effect
/// on restart.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rule set every request is scored against.
    pub rule_set: Arc<RuleSet>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(rule_set: RuleSet, config: ServerConfig) -> Self {
        Self {
            rule_set: Arc::new(rule_set),
            config: Arc::new(config),
        }
    }

    /// Load the rule set named by `config` and build the state around it.
    pub fn load(config: ServerConfig) -> Result<Self, RulesLoadError> {
        let rules = &config.rules;
        let rule_set = load_rule_set_from_paths(
            &rules.rules_path,
            rules.code_list_path.as_deref(),
            &rules.load_options(),
        )?;
        Ok(Self::new(rule_set, config))
    }
}
