//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Figx.
//! The Figx project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Rule Engine
//!
//! First-match evaluation of the configured layout rules.
//!
//! Conditions are compiled once when the engine is built. A condition that
//! fails to compile is logged and never matches; a condition that fails at
//! evaluation time (unknown variable, type mismatch) is logged and counts as
//! a non-match for that call. Neither case is fatal, so selection always ends
//! with at worst the builtin fallback.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::errors::{FxError, Result};
use crate::rules::config::{
    FxAttributeRule, FxContainerDecision, FxContainerRule, FxContainerType, FxMappingConfig,
    FxRuleConfig,
};
use crate::rules::context::FxRuleContext;
use crate::rules::eval::evaluate;
use crate::rules::ir::FxExpr;
use crate::rules::parser::parse_expression;

pub const LAYOUT_RULES_FILE: &str = "layout_rules.yaml";
pub const MAPPING_FILE: &str = "mapping.yaml";

/// Attribute rules under this control kind apply to every kind lacking its own.
pub const COMMON_CONTROL: &str = "Common";

const BUILTIN_LAYOUT_RULES: &str = include_str!("../../config/layout_rules.yaml");
const BUILTIN_MAPPING: &str = include_str!("../../config/mapping.yaml");
const PLACEHOLDER_PATTERN: &str = r"\{([^}]+)\}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxAlignAxis {
    Counter,
    Primary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug)]
struct FxCondition {
    source: String,
    compiled: std::result::Result<FxExpr, String>,
}

impl FxCondition {
    fn compile(source: &str, owner: &str) -> Self {
        let compiled = parse_expression(source).map_err(|err| {
            log::warn!("rule '{}' has an invalid condition and will never match: {}", owner, err);
            err.to_string()
        });
        FxCondition {
            source: source.to_string(),
            compiled,
        }
    }

    fn matches(&self, context: &FxRuleContext) -> bool {
        let Ok(expr) = &self.compiled else {
            return false;
        };
        match evaluate(expr, context, &self.source) {
            Ok(value) => value.is_truthy(),
            Err(err) => {
                log::warn!("rule condition treated as non-match: {}", err);
                false
            }
        }
    }
}

/// Evaluates container selection, attribute and mapping rules.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug)]
pub struct FxRuleEngine {
    config: FxRuleConfig,
    mapping: FxMappingConfig,
    container_conditions: Vec<FxCondition>,
    attribute_conditions: BTreeMap<(String, String), Vec<FxCondition>>,
    placeholder: Regex,
}

impl FxRuleEngine {
    pub fn new(config: FxRuleConfig, mapping: FxMappingConfig) -> Result<Self> {
        let container_conditions = config
            .container_selection_rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                let owner = if rule.name.is_empty() {
                    format!("container rule #{}", index)
                } else {
                    rule.name.clone()
                };
                FxCondition::compile(&rule.condition, &owner)
            })
            .collect();

        let mut attribute_conditions = BTreeMap::new();
        for (control, attributes) in &config.attribute_rules {
            for (attribute, rules) in attributes {
                let owner = format!("{}.{}", control, attribute);
                let compiled = rules
                    .iter()
                    .map(|rule| FxCondition::compile(&rule.condition, &owner))
                    .collect();
                attribute_conditions.insert((control.clone(), attribute.clone()), compiled);
            }
        }

        let placeholder = Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|err| FxError::internal(format!("invalid placeholder pattern: {}", err)))?;

        Ok(FxRuleEngine {
            config,
            mapping,
            container_conditions,
            attribute_conditions,
            placeholder,
        })
    }

    /// Engine over the rule tables bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_LAYOUT_RULES, BUILTIN_MAPPING)
    }

    pub fn from_yaml_str(layout_rules: &str, mapping: &str) -> Result<Self> {
        let config: FxRuleConfig = parse_yaml(LAYOUT_RULES_FILE, layout_rules)?;
        let mapping: FxMappingConfig = parse_yaml(MAPPING_FILE, mapping)?;
        Self::new(config, mapping)
    }

    /// Loads `layout_rules.yaml` and `mapping.yaml` from `dir`.
    ///
    /// Both files are required.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let layout_rules = read_config_file(&dir.join(LAYOUT_RULES_FILE))?;
        let mapping = read_config_file(&dir.join(MAPPING_FILE))?;

        let config: FxRuleConfig = parse_yaml(&dir.join(LAYOUT_RULES_FILE).display().to_string(), &layout_rules)?;
        let mapping: FxMappingConfig = parse_yaml(&dir.join(MAPPING_FILE).display().to_string(), &mapping)?;
        Self::new(config, mapping)
    }

    pub fn config(&self) -> &FxRuleConfig {
        &self.config
    }

    pub fn mapping(&self) -> &FxMappingConfig {
        &self.mapping
    }

    /// First container rule whose condition holds.
    pub fn select_container_rule(&self, context: &FxRuleContext) -> Option<&FxContainerRule> {
        self.config
            .container_selection_rules
            .iter()
            .zip(&self.container_conditions)
            .find(|(_, condition)| condition.matches(context))
            .map(|(rule, _)| rule)
    }

    /// Container decision for a frame, falling back to a vertical stack.
    pub fn select_container(&self, context: &FxRuleContext) -> FxContainerDecision {
        let Some(rule) = self.select_container_rule(context) else {
            log::debug!("no container rule matched, using vertical stack");
            return FxContainerDecision::fallback();
        };

        if rule.result.container_type == FxContainerType::Unknown {
            log::warn!(
                "container rule '{}' names an unknown container type, using vertical stack",
                rule.name
            );
            return FxContainerDecision::fallback();
        }

        log::debug!("container rule '{}' matched", rule.name);
        rule.result.clone()
    }

    /// Value of `attribute` on a `control` according to the attribute rules.
    ///
    /// Rules for the control kind win; `Common` is consulted only when the
    /// kind has no rules for the attribute. `None` when no rule matches.
    pub fn compute_attribute(&self, control: &str, attribute: &str, context: &FxRuleContext) -> Option<String> {
        let (rules, conditions) = self
            .attribute_rules(control, attribute)
            .or_else(|| self.attribute_rules(COMMON_CONTROL, attribute))?;

        rules
            .iter()
            .zip(conditions)
            .find(|(_, condition)| condition.matches(context))
            .map(|(rule, _)| self.render_template(&rule.value, context))
    }

    /// Attribute names that have rules for `control`, including `Common` ones.
    pub fn attribute_names(&self, control: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for table in [control, COMMON_CONTROL] {
            if let Some(attributes) = self.config.attribute_rules.get(table) {
                for name in attributes.keys() {
                    if !names.contains(&name.as_str()) {
                        names.push(name);
                    }
                }
            }
        }
        names
    }

    /// Substitutes `{expression}` placeholders.
    ///
    /// When any placeholder fails, the template is returned unchanged.
    pub fn render_template(&self, template: &str, context: &FxRuleContext) -> String {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for captures in self.placeholder.captures_iter(template) {
            let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let source = inner.as_str().trim();
            match parse_expression(source).and_then(|expr| evaluate(&expr, context, source)) {
                Ok(value) => {
                    rendered.push_str(&template[last..whole.start()]);
                    rendered.push_str(&value.to_string());
                    last = whole.end();
                }
                Err(err) => {
                    log::warn!("template '{}' left unrendered: {}", template, err);
                    return template.to_string();
                }
            }
        }

        rendered.push_str(&template[last..]);
        rendered
    }

    /// Maps an auto-layout alignment value to a framework alignment name.
    pub fn alignment(&self, axis: FxAlignAxis, value: &str, direction: FxDirection) -> String {
        let table = match axis {
            FxAlignAxis::Counter => &self.mapping.alignment_mapping.counter_axis,
            FxAlignAxis::Primary => &self.mapping.alignment_mapping.primary_axis,
        };
        let fallback = match direction {
            FxDirection::Horizontal => "Left",
            FxDirection::Vertical => "Top",
        };

        table
            .get(value)
            .and_then(|entry| match direction {
                FxDirection::Horizontal => entry.horizontal.clone(),
                FxDirection::Vertical => entry.vertical.clone(),
            })
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn should_set_dimension(&self, sizing_mode: &str) -> bool {
        self.mapping
            .sizing_mode
            .get(sizing_mode)
            .is_some_and(|rule| rule.set_dimension)
    }

    pub fn should_stretch(&self, sizing_mode: &str) -> bool {
        self.mapping
            .sizing_mode
            .get(sizing_mode)
            .is_some_and(|rule| rule.stretch)
    }

    fn attribute_rules(&self, control: &str, attribute: &str) -> Option<(&[FxAttributeRule], &[FxCondition])> {
        let rules = self.config.attribute_rules.get(control)?.get(attribute)?;
        if rules.is_empty() {
            return None;
        }
        let conditions = self
            .attribute_conditions
            .get(&(control.to_string(), attribute.to_string()))?;
        Some((rules.as_slice(), conditions.as_slice()))
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    let source_name = path.display().to_string();
    if !path.exists() {
        return Err(FxError::config(source_name, "configuration file not found"));
    }
    fs::read_to_string(path).map_err(|err| FxError::config(source_name, err.to_string()))
}

fn parse_yaml<T: DeserializeOwned>(source_name: &str, text: &str) -> Result<T> {
    serde_yaml::from_str(text).map_err(|err| FxError::config(source_name, err.to_string()))
}
