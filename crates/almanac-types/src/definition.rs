//! Raw, unvalidated region definitions as they appear in configuration.
//!
//! These types deserialize leniently so that validation can report every
//! problem in one pass instead of stopping at the first parse failure.
//! Season keys stay strings (typos become validation messages). Condition
//! lists and impact maps stay untyped JSON, so a scalar where a list belongs
//! or a list where a map belongs is reported rather than rejected by the
//! parser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::SelectionPolicy;

/// A region exactly as written in the config file.
///
/// ```yaml
/// regions:
///   northern_reaches:
///     name: Northern Reaches
///     webhook_url: https://discord.com/api/webhooks/...
///     seasons:
///       winter:
///         conditions: [Bitter cold, Blizzard]
///         mechanical_impacts:
///           Blizzard: [Heavily obscured, Travel pace halved]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Webhook URL for this region's daily post.
    #[serde(default, alias = "webhookUrl")]
    pub webhook_url: Option<String>,
    /// Selection policy; weighted with power 2 when omitted.
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// Season key -> season definition.
    #[serde(default)]
    pub seasons: BTreeMap<String, SeasonDefinition>,
}

/// One season of a [`RegionDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonDefinition {
    /// Ordered condition labels, most common first. Expected to be a list
    /// of strings.
    #[serde(default)]
    pub conditions: Option<Value>,
    /// Condition label -> impact string or list of strings. Expected to be
    /// a map.
    #[serde(default, alias = "mechanicalImpacts")]
    pub mechanical_impacts: Option<Value>,
}

impl SeasonDefinition {
    /// A season listing `conditions` with no impacts.
    pub fn new<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            conditions: Some(Value::Array(
                conditions
                    .into_iter()
                    .map(|c| Value::String(c.into()))
                    .collect(),
            )),
            mechanical_impacts: None,
        }
    }

    /// Set the impact for `label`. A missing or malformed impact structure
    /// is replaced by a fresh map.
    pub fn insert_impact(&mut self, label: impl Into<String>, impact: Value) {
        let mut map = match self.mechanical_impacts.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        map.insert(label.into(), impact);
        self.mechanical_impacts = Some(Value::Object(map));
    }

    /// Builder form of [`SeasonDefinition::insert_impact`].
    #[must_use]
    pub fn with_impact(mut self, label: impl Into<String>, impact: Value) -> Self {
        self.insert_impact(label, impact);
        self
    }
}
