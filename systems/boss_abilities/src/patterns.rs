//! Boss patterns and the TOML pattern book they are loaded from.

use std::{
    collections::{BTreeMap, HashSet},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::ability::{AbilityDefinition, AbilityParams, NotificationMode};

/// Group whose pattern stands in for groups without one of their own.
pub const FALLBACK_GROUP: u32 = 1;

const BUILTIN_PATTERNS: &str = include_str!("../assets/boss_patterns.toml");

/// Ordered abilities cast during the boss slot of one wave group.
#[derive(Clone, Debug, PartialEq)]
pub struct BossPattern {
    group: u32,
    abilities: Vec<AbilityDefinition>,
}

impl BossPattern {
    /// Creates a pattern for the provided wave group.
    #[must_use]
    pub fn new(group: u32, abilities: Vec<AbilityDefinition>) -> Self {
        Self { group, abilities }
    }

    /// Wave group the pattern belongs to.
    #[must_use]
    pub const fn group(&self) -> u32 {
        self.group
    }

    /// Abilities in declaration order.
    #[must_use]
    pub fn abilities(&self) -> &[AbilityDefinition] {
        &self.abilities
    }

    /// Looks up an ability by display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&AbilityDefinition> {
        self.abilities.iter().find(|ability| ability.name() == name)
    }
}

/// Boss patterns keyed by wave group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternBook {
    patterns: BTreeMap<u32, BossPattern>,
}

impl PatternBook {
    /// Builds a pattern book from already constructed patterns.
    ///
    /// Later patterns replace earlier ones for the same group.
    #[must_use]
    pub fn new(patterns: impl IntoIterator<Item = BossPattern>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|pattern| (pattern.group(), pattern))
                .collect(),
        }
    }

    /// Pattern book compiled into the crate.
    pub fn builtin() -> Result<Self, PatternError> {
        Self::from_toml_str(BUILTIN_PATTERNS)
    }

    /// Parses and validates a TOML pattern document.
    pub fn from_toml_str(source: &str) -> Result<Self, PatternError> {
        let raw: RawBook = toml::from_str(source)?;
        let mut patterns = BTreeMap::new();
        for raw_pattern in raw.patterns {
            let group = raw_pattern.group;
            let pattern = raw_pattern.into_pattern()?;
            if patterns.insert(group, pattern).is_some() {
                return Err(PatternError::DuplicateGroup(group));
            }
        }
        Ok(Self { patterns })
    }

    /// Number of groups with a pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Reports whether the book holds no pattern at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern for `group`, falling back to the [`FALLBACK_GROUP`] pattern.
    #[must_use]
    pub fn resolve(&self, group: u32) -> Option<&BossPattern> {
        self.patterns
            .get(&group)
            .or_else(|| self.patterns.get(&FALLBACK_GROUP))
    }
}

/// Reasons a pattern document may be rejected.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The document is not valid TOML or does not match the pattern schema.
    #[error("failed to parse boss patterns: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two patterns claim the same wave group.
    #[error("boss pattern for group {0} is defined more than once")]
    DuplicateGroup(u32),
    /// An ability has an empty display name.
    #[error("an ability in group {group} has an empty name")]
    EmptyName {
        /// Group of the offending pattern.
        group: u32,
    },
    /// Two abilities in one pattern share a display name.
    #[error("ability `{name}` appears more than once in group {group}")]
    DuplicateAbility {
        /// Group of the offending pattern.
        group: u32,
        /// Repeated name.
        name: String,
    },
    /// An interval is negative, not a number, or too large to represent.
    #[error("ability `{name}` has an invalid interval of {seconds} seconds")]
    InvalidInterval {
        /// Name of the offending ability.
        name: String,
        /// Interval as written in the document.
        seconds: f64,
    },
    /// An accelerating schedule is empty or holds a non-positive or
    /// unrepresentable entry.
    #[error("ability `{name}` has an invalid acceleration schedule")]
    InvalidSchedule {
        /// Name of the offending ability.
        name: String,
    },
    /// A volley draws from an ability missing from its pattern.
    #[error("volley `{name}` references unknown ability `{member}`")]
    UnknownVolleyMember {
        /// Name of the volley.
        name: String,
        /// Missing pool member.
        member: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawBook {
    #[serde(default)]
    patterns: Vec<RawPattern>,
}

#[derive(Debug, Deserialize)]
struct RawPattern {
    group: u32,
    #[serde(default)]
    abilities: Vec<RawAbility>,
}

#[derive(Debug, Deserialize)]
struct RawAbility {
    name: String,
    #[serde(default)]
    interval_secs: Option<f64>,
    #[serde(default)]
    trigger: Option<String>,
    #[serde(default)]
    notification: NotificationMode,
    #[serde(default)]
    sound: Option<String>,
    #[serde(default)]
    shake: bool,
    params: AbilityParams,
}

impl RawPattern {
    fn into_pattern(self) -> Result<BossPattern, PatternError> {
        let group = self.group;
        let mut names = HashSet::new();
        let mut abilities = Vec::with_capacity(self.abilities.len());
        for raw in self.abilities {
            if raw.name.trim().is_empty() {
                return Err(PatternError::EmptyName { group });
            }
            if !names.insert(raw.name.clone()) {
                return Err(PatternError::DuplicateAbility {
                    group,
                    name: raw.name,
                });
            }
            abilities.push(raw.into_definition()?);
        }

        for ability in &abilities {
            if let AbilityParams::Volley(volley) = ability.params() {
                if let Some(member) = volley.pool.iter().find(|member| !names.contains(*member)) {
                    return Err(PatternError::UnknownVolleyMember {
                        name: ability.name().to_owned(),
                        member: member.clone(),
                    });
                }
            }
        }

        Ok(BossPattern::new(group, abilities))
    }
}

impl RawAbility {
    fn into_definition(self) -> Result<AbilityDefinition, PatternError> {
        if let AbilityParams::AcceleratingScatter(params) = &self.params {
            let valid = !params.schedule_secs.is_empty()
                && params
                    .schedule_secs
                    .iter()
                    .all(|seconds| {
                        *seconds > 0.0 && Duration::try_from_secs_f64(*seconds).is_ok()
                    });
            if !valid {
                return Err(PatternError::InvalidSchedule { name: self.name });
            }
        }

        let mut definition = AbilityDefinition::new(self.name, self.params)
            .with_notification(self.notification)
            .with_shake(self.shake);

        if let Some(seconds) = self.interval_secs {
            let interval = Duration::try_from_secs_f64(seconds).map_err(|_| {
                PatternError::InvalidInterval {
                    name: definition.name().to_owned(),
                    seconds,
                }
            })?;
            definition = definition.with_interval(interval);
        }
        if let Some(trigger) = self.trigger {
            definition = definition.with_trigger(trigger);
        }
        if let Some(sound) = self.sound {
            definition = definition.with_sound(sound);
        }
        Ok(definition)
    }
}
