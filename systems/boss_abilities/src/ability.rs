//! Ability definitions and the closed catalogue of targeting variants.

use std::time::Duration;

use serde::Deserialize;
use wildfire_core::{FireStrength, ItemKind};

/// Immutable description of one ability inside a boss pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityDefinition {
    name: String,
    interval: Option<Duration>,
    trigger: Option<String>,
    notification: NotificationMode,
    sound: Option<String>,
    shake: bool,
    params: AbilityParams,
}

impl AbilityDefinition {
    /// Creates a trigger-less, timer-less ability with default cues.
    #[must_use]
    pub fn new(name: impl Into<String>, params: AbilityParams) -> Self {
        Self {
            name: name.into(),
            interval: None,
            trigger: None,
            notification: NotificationMode::default(),
            sound: None,
            shake: false,
            params,
        }
    }

    /// Casts the ability every `interval` while the encounter runs.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Casts the ability whenever the named external trigger is flushed.
    #[must_use]
    pub fn with_trigger(mut self, event: impl Into<String>) -> Self {
        self.trigger = Some(event.into());
        self
    }

    /// Selects how sound and shake cues are timed.
    #[must_use]
    pub fn with_notification(mut self, mode: NotificationMode) -> Self {
        self.notification = mode;
        self
    }

    /// Overrides the sound key, which otherwise defaults to the variant key.
    #[must_use]
    pub fn with_sound(mut self, key: impl Into<String>) -> Self {
        self.sound = Some(key.into());
        self
    }

    /// Enables screen shake alongside the sound cue.
    #[must_use]
    pub fn with_shake(mut self, shake: bool) -> Self {
        self.shake = shake;
        self
    }

    /// Display name shown on the ability banner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cast interval, when the ability runs on a timer.
    ///
    /// Zero intervals are reported as absent: such abilities are trigger-only.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval.filter(|interval| !interval.is_zero())
    }

    /// Name of the external trigger that fires the ability, if any.
    #[must_use]
    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Timing of the ability's sound and shake cues.
    #[must_use]
    pub const fn notification(&self) -> NotificationMode {
        self.notification
    }

    /// Sound key played for the ability.
    #[must_use]
    pub fn sound_key(&self) -> &str {
        self.sound
            .as_deref()
            .unwrap_or_else(|| self.variant().key())
    }

    /// Whether the ability shakes the screen.
    #[must_use]
    pub const fn shake(&self) -> bool {
        self.shake
    }

    /// Variant-specific configuration.
    #[must_use]
    pub const fn params(&self) -> &AbilityParams {
        &self.params
    }

    /// Variant tag of the ability.
    #[must_use]
    pub const fn variant(&self) -> AbilityVariant {
        self.params.variant()
    }
}

/// Timing of the sound and screen-shake cues attached to a cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    /// One cue at cast time.
    #[default]
    Once,
    /// One looping cue lasting for the whole cast.
    Looping,
    /// One cue every time a sub-effect lands.
    PerSubEffect,
    /// One cue when the earliest sub-effect lands.
    OnFirstImpact,
}

/// How a targeting algorithm picks the strength of the fires it starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthPick {
    /// Strongest tier available this wave.
    Strongest,
    /// Strength recommended by the fire engine at the moment of impact.
    Recommended,
    /// Weakest tier available this wave.
    Weakest,
    /// Independent uniform pick among available tiers for every hex.
    #[default]
    Random,
}

/// Fieldless tag naming each ability variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AbilityVariant {
    /// See [`ScatterParams`].
    Scatter,
    /// See [`RingSweepParams`].
    RingSweep,
    /// See [`RingCollapseParams`].
    RingCollapse,
    /// See [`LineStrikeParams`].
    LineStrike,
    /// See [`CrossStrikeParams`].
    CrossStrike,
    /// See [`ZigZagParams`].
    ZigZag,
    /// See [`MeteorShowerParams`].
    MeteorShower,
    /// See [`PathFollowParams`].
    PathFollow,
    /// See [`ItemStrikeParams`].
    ItemStrike,
    /// See [`ClusterRingParams`].
    ClusterRing,
    /// See [`SerpentineParams`].
    Serpentine,
    /// See [`RowSweepParams`].
    RowSweep,
    /// See [`LatticeStrikeParams`].
    LatticeStrike,
    /// See [`VolleyParams`].
    Volley,
    /// See [`SustainedBarrageParams`].
    SustainedBarrage,
    /// See [`AcceleratingScatterParams`].
    AcceleratingScatter,
    /// See [`TripleStrikeParams`].
    TripleStrike,
    /// See [`StokeParams`].
    Stoke,
    /// See [`EdgeBurnParams`].
    EdgeBurn,
    /// See [`SpiralParams`].
    Spiral,
    /// Variant tag not understood by this build.
    Unrecognized,
}

impl AbilityVariant {
    /// Snake-case key used in pattern files and as the default sound key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::RingSweep => "ring_sweep",
            Self::RingCollapse => "ring_collapse",
            Self::LineStrike => "line_strike",
            Self::CrossStrike => "cross_strike",
            Self::ZigZag => "zig_zag",
            Self::MeteorShower => "meteor_shower",
            Self::PathFollow => "path_follow",
            Self::ItemStrike => "item_strike",
            Self::ClusterRing => "cluster_ring",
            Self::Serpentine => "serpentine",
            Self::RowSweep => "row_sweep",
            Self::LatticeStrike => "lattice_strike",
            Self::Volley => "volley",
            Self::SustainedBarrage => "sustained_barrage",
            Self::AcceleratingScatter => "accelerating_scatter",
            Self::TripleStrike => "triple_strike",
            Self::Stoke => "stoke",
            Self::EdgeBurn => "edge_burn",
            Self::Spiral => "spiral",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Variant-specific configuration, tagged by `variant` in pattern files.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AbilityParams {
    /// Random distinct hexes with independent random delays.
    Scatter(ScatterParams),
    /// Concentric rings around a random centre.
    RingSweep(RingSweepParams),
    /// Board rings closing in on the core, one ring deeper per activation.
    RingCollapse(RingCollapseParams),
    /// Straight line through a random centre along one axis.
    LineStrike(LineStrikeParams),
    /// Star of lines radiating from a random centre.
    CrossStrike(CrossStrikeParams),
    /// Zig-zag walk from the board edge across the board.
    ZigZag(ZigZagParams),
    /// Small clusters around random centres, one delay per cluster.
    MeteorShower(MeteorShowerParams),
    /// Entire enemy approach lines.
    PathFollow(PathFollowParams),
    /// Hexes holding a specific category of placed item.
    ItemStrike(ItemStrikeParams),
    /// Rings around clusters of same-strength fire already on the board.
    ClusterRing(ClusterRingParams),
    /// Random walk whose length grows every activation.
    Serpentine(SerpentineParams),
    /// Next batch of hexes from a row-major cursor.
    RowSweep(RowSweepParams),
    /// Every n-th hex in row-major order with a rotating phase.
    LatticeStrike(LatticeStrikeParams),
    /// Two random abilities from a named pool, staggered.
    Volley(VolleyParams),
    /// Scatter strikes on every tick of a growing sustained window.
    SustainedBarrage(SustainedBarrageParams),
    /// Scatter whose cast interval follows an accelerating schedule.
    AcceleratingScatter(AcceleratingScatterParams),
    /// Scatter that turns into a heavy strike every few activations.
    TripleStrike(TripleStrikeParams),
    /// Upgrades fires already burning on the board.
    Stoke(StokeParams),
    /// Outermost ring of the board, walked around the perimeter.
    EdgeBurn(EdgeBurnParams),
    /// Spiral walk outward from the core.
    Spiral(SpiralParams),
    /// Unknown variant tag; casting it is a logged no-op.
    #[serde(other)]
    Unrecognized,
}

impl AbilityParams {
    /// Variant tag of these parameters.
    #[must_use]
    pub const fn variant(&self) -> AbilityVariant {
        match self {
            Self::Scatter(_) => AbilityVariant::Scatter,
            Self::RingSweep(_) => AbilityVariant::RingSweep,
            Self::RingCollapse(_) => AbilityVariant::RingCollapse,
            Self::LineStrike(_) => AbilityVariant::LineStrike,
            Self::CrossStrike(_) => AbilityVariant::CrossStrike,
            Self::ZigZag(_) => AbilityVariant::ZigZag,
            Self::MeteorShower(_) => AbilityVariant::MeteorShower,
            Self::PathFollow(_) => AbilityVariant::PathFollow,
            Self::ItemStrike(_) => AbilityVariant::ItemStrike,
            Self::ClusterRing(_) => AbilityVariant::ClusterRing,
            Self::Serpentine(_) => AbilityVariant::Serpentine,
            Self::RowSweep(_) => AbilityVariant::RowSweep,
            Self::LatticeStrike(_) => AbilityVariant::LatticeStrike,
            Self::Volley(_) => AbilityVariant::Volley,
            Self::SustainedBarrage(_) => AbilityVariant::SustainedBarrage,
            Self::AcceleratingScatter(_) => AbilityVariant::AcceleratingScatter,
            Self::TripleStrike(_) => AbilityVariant::TripleStrike,
            Self::Stoke(_) => AbilityVariant::Stoke,
            Self::EdgeBurn(_) => AbilityVariant::EdgeBurn,
            Self::Spiral(_) => AbilityVariant::Spiral,
            Self::Unrecognized => AbilityVariant::Unrecognized,
        }
    }
}

/// Parameters for [`AbilityParams::Scatter`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScatterParams {
    /// Number of distinct hexes to ignite.
    pub count: u32,
    /// Inclusive lower bound of the per-hex random delay.
    pub delay_min_ms: u64,
    /// Exclusive upper bound of the per-hex random delay.
    pub delay_max_ms: u64,
    /// Delay added to every hex on top of the random one.
    pub base_delay_ms: u64,
    /// Strength selection for each hex.
    pub strength: StrengthPick,
    /// Also targets tiles holding indestructible fixed structures.
    pub include_structures: bool,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            count: 8,
            delay_min_ms: 0,
            delay_max_ms: 1_500,
            base_delay_ms: 0,
            strength: StrengthPick::Random,
            include_structures: false,
        }
    }
}

/// Parameters for [`AbilityParams::RingSweep`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RingSweepParams {
    /// Outermost ring emitted around the centre.
    pub max_radius: u32,
    /// Delay between consecutive rings.
    pub ring_stagger_ms: u64,
    /// Sweeps from the outermost ring inward instead of outward.
    pub inward: bool,
    /// Centres the rings on the core instead of a random hex.
    pub around_core: bool,
}

impl Default for RingSweepParams {
    fn default() -> Self {
        Self {
            max_radius: 3,
            ring_stagger_ms: 300,
            inward: false,
            around_core: false,
        }
    }
}

/// Parameters for [`AbilityParams::RingCollapse`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RingCollapseParams {
    /// Number of consecutive board rings ignited per activation.
    pub rings: u32,
    /// Delay between consecutive rings.
    pub ring_stagger_ms: u64,
}

impl Default for RingCollapseParams {
    fn default() -> Self {
        Self {
            rings: 2,
            ring_stagger_ms: 400,
        }
    }
}

/// Parameters for [`AbilityParams::LineStrike`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineStrikeParams {
    /// Delay per hex of distance.
    pub step_ms: u64,
    /// Lands the far ends first and converges on the centre.
    pub edges_first: bool,
    /// Strength selection for the line.
    pub strength: StrengthPick,
}

impl Default for LineStrikeParams {
    fn default() -> Self {
        Self {
            step_ms: 120,
            edges_first: false,
            strength: StrengthPick::Strongest,
        }
    }
}

/// Parameters for [`AbilityParams::CrossStrike`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrossStrikeParams {
    /// Number of arms: six for a full star, three for alternating arms.
    pub arms: u32,
    /// Delay per hex of distance.
    pub step_ms: u64,
    /// Lands the arm tips first and converges on the centre.
    pub edges_first: bool,
}

impl Default for CrossStrikeParams {
    fn default() -> Self {
        Self {
            arms: 6,
            step_ms: 100,
            edges_first: true,
        }
    }
}

/// Parameters for [`AbilityParams::ZigZag`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ZigZagParams {
    /// Steps taken before the walk switches heading.
    pub segment_length: u32,
    /// Delay per step from the start of the walk.
    pub step_ms: u64,
    /// Strength selection for the walk.
    pub strength: StrengthPick,
}

impl Default for ZigZagParams {
    fn default() -> Self {
        Self {
            segment_length: 3,
            step_ms: 90,
            strength: StrengthPick::Recommended,
        }
    }
}

/// Parameters for [`AbilityParams::MeteorShower`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MeteorShowerParams {
    /// Number of cluster centres.
    pub clusters: u32,
    /// Ring radius of each cluster around its centre.
    pub cluster_radius: u32,
    /// Delay between consecutive clusters.
    pub cluster_stagger_ms: u64,
}

impl Default for MeteorShowerParams {
    fn default() -> Self {
        Self {
            clusters: 4,
            cluster_radius: 1,
            cluster_stagger_ms: 600,
        }
    }
}

/// Parameters for [`AbilityParams::PathFollow`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathFollowParams {
    /// Delay between consecutive approach lines.
    pub line_offset_ms: u64,
    /// Delay between consecutive hexes within one line.
    pub hex_stagger_ms: u64,
    /// Maximum number of lines ignited; zero means every line.
    pub max_lines: u32,
    /// Strength selection for the lines.
    pub strength: StrengthPick,
}

impl Default for PathFollowParams {
    fn default() -> Self {
        Self {
            line_offset_ms: 800,
            hex_stagger_ms: 80,
            max_lines: 0,
            strength: StrengthPick::Recommended,
        }
    }
}

/// Parameters for [`AbilityParams::ItemStrike`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemStrikeParams {
    /// Category of placed item to target.
    pub item: ItemKind,
    /// Exclusive upper bound of the per-hex random delay.
    pub delay_max_ms: u64,
    /// Scatter size used when no such item is on the board.
    pub fallback_count: u32,
}

impl Default for ItemStrikeParams {
    fn default() -> Self {
        Self {
            item: ItemKind::Turret,
            delay_max_ms: 600,
            fallback_count: 3,
        }
    }
}

/// Parameters for [`AbilityParams::ClusterRing`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClusterRingParams {
    /// Smallest cluster of same-strength fire that gets encircled.
    pub min_cluster: u32,
    /// Delay between consecutive clusters.
    pub cluster_stagger_ms: u64,
    /// Random-strength scatter size used when no cluster qualifies.
    pub fallback_count: u32,
}

impl Default for ClusterRingParams {
    fn default() -> Self {
        Self {
            min_cluster: 2,
            cluster_stagger_ms: 250,
            fallback_count: 5,
        }
    }
}

/// Parameters for [`AbilityParams::Serpentine`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerpentineParams {
    /// Path length on the first activation.
    pub starting_length: u32,
    /// Extra length added per previous activation.
    pub increment: u32,
    /// Delay per step along the path.
    pub step_ms: u64,
}

impl Default for SerpentineParams {
    fn default() -> Self {
        Self {
            starting_length: 10,
            increment: 3,
            step_ms: 100,
        }
    }
}

/// Parameters for [`AbilityParams::RowSweep`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RowSweepParams {
    /// Hexes consumed from the cursor per activation.
    pub batch: u32,
    /// Delay per hex within the batch.
    pub step_ms: u64,
}

impl Default for RowSweepParams {
    fn default() -> Self {
        Self {
            batch: 12,
            step_ms: 60,
        }
    }
}

/// Parameters for [`AbilityParams::LatticeStrike`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LatticeStrikeParams {
    /// Every `spacing`-th hex in row-major order is struck.
    pub spacing: u32,
    /// Exclusive upper bound of the per-hex random delay.
    pub delay_max_ms: u64,
}

impl Default for LatticeStrikeParams {
    fn default() -> Self {
        Self {
            spacing: 4,
            delay_max_ms: 800,
        }
    }
}

/// Parameters for [`AbilityParams::Volley`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VolleyParams {
    /// Names of abilities in the same pattern the volley may draw from.
    pub pool: Vec<String>,
    /// Delay between the first and second drawn ability.
    pub stagger_ms: u64,
}

/// Parameters for [`AbilityParams::SustainedBarrage`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SustainedBarrageParams {
    /// Ticks in the first window.
    pub base_ticks: u32,
    /// Extra ticks per previous activation.
    pub tick_growth: u32,
    /// Hexes struck per tick in the first window.
    pub base_hexes: u32,
    /// Extra hexes per tick per previous activation.
    pub hex_growth: u32,
    /// Time between ticks.
    pub tick_interval_ms: u64,
}

impl Default for SustainedBarrageParams {
    fn default() -> Self {
        Self {
            base_ticks: 3,
            tick_growth: 1,
            base_hexes: 3,
            hex_growth: 1,
            tick_interval_ms: 1_000,
        }
    }
}

/// Parameters for [`AbilityParams::AcceleratingScatter`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AcceleratingScatterParams {
    /// Cast intervals in seconds; the last entry repeats forever.
    pub schedule_secs: Vec<f64>,
    /// Hexes struck per activation.
    pub count: u32,
    /// Exclusive upper bound of the per-hex random delay.
    pub delay_max_ms: u64,
}

impl AcceleratingScatterParams {
    /// Interval to wait before the activation following `activations` casts.
    ///
    /// Entries past the end clamp to the last one; non-finite or non-positive
    /// entries and an empty schedule yield `None`.
    #[must_use]
    pub fn interval_after(&self, activations: u32) -> Option<Duration> {
        let last = self.schedule_secs.len().checked_sub(1)?;
        let index = usize::try_from(activations).unwrap_or(usize::MAX).min(last);
        let seconds = self.schedule_secs[index];
        if seconds > 0.0 {
            Duration::try_from_secs_f64(seconds).ok()
        } else {
            None
        }
    }
}

impl Default for AcceleratingScatterParams {
    fn default() -> Self {
        Self {
            schedule_secs: vec![12.0, 9.0, 6.0],
            count: 6,
            delay_max_ms: 1_000,
        }
    }
}

/// Parameters for [`AbilityParams::TripleStrike`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TripleStrikeParams {
    /// Hexes struck on an ordinary activation.
    pub count: u32,
    /// Hexes struck on the heavy activation.
    pub heavy_count: u32,
    /// Every `cadence`-th activation is heavy.
    pub cadence: u32,
    /// Exclusive upper bound of the per-hex random delay.
    pub delay_max_ms: u64,
}

impl Default for TripleStrikeParams {
    fn default() -> Self {
        Self {
            count: 4,
            heavy_count: 12,
            cadence: 3,
            delay_max_ms: 800,
        }
    }
}

/// Parameters for [`AbilityParams::Stoke`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StokeParams {
    /// Maximum number of burning hexes upgraded.
    pub count: u32,
    /// Exclusive upper bound of the per-hex random delay.
    pub delay_max_ms: u64,
    /// Strongest tier reachable, defaulting to the strongest available.
    pub cap: Option<FireStrength>,
}

impl Default for StokeParams {
    fn default() -> Self {
        Self {
            count: 10,
            delay_max_ms: 1_000,
            cap: None,
        }
    }
}

/// Parameters for [`AbilityParams::EdgeBurn`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EdgeBurnParams {
    /// Delay per hex walked around the perimeter.
    pub step_ms: u64,
    /// Strength selection for the perimeter.
    pub strength: StrengthPick,
}

impl Default for EdgeBurnParams {
    fn default() -> Self {
        Self {
            step_ms: 50,
            strength: StrengthPick::Weakest,
        }
    }
}

/// Parameters for [`AbilityParams::Spiral`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    /// Outermost ring reached; zero walks to the board edge.
    pub max_radius: u32,
    /// Delay per hex along the spiral.
    pub step_ms: u64,
    /// Strength selection for the spiral.
    pub strength: StrengthPick,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            max_radius: 0,
            step_ms: 40,
            strength: StrengthPick::Recommended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_means_trigger_only() {
        let ability = AbilityDefinition::new("Idle", AbilityParams::Unrecognized)
            .with_interval(Duration::ZERO);
        assert_eq!(ability.interval(), None);
    }

    #[test]
    fn sound_key_defaults_to_variant_key() {
        let ability =
            AbilityDefinition::new("Rain", AbilityParams::Scatter(ScatterParams::default()));
        assert_eq!(ability.sound_key(), "scatter");
        assert_eq!(ability.with_sound("rain").sound_key(), "rain");
    }

    #[test]
    fn acceleration_schedule_clamps_to_last_entry() {
        let params = AcceleratingScatterParams {
            schedule_secs: vec![10.0, 5.0],
            ..AcceleratingScatterParams::default()
        };
        assert_eq!(params.interval_after(0), Some(Duration::from_secs(10)));
        assert_eq!(params.interval_after(1), Some(Duration::from_secs(5)));
        assert_eq!(params.interval_after(7), Some(Duration::from_secs(5)));
    }

    #[test]
    fn unrepresentable_schedule_entry_has_no_interval() {
        let params = AcceleratingScatterParams {
            schedule_secs: vec![1e20, f64::NAN, 3.0],
            ..AcceleratingScatterParams::default()
        };
        assert_eq!(params.interval_after(0), None);
        assert_eq!(params.interval_after(1), None);
        assert_eq!(params.interval_after(2), Some(Duration::from_secs(3)));
    }

    #[test]
    fn empty_schedule_has_no_interval() {
        let params = AcceleratingScatterParams {
            schedule_secs: Vec::new(),
            ..AcceleratingScatterParams::default()
        };
        assert_eq!(params.interval_after(0), None);
    }
}
