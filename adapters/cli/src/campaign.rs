//! Headless campaign loop wiring the world to the boss scheduler.

use std::{collections::BTreeMap, fmt, time::Duration};

use tracing::{debug, info};
use wildfire_core::{Command, Event, HexCoord, ItemKind, Notification};
use wildfire_system_boss_abilities::{BossAbilities, Config, EncounterView, PatternBook};
use wildfire_world::{self as world, query, World};

/// Trigger raised by the level-up modal halfway through every boss wave.
const LEVEL_UP: &str = "level_up";
/// Steps the level-up modal stays open while the simulation is frozen.
const MODAL_STEPS: u32 = 5;

/// Shape of the campaign played by [`Campaign::run`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct CampaignSettings {
    pub(crate) waves: u32,
    pub(crate) wave_length: Duration,
    pub(crate) tick: Duration,
    pub(crate) radius: u32,
    pub(crate) boss_every: u32,
    pub(crate) group_size: u32,
}

/// What happened during one wave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct WaveSummary {
    number: u32,
    group: u32,
    boss: bool,
    casts: BTreeMap<String, usize>,
    ignitions: usize,
    upgrades: usize,
    burning: usize,
}

impl fmt::Display for WaveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.boss { "boss" } else { "regular" };
        write!(
            f,
            "wave {} (group {}, {kind}): {} ignitions, {} upgrades, {} burning",
            self.number, self.group, self.ignitions, self.upgrades, self.burning
        )?;
        for (name, count) in &self.casts {
            write!(f, "\n  {name} x{count}")?;
        }
        Ok(())
    }
}

/// World, scheduler and settings for one headless run.
#[derive(Debug)]
pub(crate) struct Campaign {
    settings: CampaignSettings,
    world: World,
    abilities: BossAbilities,
    events: Vec<Event>,
}

impl Campaign {
    pub(crate) fn new(settings: CampaignSettings, patterns: PatternBook, seed: u64) -> Self {
        let mut campaign = Self {
            settings,
            world: World::new(),
            abilities: BossAbilities::new(Config::new(patterns, seed)),
            events: Vec::new(),
        };
        campaign.apply(Command::ConfigureBoard {
            radius: settings.radius,
            core_radius: 1,
        });
        campaign.furnish();
        campaign
    }

    /// Plays every wave in order and returns their summaries.
    pub(crate) fn run(&mut self) -> Vec<WaveSummary> {
        (1..=self.settings.waves)
            .map(|number| self.run_wave(number))
            .collect()
    }

    fn run_wave(&mut self, number: u32) -> WaveSummary {
        let group = (number - 1) / self.settings.group_size + 1;
        let boss = number % self.settings.boss_every == 0;
        let mut summary = WaveSummary {
            number,
            group,
            boss,
            ..WaveSummary::default()
        };

        self.extinguish_all();
        self.apply(Command::StartWave {
            number,
            group,
            boss_slot: boss,
            duration: self.settings.wave_length,
        });
        info!(number, group, boss, "wave started");

        let halfway = self.settings.wave_length / 2;
        let mut raised = false;
        let mut modal_steps = 0;
        while query::wave_status(&self.world).active || !self.abilities.pending_effects().is_empty()
        {
            let wave = query::wave_status(&self.world);
            if boss && !raised && wave.active && wave.time_remaining <= halfway {
                raised = true;
                modal_steps = MODAL_STEPS;
                self.apply(Command::SetModalOpen { open: true });
                self.abilities.on_external_trigger(LEVEL_UP);
            }

            if query::modal_open(&self.world) {
                modal_steps -= 1;
                if modal_steps == 0 {
                    self.apply(Command::SetModalOpen { open: false });
                    self.flush(&mut summary);
                }
                continue;
            }
            self.step(&mut summary);
        }

        summary.burning = query::burning_count(&self.world);
        info!(
            number,
            ignitions = summary.ignitions,
            burning = summary.burning,
            "wave finished"
        );
        summary
    }

    fn step(&mut self, summary: &mut WaveSummary) {
        let mut commands = Vec::new();
        let mut notifications = Vec::new();
        {
            let board = query::board_view(&self.world);
            let wave = query::wave_status(&self.world);
            let fire = query::fire_outlook(&self.world);
            let lines = query::approach_lines(&self.world);
            let view = EncounterView::new(&board, &wave, &fire, lines);
            self.abilities.update(
                self.settings.tick,
                &view,
                &mut commands,
                &mut notifications,
            );
        }
        self.settle(commands, &notifications, summary);
        self.apply(Command::Tick {
            dt: self.settings.tick,
        });
    }

    fn flush(&mut self, summary: &mut WaveSummary) {
        let mut commands = Vec::new();
        let mut notifications = Vec::new();
        {
            let board = query::board_view(&self.world);
            let wave = query::wave_status(&self.world);
            let fire = query::fire_outlook(&self.world);
            let lines = query::approach_lines(&self.world);
            let view = EncounterView::new(&board, &wave, &fire, lines);
            self.abilities
                .flush_triggers(&view, &mut commands, &mut notifications);
        }
        self.settle(commands, &notifications, summary);
    }

    fn settle(
        &mut self,
        commands: Vec<Command>,
        notifications: &[Notification],
        summary: &mut WaveSummary,
    ) {
        for notification in notifications {
            match notification {
                Notification::AbilityBanner { name } => {
                    *summary.casts.entry(name.clone()).or_insert(0) += 1;
                }
                other => debug!(?other, "presentation cue"),
            }
        }
        for command in commands {
            match command {
                Command::Ignite { .. } => summary.ignitions += 1,
                Command::UpgradeFire { .. } => summary.upgrades += 1,
                _ => {}
            }
            self.apply(command);
        }
    }

    /// Places a few items and structures for item-seeking abilities to find.
    fn furnish(&mut self) {
        let reach = i32::try_from(self.settings.radius / 2).unwrap_or(0);
        let layout = [
            Command::PlaceItem {
                hex: HexCoord::new(reach, 0),
                kind: ItemKind::Turret,
            },
            Command::PlaceItem {
                hex: HexCoord::new(-reach, reach),
                kind: ItemKind::Sprinkler,
            },
            Command::PlaceItem {
                hex: HexCoord::new(0, -reach),
                kind: ItemKind::Barricade,
            },
            Command::PlaceStructure {
                hex: HexCoord::new(reach, -reach),
            },
        ];
        for command in layout {
            self.apply(command);
        }
    }

    fn extinguish_all(&mut self) {
        let burning: Vec<HexCoord> = query::board_view(&self.world)
            .burning()
            .map(|(hex, _)| hex)
            .collect();
        for hex in burning {
            self.apply(Command::Extinguish { hex });
        }
    }

    fn apply(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        for event in &self.events {
            if let Event::PlacementRejected { hex, reason } = event {
                debug!(?hex, ?reason, "layout placement rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(waves: u32) -> CampaignSettings {
        CampaignSettings {
            waves,
            wave_length: Duration::from_secs(20),
            tick: Duration::from_millis(100),
            radius: 8,
            boss_every: 5,
            group_size: 5,
        }
    }

    fn campaign(waves: u32) -> Campaign {
        let patterns = PatternBook::builtin().expect("builtin patterns parse");
        Campaign::new(settings(waves), patterns, 11)
    }

    #[test]
    fn only_boss_waves_cast_abilities() {
        let summaries = campaign(5).run();

        assert_eq!(summaries.len(), 5);
        for summary in &summaries[..4] {
            assert!(!summary.boss);
            assert!(summary.casts.is_empty());
            assert_eq!(summary.ignitions, 0);
        }
        let boss = &summaries[4];
        assert!(boss.boss);
        assert_eq!(boss.group, 1);
        assert!(boss.ignitions > 0);
    }

    #[test]
    fn level_up_trigger_casts_after_the_modal_closes() {
        let patterns = PatternBook::builtin().expect("builtin patterns parse");
        let triggered: Vec<String> = patterns
            .resolve(1)
            .map(|pattern| {
                pattern
                    .abilities()
                    .iter()
                    .filter(|ability| ability.trigger() == Some(LEVEL_UP))
                    .map(|ability| ability.name().to_owned())
                    .collect()
            })
            .unwrap_or_default();
        assert!(!triggered.is_empty());

        let mut campaign = campaign(5);
        let summaries = campaign.run();

        for name in triggered {
            assert!(summaries[4].casts.contains_key(&name), "{name} was never cast");
        }
        assert!(!query::modal_open(&campaign.world));
    }

    #[test]
    fn waves_start_without_leftover_fire() {
        let mut campaign = campaign(5);
        let _ = campaign.run();
        campaign.extinguish_all();

        assert_eq!(query::burning_count(&campaign.world), 0);
    }

    #[test]
    fn summary_lists_casts_per_ability() {
        let summary = WaveSummary {
            number: 5,
            group: 1,
            boss: true,
            casts: BTreeMap::from([("Ember Rain".to_owned(), 2)]),
            ignitions: 12,
            upgrades: 1,
            burning: 9,
        };

        assert_eq!(
            summary.to_string(),
            "wave 5 (group 1, boss): 12 ignitions, 1 upgrades, 9 burning\n  Ember Rain x2"
        );
    }
}
