//! Per-encounter escalation counters keyed by ability variant.

use std::collections::BTreeMap;

use crate::ability::AbilityVariant;

/// Activation counts that escalate ability variants within one encounter.
///
/// Every escalating quantity (serpentine length, collapse depth, sweep cursor,
/// lattice phase, barrage size, schedule index, strike cadence) is derived from
/// the number of previous activations of its variant, so counters only ever
/// grow. A fresh set is created whenever an encounter starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EscalationCounters {
    activations: BTreeMap<AbilityVariant, u32>,
}

impl EscalationCounters {
    /// Number of completed activations recorded for the variant.
    #[must_use]
    pub fn activations(&self, variant: AbilityVariant) -> u32 {
        self.activations.get(&variant).copied().unwrap_or(0)
    }

    /// Reports whether no variant has escalated yet.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.activations.values().all(|count| *count == 0)
    }

    /// Records one activation and returns the count before it.
    pub(crate) fn advance(&mut self, variant: AbilityVariant) -> u32 {
        let count = self.activations.entry(variant).or_insert(0);
        let previous = *count;
        *count = count.saturating_add(1);
        previous
    }
}
