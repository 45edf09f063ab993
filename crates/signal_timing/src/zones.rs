//! Independent timing calculators keyed by detection-zone id.
//!
//! Unlike [`crate::orchestrator::MultiSignalOrchestrator`] there is no phase
//! machine here: each zone only turns counts into snapshots.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::calculator::{TimingCalculator, TimingSnapshot, TimingStatistics};
use crate::config::TimingParams;
use crate::error::SignalError;

#[derive(Resource, Debug, Clone, Default)]
pub struct MultiZoneTiming {
    zones: BTreeMap<String, TimingCalculator>,
}

impl MultiZoneTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the calculator for `zone_id`.
    pub fn add_zone(
        &mut self,
        zone_id: impl Into<String>,
        params: TimingParams,
    ) -> &mut TimingCalculator {
        let zone_id = zone_id.into();
        info!("Zone {} added to dynamic timing", zone_id);
        let calculator = TimingCalculator::new(params);
        match self.zones.entry(zone_id) {
            Entry::Occupied(mut slot) => {
                slot.insert(calculator);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(calculator),
        }
    }

    pub fn remove_zone(&mut self, zone_id: &str) -> bool {
        self.zones.remove(zone_id).is_some()
    }

    pub fn zone(&self, zone_id: &str) -> Option<&TimingCalculator> {
        self.zones.get(zone_id)
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// `None` (with a warning) when the zone was never added.
    pub fn calculate_for_zone(
        &mut self,
        zone_id: &str,
        vehicle_count: i64,
    ) -> Option<TimingSnapshot> {
        match self.calculate_for_zone_checked(zone_id, vehicle_count) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    pub fn calculate_for_zone_checked(
        &mut self,
        zone_id: &str,
        vehicle_count: i64,
    ) -> Result<TimingSnapshot, SignalError> {
        self.zones
            .get_mut(zone_id)
            .map(|calc| calc.calculate(vehicle_count))
            .ok_or_else(|| SignalError::UnknownZone(zone_id.to_string()))
    }

    pub fn all_zone_statistics(&self) -> BTreeMap<String, TimingStatistics> {
        self.zones
            .iter()
            .map(|(id, calc)| (id.clone(), calc.statistics()))
            .collect()
    }
}
