//! Waypoint slot assignment.
//!
//! Decides which of the origin / stop / destination slots a newly resolved
//! location fills. Map clicks rotate through the slots as a sliding window of
//! the most recent selections; autocomplete edits target one slot directly.

use std::collections::VecDeque;

use crate::waypoint::Waypoint;

/// A named waypoint role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Origin,
    Destination,
    Stop,
}

impl Slot {
    /// Maps an input field id (`1` = From, `2` = To, `3` = Stop) to its slot.
    ///
    /// Any other id means "no explicit slot" and yields `None`.
    pub fn from_field_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Slot::Origin),
            2 => Some(Slot::Destination),
            3 => Some(Slot::Stop),
            _ => None,
        }
    }
}

/// The origin, optional stop, and destination currently chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotState {
    origin: Option<Waypoint>,
    stop: Option<Waypoint>,
    destination: Option<Waypoint>,
    stop_enabled: bool,
}

impl SlotState {
    pub fn new(stop_enabled: bool) -> Self {
        Self {
            stop_enabled,
            ..Self::default()
        }
    }

    pub fn stop_enabled(&self) -> bool {
        self.stop_enabled
    }

    /// Number of slots in play: 2, or 3 with the stop enabled.
    pub fn capacity(&self) -> usize {
        if self.stop_enabled { 3 } else { 2 }
    }

    pub fn get(&self, slot: Slot) -> Option<&Waypoint> {
        match slot {
            Slot::Origin => self.origin.as_ref(),
            Slot::Stop => self.stop.as_ref(),
            Slot::Destination => self.destination.as_ref(),
        }
    }

    /// Text shown in the field for `slot`, empty when unset.
    pub fn text(&self, slot: Slot) -> &str {
        self.get(slot).map(Waypoint::label).unwrap_or_default()
    }

    /// Filled slots in route order: origin, stop (if enabled), destination.
    pub fn ordered(&self) -> Vec<&Waypoint> {
        let stop = self.stop.as_ref().filter(|_| self.stop_enabled);
        [self.origin.as_ref(), stop, self.destination.as_ref()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Returns the state after `waypoint` is selected.
    ///
    /// With `target` set, that slot is overwritten and nothing else moves.
    /// Without it, the first empty slot is filled; once all are full the
    /// oldest value is evicted and the destination always holds the newest.
    ///
    /// Returns `None` when the selection must be ignored: the waypoint has no
    /// address, or it targets the stop while the stop is disabled.
    pub fn assign(&self, waypoint: Waypoint, target: Option<Slot>) -> Option<Self> {
        if waypoint.address.is_empty() {
            return None;
        }

        let mut next = self.clone();
        match target {
            Some(Slot::Stop) if !self.stop_enabled => return None,
            Some(Slot::Origin) => next.origin = Some(waypoint),
            Some(Slot::Stop) => next.stop = Some(waypoint),
            Some(Slot::Destination) => next.destination = Some(waypoint),
            None => next.rotate_in(waypoint),
        }
        Some(next)
    }

    fn rotate_in(&mut self, waypoint: Waypoint) {
        if self.origin.is_none() {
            self.origin = Some(waypoint);
        } else if self.stop_enabled && self.stop.is_none() {
            if self.destination.is_none() {
                self.stop = Some(waypoint);
            } else {
                self.stop = self.destination.replace(waypoint);
            }
        } else if self.destination.is_none() {
            self.destination = Some(waypoint);
        } else if self.stop_enabled {
            self.origin = self.stop.take();
            self.stop = self.destination.replace(waypoint);
        } else {
            self.origin = self.destination.replace(waypoint);
        }
    }

    /// Turns the stop slot on or off. Disabling discards the stop value;
    /// enabling leaves it empty until the next selection.
    pub fn with_stop_enabled(&self, enabled: bool) -> Self {
        let mut next = self.clone();
        next.stop_enabled = enabled;
        if !enabled {
            next.stop = None;
        }
        next
    }
}

/// Map pins for the most recent selections, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerWindow {
    markers: VecDeque<Waypoint>,
    capacity: usize,
}

impl MarkerWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            markers: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, marker: Waypoint) {
        while self.markers.len() >= self.capacity.max(1) {
            self.markers.pop_front();
        }
        self.markers.push_back(marker);
    }

    /// Changes the window size, dropping the oldest markers that no longer fit.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.markers.len() > capacity {
            self.markers.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.markers.iter()
    }

    pub fn last(&self) -> Option<&Waypoint> {
        self.markers.back()
    }
}
