//! Allied units a character can support.
//!
//! Abilities that target "the party" walk a [`PartyView`] and apply effects
//! keyed by distance. The acting character is never part of its own view:
//! effects that also cover the caster (sanctuary healing) address it
//! directly. All access happens on the single simulation thread, so members
//! are mutated through plain `&mut` calls.

use crate::state::{Position, ResourceMeter};

/// A unit that party-wide abilities can read and support.
pub trait PartyMember {
    fn position(&self) -> Position;

    fn health(&self) -> f32;

    fn max_health(&self) -> f32;

    fn is_alive(&self) -> bool;

    /// Heals the member; a dead member is not healed.
    fn heal(&mut self, amount: f32);

    /// Brings a dead member back with `health`.
    ///
    /// Returns `false` if the member is alive or cannot be resurrected by an
    /// ally.
    fn resurrect(&mut self, health: f32) -> bool;

    /// Whether an ally's resurrect would take effect.
    fn can_be_resurrected(&self) -> bool {
        !self.is_alive()
    }

    /// Sets or clears the blessing flag consumed by the combat layer.
    fn set_blessed(&mut self, blessed: bool);

    fn is_blessed(&self) -> bool;

    /// Health as a fraction of maximum health.
    fn health_ratio(&self) -> f32 {
        let max = self.max_health();
        if max <= 0.0 { 0.0 } else { self.health() / max }
    }
}

/// Indexed access to the members of a party.
pub trait PartyView {
    fn len(&self) -> usize;

    fn member(&self, index: usize) -> Option<&dyn PartyMember>;

    fn member_mut(&mut self, index: usize) -> Option<&mut dyn PartyMember>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indices of members within `radius` of `center`.
    fn indices_within(&self, center: Position, radius: f32) -> Vec<usize> {
        (0..self.len())
            .filter(|&index| {
                self.member(index)
                    .is_some_and(|m| m.position().is_within(center, radius))
            })
            .collect()
    }
}

/// The empty party, for characters acting alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoParty;

impl PartyView for NoParty {
    fn len(&self) -> usize {
        0
    }

    fn member(&self, _index: usize) -> Option<&dyn PartyMember> {
        None
    }

    fn member_mut(&mut self, _index: usize) -> Option<&mut dyn PartyMember> {
        None
    }
}

/// Owned list of party members.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Party<M> {
    members: Vec<M>,
}

impl<M: PartyMember> Party<M> {
    pub fn new(members: Vec<M>) -> Self {
        Self { members }
    }

    pub fn push(&mut self, member: M) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[M] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&M> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut M> {
        self.members.get_mut(index)
    }
}

impl<M: PartyMember> PartyView for Party<M> {
    fn len(&self) -> usize {
        self.members.len()
    }

    fn member(&self, index: usize) -> Option<&dyn PartyMember> {
        self.members.get(index).map(|m| m as &dyn PartyMember)
    }

    fn member_mut(&mut self, index: usize) -> Option<&mut dyn PartyMember> {
        self.members.get_mut(index).map(|m| m as &mut dyn PartyMember)
    }
}

/// Lightweight allied unit (monster or NPC) that only carries what party
/// abilities need.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ally {
    pub name: String,
    pub position: Position,
    pub health: ResourceMeter,
    pub blessed: bool,
}

impl Ally {
    pub fn new(name: impl Into<String>, position: Position, max_health: f32) -> Self {
        Self {
            name: name.into(),
            position,
            health: ResourceMeter::full(max_health),
            blessed: false,
        }
    }

    /// Sets current health (clamped), for wounded allies.
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = ResourceMeter::new(health, self.health.maximum);
        self
    }
}

impl PartyMember for Ally {
    fn position(&self) -> Position {
        self.position
    }

    fn health(&self) -> f32 {
        self.health.current
    }

    fn max_health(&self) -> f32 {
        self.health.maximum
    }

    fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    fn heal(&mut self, amount: f32) {
        if self.is_alive() {
            self.health.restore(amount);
        }
    }

    fn resurrect(&mut self, health: f32) -> bool {
        if self.is_alive() || health <= 0.0 {
            return false;
        }
        self.health.restore(health);
        true
    }

    fn set_blessed(&mut self, blessed: bool) {
        self.blessed = blessed;
    }

    fn is_blessed(&self) -> bool {
        self.blessed
    }
}
