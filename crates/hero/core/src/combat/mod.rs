//! Incoming damage resolution.
//!
//! A hit passes through a fixed sequence of layers before it reaches the
//! health pool:
//!
//! 1. stealth dodge (a dodged hit stops here and changes nothing else)
//! 2. class passive (rogue evasion)
//! 3. barrier absorption
//! 4. blessing reduction
//! 5. base clamp against current health
//!
//! Steps 1–4 live in [`mitigation`]; the clamp and death transition are owned
//! by [`CharacterInstance`](crate::character::CharacterInstance).
mod mitigation;

pub(crate) use mitigation::mitigate;

/// Breakdown of one incoming hit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Damage requested by the attacker, after clamping negatives to zero.
    pub incoming: f32,
    /// The hit was negated by stealth.
    pub dodged: bool,
    /// Stealth was active and the dodge roll failed.
    pub stealth_broken: bool,
    /// The class passive lowered the hit.
    pub evaded: bool,
    /// Damage soaked by the barrier.
    pub absorbed: f32,
    /// The barrier pool reached zero on this hit.
    pub barrier_broken: bool,
    /// Damage removed by the blessing.
    pub reduced: f32,
    /// Health actually lost.
    pub dealt: f32,
    /// This hit took the character from alive to dead.
    pub killed: bool,
}

impl DamageReport {
    /// A hit that had no effect (dead target or non-positive amount).
    pub fn ignored(incoming: f32) -> Self {
        Self {
            incoming: incoming.max(0.0),
            ..Self::default()
        }
    }
}
