//! Primitive aliases and floating-point tolerances shared across the crate.
//!
//! Node and contact identifiers are dense small integers (spec §3, §9): the
//! routing kernel indexes into flat `Vec`s with them rather than walking
//! pointer-linked structures.

/// Identifier of a node in the contact plan. Dense, small, used directly as
/// a `Vec` index by [`crate::plan::NeighborIndex`].
pub type NodeId = u32;

/// Identifier of a contact, unique within a single plan. Distinct from the
/// contact's position in the backing `Vec` (see [`crate::contact::Contact::id`]
/// vs. the `contact_index` used internally by the search).
pub type ContactId = u32;

/// Seconds, as a real number. Used for `t_start`, `t_end`, `owlt`, `setup_s`,
/// and all derived arrival times.
pub type Seconds = f64;

/// Bytes, as a real number (spec treats byte quantities as real to keep the
/// feasibility arithmetic free of integer rounding surprises).
pub type Bytes = f64;

/// Bits per second.
pub type DataRate = f64;

/// Absorbs floating-point drift in time comparisons near a contact's window
/// boundary. Part of the observable contract (spec §4.C, §9): changing it
/// changes behavior near boundaries.
pub const EPS_TIME: Seconds = 1e-12;

/// Absorbs floating-point drift in byte-capacity comparisons.
pub const EPS_BYTES: Bytes = 1e-9;
