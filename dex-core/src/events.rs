//! Notifications produced for the presentation surface.

use crate::encounter::EncounterRecord;
use crate::grid::DexSlot;
use crate::shiny::ShinyEntry;
use crate::stats::Stats;

/// One notification to the presentation surface.
///
/// The surface owns no ledger state of its own; it renders whatever these
/// carry. Events for a single applied encounter arrive in the order:
/// `Encounter`, `ShinyRecorded` (shiny only), `SlotChanged`, `StatsChanged`.
#[derive(Debug, Clone)]
pub enum DexEvent {
    /// A new encounter was generated and recorded.
    Encounter(EncounterRecord),

    /// A shiny encounter was appended to the history.
    ShinyRecorded(ShinyEntry),

    /// A grid slot changed.
    SlotChanged { id: u32, slot: DexSlot },

    /// The headline statistics changed.
    StatsChanged(Stats),
}
