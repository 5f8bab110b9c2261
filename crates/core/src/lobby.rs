use crate::{PlayerSlot, SlotKind, SlotTable, PLAYABLE_SLOTS};

/// Read-only queries over the current slot table. Every call rescans the
/// table; nothing is cached because the host mutates it between calls.
pub struct LobbySnapshot<'a> {
    slots: &'a dyn SlotTable,
}

impl<'a> LobbySnapshot<'a> {
    pub fn new(slots: &'a dyn SlotTable) -> Self {
        Self { slots }
    }

    pub fn human_count(&self) -> usize {
        self.scan(|slot| slot.kind == SlotKind::Human)
    }

    pub fn ready_human_count(&self) -> usize {
        self.scan(|slot| slot.kind == SlotKind::Human && slot.download >= 100)
    }

    pub fn open_slot_count(&self) -> usize {
        self.scan(|slot| slot.kind == SlotKind::EitherPreferHuman)
    }

    fn scan(&self, keep: impl Fn(&PlayerSlot) -> bool) -> usize {
        (0..PLAYABLE_SLOTS)
            .filter(|index| keep(&self.slots.slot(*index)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Race;

    struct FixedTable([PlayerSlot; PLAYABLE_SLOTS]);

    impl SlotTable for FixedTable {
        fn slot(&self, index: usize) -> PlayerSlot {
            self.0[index]
        }

        fn local_player(&self) -> Option<usize> {
            Some(0)
        }
    }

    #[test]
    fn counts_scan_the_whole_table() {
        let mut slots = [PlayerSlot::vacant(); PLAYABLE_SLOTS];
        slots[0] = PlayerSlot::human(Race::Terran, 100);
        slots[1] = PlayerSlot::human(Race::Zerg, 40);
        slots[2] = PlayerSlot {
            kind: SlotKind::Computer,
            race: Some(Race::Protoss),
            download: 0,
        };
        slots[3].kind = SlotKind::EitherPreferHuman;
        slots[4].kind = SlotKind::EitherPreferComputer;
        let table = FixedTable(slots);
        let lobby = LobbySnapshot::new(&table);

        assert_eq!(lobby.human_count(), 2);
        assert_eq!(lobby.ready_human_count(), 1);
        assert_eq!(lobby.open_slot_count(), 1);
    }
}
