use autolobby_core::{
    Clock, Command, CommandDispatcher, Control, Dialog, MapListing, MapRecord, PlayerSlot,
    SlotTable, WidgetTree, PLAYABLE_SLOTS,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Settable millisecond clock.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// A scripted control. State mutates through `&self` like the real host's
/// widgets, and every mutation is counted so tests can assert on writes.
#[derive(Debug)]
pub struct SimControl {
    visible: Cell<bool>,
    disabled: Cell<bool>,
    text: RefCell<Option<String>>,
    selected_value: Cell<Option<u32>>,
    selected_index: Cell<Option<usize>>,
    options: RefCell<Vec<String>>,
    presses: Cell<u32>,
    activations: Cell<u32>,
    writes: Cell<u32>,
}

impl SimControl {
    fn new() -> Self {
        Self {
            visible: Cell::new(true),
            disabled: Cell::new(false),
            text: RefCell::new(None),
            selected_value: Cell::new(None),
            selected_index: Cell::new(None),
            options: RefCell::new(Vec::new()),
            presses: Cell::new(0),
            activations: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    pub fn script_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn script_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn script_text(&self, text: &str) {
        *self.text.borrow_mut() = Some(text.to_string());
    }

    pub fn script_options(&self, options: &[&str]) {
        *self.options.borrow_mut() = options.iter().map(|entry| entry.to_string()).collect();
    }

    pub fn script_selected_value(&self, value: Option<u32>) {
        self.selected_value.set(value);
    }

    pub fn script_selected_index(&self, index: Option<usize>) {
        self.selected_index.set(index);
    }

    pub fn presses(&self) -> u32 {
        self.presses.get()
    }

    pub fn activations(&self) -> u32 {
        self.activations.get()
    }

    /// Total mutations observed, presses and activations included.
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }

    fn bump(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl Control for SimControl {
    fn press(&self) {
        self.presses.set(self.presses.get() + 1);
        self.bump();
    }

    fn activate(&self) {
        self.activations.set(self.activations.get() + 1);
        self.bump();
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn selected_value(&self) -> Option<u32> {
        self.selected_value.get()
    }

    fn set_selected_value(&self, value: u32) {
        self.selected_value.set(Some(value));
        self.bump();
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected_index.get()
    }

    fn set_selected_index(&self, index: usize) {
        self.selected_index.set(Some(index));
        self.bump();
    }

    fn select_text(&self, text: &str) -> bool {
        let at = self.options.borrow().iter().position(|entry| entry == text);
        match at {
            Some(index) => {
                self.selected_index.set(Some(index));
                self.bump();
                true
            }
            None => false,
        }
    }

    fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = Some(text.to_string());
        self.bump();
    }
}

#[derive(Debug)]
pub struct SimDialog {
    controls: Vec<SimControl>,
}

impl SimDialog {
    fn with_controls(count: usize) -> Self {
        Self {
            controls: (0..count).map(|_| SimControl::new()).collect(),
        }
    }

    pub fn control_at(&self, index: usize) -> Option<&SimControl> {
        self.controls.get(index)
    }

    fn writes(&self) -> u64 {
        self.controls
            .iter()
            .map(|ctrl| u64::from(ctrl.writes()))
            .sum()
    }
}

impl Dialog for SimDialog {
    fn control(&self, index: i16) -> Option<&dyn Control> {
        if index < 0 {
            return None;
        }
        self.controls.get(index as usize).map(|ctrl| ctrl as &dyn Control)
    }
}

#[derive(Debug, Default)]
pub struct SimMapRecord {
    entry_name: RefCell<String>,
    file_name: RefCell<String>,
    full_path: RefCell<String>,
    slots_opened: Cell<bool>,
    writes: Cell<u32>,
}

impl SimMapRecord {
    pub fn entry_name(&self) -> String {
        self.entry_name.borrow().clone()
    }

    pub fn file_name(&self) -> String {
        self.file_name.borrow().clone()
    }

    pub fn full_path(&self) -> String {
        self.full_path.borrow().clone()
    }

    pub fn slots_opened(&self) -> bool {
        self.slots_opened.get()
    }

    fn bump(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl MapRecord for SimMapRecord {
    fn set_entry_name(&self, name: &str) {
        *self.entry_name.borrow_mut() = name.to_string();
        self.bump();
    }

    fn set_file_name(&self, name: &str) {
        *self.file_name.borrow_mut() = name.to_string();
        self.bump();
    }

    fn set_full_path(&self, path: &str) {
        *self.full_path.borrow_mut() = path.to_string();
        self.bump();
    }

    fn open_all_slots(&self) {
        self.slots_opened.set(true);
        self.bump();
    }
}

/// The scripted host. Tests and the CLI mutate it between frames through
/// `&mut self`; during a frame the engine sees it only behind the core
/// collaborator traits.
#[derive(Debug)]
pub struct SimHost {
    pub clock: ManualClock,
    dialogs: BTreeMap<String, SimDialog>,
    slots: [PlayerSlot; PLAYABLE_SLOTS],
    local_player: Option<usize>,
    records: Vec<SimMapRecord>,
    current_folder: RefCell<String>,
    folder_writes: Cell<u32>,
    commands: RefCell<Vec<Command>>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            clock: ManualClock::default(),
            dialogs: BTreeMap::new(),
            slots: [PlayerSlot::vacant(); PLAYABLE_SLOTS],
            local_player: None,
            records: Vec::new(),
            current_folder: RefCell::new(String::new()),
            folder_writes: Cell::new(0),
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Show a dialog with `controls` indexable controls; a no-op when the
    /// dialog is already up.
    pub fn show(&mut self, name: &str, controls: usize) -> &mut SimDialog {
        self.dialogs
            .entry(name.to_string())
            .or_insert_with(|| SimDialog::with_controls(controls))
    }

    pub fn hide(&mut self, name: &str) {
        self.dialogs.remove(name);
    }

    pub fn hide_all(&mut self) {
        self.dialogs.clear();
    }

    pub fn sim_dialog(&self, name: &str) -> Option<&SimDialog> {
        self.dialogs.get(name)
    }

    pub fn sim_control(&self, dialog: &str, index: usize) -> Option<&SimControl> {
        self.dialogs.get(dialog)?.control_at(index)
    }

    pub fn set_slot(&mut self, index: usize, slot: PlayerSlot) {
        self.slots[index] = slot;
    }

    pub fn set_local_player(&mut self, index: Option<usize>) {
        self.local_player = index;
    }

    pub fn add_map_record(&mut self) {
        self.records.push(SimMapRecord::default());
    }

    pub fn map_records(&self) -> &[SimMapRecord] {
        &self.records
    }

    pub fn current_folder(&self) -> String {
        self.current_folder.borrow().clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.commands.get_mut().drain(..).collect()
    }

    /// Every observed mutation: control writes, map-record writes, folder
    /// updates and dispatched commands.
    pub fn total_mutations(&self) -> u64 {
        let controls: u64 = self.dialogs.values().map(SimDialog::writes).sum();
        let records: u64 = self
            .records
            .iter()
            .map(|record| u64::from(record.writes.get()))
            .sum();
        controls
            + records
            + u64::from(self.folder_writes.get())
            + self.commands.borrow().len() as u64
    }
}

impl WidgetTree for SimHost {
    fn dialog(&self, name: &str) -> Option<&dyn Dialog> {
        self.dialogs.get(name).map(|dialog| dialog as &dyn Dialog)
    }
}

impl SlotTable for SimHost {
    fn slot(&self, index: usize) -> PlayerSlot {
        self.slots
            .get(index)
            .copied()
            .unwrap_or_else(PlayerSlot::vacant)
    }

    fn local_player(&self) -> Option<usize> {
        self.local_player
    }
}

impl MapListing for SimHost {
    fn record(&self, index: usize) -> Option<&dyn MapRecord> {
        self.records.get(index).map(|record| record as &dyn MapRecord)
    }

    fn set_current_folder(&self, dir: &str) {
        *self.current_folder.borrow_mut() = dir.to_string();
        self.folder_writes.set(self.folder_writes.get() + 1);
    }
}

impl CommandDispatcher for SimHost {
    fn enqueue(&self, command: Command) {
        self.commands.borrow_mut().push(command);
    }
}
