//! Read/write access to the host's live dialog hierarchy. The tree is owned
//! and concurrently mutated by the host process; implementations therefore
//! expose mutation through `&self` and callers must never hold references
//! into the tree across frames.

pub trait WidgetTree {
    /// Lookup of a currently displayed dialog by its symbolic name.
    fn dialog(&self, name: &str) -> Option<&dyn Dialog>;
}

pub trait Dialog {
    /// Lookup of a control within this dialog by its fixed index.
    fn control(&self, index: i16) -> Option<&dyn Control>;
}

pub trait Control {
    fn press(&self);
    fn activate(&self);
    fn is_visible(&self) -> bool;
    fn is_disabled(&self) -> bool;
    fn selected_value(&self) -> Option<u32>;
    fn set_selected_value(&self, value: u32);
    fn selected_index(&self) -> Option<usize>;
    fn set_selected_index(&self, index: usize);
    /// Select the list entry matching `text`; false when no entry matched.
    fn select_text(&self, text: &str) -> bool;
    fn text(&self) -> Option<String>;
    fn set_text(&self, text: &str);
}
