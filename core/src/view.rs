//! The presentation surface driven by `TodoClient`.
//!
//! A surface owns an input field for new items, a list of rows (each with a
//! checkbox, editable text and a delete control), one control per `Filter`
//! and a count display. The client only ever pushes complete state into it.

use crate::filter::Filter;
use crate::types::Todo;

pub trait View {
    /// Text currently typed into the new-item input.
    fn pending_input(&self) -> String;

    fn clear_input(&mut self);

    /// Discard every rendered row and rebuild one row per item, in order.
    fn render_items(&mut self, items: &[Todo]);

    /// Mark `filter`'s control active and every other control inactive.
    fn mark_active_filter(&mut self, filter: Filter);

    fn set_count_text(&mut self, text: &str);
}
