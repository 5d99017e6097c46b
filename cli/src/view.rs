//! A `View` that keeps the screen model in memory and prints it on demand.
//!
//! Rows are numbered from 1 in the order they were rendered, so `#N` on the
//! command line can stand in for an id.

use std::io::{self, Write};

use todo_core::{Filter, Todo, TodoId, View};

#[derive(Debug, Default)]
pub struct TerminalView {
    input: String,
    rows: Vec<Todo>,
    active: Filter,
    count: String,
}

impl TerminalView {
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn rows(&self) -> &[Todo] {
        &self.rows
    }

    pub fn active_filter(&self) -> Filter {
        self.active
    }

    pub fn count_text(&self) -> &str {
        &self.count
    }

    /// Id shown on the 1-based row `index`, if there is one.
    pub fn row_id(&self, index: usize) -> Option<&TodoId> {
        index
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(|todo| &todo.id)
    }

    /// Resolve a user reference: `#N` names a shown row, anything else is an
    /// id. Typed ids are matched against the shown rows first, so `123`
    /// finds a row whose id is the string `"123"`.
    pub fn resolve(&self, reference: &str) -> Option<TodoId> {
        let reference = reference.trim();
        if let Some(index) = reference.strip_prefix('#') {
            return index.parse::<usize>().ok().and_then(|i| self.row_id(i)).cloned();
        }
        let shown = self
            .rows
            .iter()
            .map(|todo| &todo.id)
            .find(|id| id.to_string() == reference);
        Some(shown.cloned().unwrap_or_else(|| TodoId::parse_lossy(reference)))
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let controls: Vec<String> = Filter::VALUES
            .iter()
            .map(|filter| {
                if *filter == self.active {
                    format!("[{filter}]")
                } else {
                    filter.to_string()
                }
            })
            .collect();
        writeln!(out, "{}", controls.join(" "))?;

        for (i, todo) in self.rows.iter().enumerate() {
            let mark = if todo.completed { 'x' } else { ' ' };
            writeln!(out, "{:>3}. [{mark}] {}  ({})", i + 1, todo.text, todo.id)?;
        }
        writeln!(out, "{}", self.count)
    }
}

impl View for TerminalView {
    fn pending_input(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn render_items(&mut self, items: &[Todo]) {
        self.rows = items.to_vec();
    }

    fn mark_active_filter(&mut self, filter: Filter) {
        self.active = filter;
    }

    fn set_count_text(&mut self, text: &str) {
        self.count = text.to_string();
    }
}
