use std::fmt;

use chrono::{Local, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Created,
    MarkedDone,
    MarkedUndone,
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeEvent::Created => "created",
            ChangeEvent::MarkedDone => "marked done",
            ChangeEvent::MarkedUndone => "marked undone",
        })
    }
}

/// One entry of a todo's change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub at: NaiveDateTime,
    pub event: ChangeEvent,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.at.format(TIMESTAMP_FORMAT), self.event)
    }
}

/// A single task with a done flag and an append-only history of the
/// transitions that actually changed that flag.
#[derive(Debug, Clone)]
pub struct Todo {
    title: String,
    done: bool,
    history: Vec<Change>,
}

impl Todo {
    pub const DONE_MARKER: &'static str = "X";
    pub const UNDONE_MARKER: &'static str = " ";

    pub fn new(title: impl Into<String>) -> Self {
        let mut todo = Todo {
            title: title.into(),
            done: false,
            history: vec![],
        };
        todo.record(ChangeEvent::Created);
        todo
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn history(&self) -> &[Change] {
        &self.history
    }

    /// Returns `true` if the todo was undone before the call.
    pub fn mark_done(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        self.record(ChangeEvent::MarkedDone);
        log::debug!("marked '{}' done", self.title);
        true
    }

    /// Returns `true` if the todo was done before the call.
    pub fn mark_undone(&mut self) -> bool {
        if !self.done {
            return false;
        }
        self.done = false;
        self.record(ChangeEvent::MarkedUndone);
        log::debug!("marked '{}' undone", self.title);
        true
    }

    pub fn to_verbose_string(&self) -> String {
        let changes: Vec<String> = self.history.iter().map(|c| c.to_string()).collect();
        format!("{}\nChanges:\n{}", self, changes.join("\n"))
    }

    fn record(&mut self, event: ChangeEvent) {
        let now = Local::now().naive_local();
        // wall clock may step backwards; keep the log non-decreasing
        let at = match self.history.last() {
            Some(prev) if prev.at > now => prev.at,
            _ => now,
        };
        self.history.push(Change { at, event });
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.done {
            true => Todo::DONE_MARKER,
            false => Todo::UNDONE_MARKER,
        };
        write!(f, "[{}] {}", marker, self.title)
    }
}
