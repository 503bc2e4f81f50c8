//! In-memory todo lists: a [`Todo`] with a done flag and change log, and a
//! named, ordered [`TodoList`] of them.

mod error;
mod list;
mod model;

pub use error::{Result, TodoListError};
pub use list::TodoList;
pub use model::{Change, ChangeEvent, Todo};
