use std::fmt;

use crate::error::{Result, TodoListError};
use crate::model::Todo;

/// A named, ordered collection of todos.
#[derive(Debug, Clone)]
pub struct TodoList {
    title: String,
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(title: impl Into<String>) -> Self {
        TodoList {
            title: title.into(),
            todos: vec![],
        }
    }

    pub fn with_items(title: impl Into<String>, todos: impl IntoIterator<Item = Todo>) -> Self {
        TodoList {
            title: title.into(),
            todos: todos.into_iter().collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    pub fn size(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn first(&self) -> Option<&Todo> {
        self.todos.first()
    }

    pub fn last(&self) -> Option<&Todo> {
        self.todos.last()
    }

    pub fn item_at(&self, index: usize) -> Result<&Todo> {
        let len = self.todos.len();
        self.todos
            .get(index)
            .ok_or(TodoListError::IndexOutOfRange { index, len })
    }

    pub fn item_at_mut(&mut self, index: usize) -> Result<&mut Todo> {
        let len = self.todos.len();
        self.todos
            .get_mut(index)
            .ok_or(TodoListError::IndexOutOfRange { index, len })
    }

    pub fn mark_done_at(&mut self, index: usize) -> Result<()> {
        self.item_at_mut(index)?.mark_done();
        Ok(())
    }

    pub fn mark_undone_at(&mut self, index: usize) -> Result<()> {
        self.item_at_mut(index)?.mark_undone();
        Ok(())
    }

    /// True when every item is done; an empty list counts as done.
    pub fn is_done(&self) -> bool {
        self.todos.iter().all(Todo::is_done)
    }

    pub fn shift(&mut self) -> Option<Todo> {
        if self.todos.is_empty() {
            return None;
        }
        Some(self.todos.remove(0))
    }

    pub fn pop(&mut self) -> Option<Todo> {
        self.todos.pop()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Todo> {
        self.item_at(index)?;
        let removed = self.todos.remove(index);
        log::debug!("removed '{}' from '{}' at {}", removed.title(), self.title, index);
        Ok(removed)
    }

    pub fn to_verbose_string(&self) -> String {
        self.render(Todo::to_verbose_string)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Todo, usize, &TodoList),
    {
        for (index, todo) in self.todos.iter().enumerate() {
            f(todo, index, self);
        }
    }

    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Todo, usize),
    {
        for (index, todo) in self.todos.iter_mut().enumerate() {
            f(todo, index);
        }
    }

    /// Builds a new list with the same title holding copies of the items
    /// the predicate accepts. The receiver is left untouched.
    pub fn filter<P>(&self, mut predicate: P) -> TodoList
    where
        P: FnMut(&Todo, usize, &TodoList) -> bool,
    {
        let mut filtered = TodoList::new(self.title.clone());
        self.for_each(|todo, index, list| {
            if predicate(todo, index, list) {
                filtered.add(todo.clone());
            }
        });
        filtered
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.title() == title)
    }

    pub fn find_by_title_mut(&mut self, title: &str) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.title() == title)
    }

    pub fn all_done(&self) -> TodoList {
        self.filter(|todo, _, _| todo.is_done())
    }

    pub fn all_not_done(&self) -> TodoList {
        self.filter(|todo, _, _| !todo.is_done())
    }

    /// Marks the first todo titled `title` done. Nothing changes when no
    /// todo matches.
    pub fn mark_done(&mut self, title: &str) -> Result<()> {
        self.titled_mut(title)?.mark_done();
        Ok(())
    }

    pub fn mark_undone(&mut self, title: &str) -> Result<()> {
        self.titled_mut(title)?.mark_undone();
        Ok(())
    }

    pub fn mark_all_done(&mut self) {
        self.for_each_mut(|todo, _| {
            todo.mark_done();
        });
    }

    pub fn mark_all_undone(&mut self) {
        self.for_each_mut(|todo, _| {
            todo.mark_undone();
        });
    }

    pub fn to_array(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    fn titled_mut(&mut self, title: &str) -> Result<&mut Todo> {
        match self.todos.iter().position(|todo| todo.title() == title) {
            Some(index) => Ok(&mut self.todos[index]),
            None => {
                log::warn!("no todo titled '{}' in '{}'", title, self.title);
                Err(TodoListError::NotFound {
                    title: title.to_string(),
                })
            }
        }
    }

    fn render(&self, line: impl Fn(&Todo) -> String) -> String {
        let lines: Vec<String> = self.todos.iter().map(line).collect();
        format!("--- {} ---\n{}", self.title, lines.join("\n"))
    }
}

impl fmt::Display for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|todo| todo.to_string()))
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}
