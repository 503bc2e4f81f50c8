use std::{
    cmp::min,
    error::Error,
    io::{self, Stdout},
    time::Duration,
};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Constraint, CrosstermBackend, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use todolist::{Todo, TodoList};

#[derive(Parser, Debug)]
#[command(name = "todolist")]
#[command(about = "Keep a todo list in memory")]
#[command(version)]
struct Cli {
    /// Title of the list
    #[arg(long, env = "TODOLIST_TITLE", default_value = "Todos")]
    title: String,

    /// Initial item, may be repeated
    #[arg(long = "item")]
    items: Vec<String>,

    /// Print the list and exit instead of opening the terminal UI
    #[arg(long, default_value = "false")]
    print: bool,

    /// Print every item's change log too
    #[arg(long, requires = "print", default_value = "false")]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Filter {
    All,
    NotDone,
    Done,
}

impl Filter {
    fn next(self) -> Self {
        match self {
            Filter::All => Filter::NotDone,
            Filter::NotDone => Filter::Done,
            Filter::Done => Filter::All,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::NotDone => "not done",
            Filter::Done => "done",
        }
    }

    fn accepts(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::NotDone => !todo.is_done(),
            Filter::Done => todo.is_done(),
        }
    }
}

enum AppState {
    List,
    Input,
}

struct State {
    pub list: TodoList,
    pub state: AppState,
    pub input: String,
    pub todo_list_state: ListState,
    pub filter: Filter,
    pub show_details: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let list = TodoList::with_items(cli.title, cli.items.into_iter().map(Todo::new));
    log::debug!("starting with {} items in '{}'", list.size(), list.title());

    if cli.print {
        match cli.verbose {
            true => println!("{}", list.to_verbose_string()),
            false => println!("{}", list),
        }
        return Ok(());
    }

    let mut state = State {
        list,
        state: AppState::List,
        input: "".to_string(),
        todo_list_state: ListState::default(),
        filter: Filter::All,
        show_details: false,
    };
    if !state.list.is_empty() {
        state.todo_list_state.select(Some(0));
    }

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;
    result?;

    println!("{}", state.list);
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, Box<dyn Error>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    Ok(terminal.show_cursor()?)
}

/// The list as currently filtered.
fn filtered(list: &TodoList, filter: Filter) -> TodoList {
    match filter {
        Filter::All => list.filter(|_, _, _| true),
        Filter::NotDone => list.all_not_done(),
        Filter::Done => list.all_done(),
    }
}

/// Positions in the backing list of the filtered entries, in order.
fn visible_indices(list: &TodoList, filter: Filter) -> Vec<usize> {
    let mut indices = vec![];
    list.for_each(|todo, index, _| {
        if filter.accepts(todo) {
            indices.push(index);
        }
    });
    indices
}

fn selected_index(state: &State) -> Option<usize> {
    let visible = visible_indices(&state.list, state.filter);
    state
        .todo_list_state
        .selected()
        .and_then(|view_index| visible.get(view_index).copied())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut State,
) -> Result<(), Box<dyn Error>> {
    Ok(loop {
        match state.state {
            AppState::List => draw_list(terminal, state),
            AppState::Input => draw_input(terminal, state),
        };

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                match state.state {
                    AppState::List => match key.code {
                        KeyCode::Char('q') => {
                            break;
                        }
                        KeyCode::Char('N') => state.state = AppState::Input,
                        KeyCode::Char('D') => {
                            if let Some(index) = selected_index(state) {
                                if let Err(err) = state.list.remove_at(index) {
                                    log::warn!("could not remove item: {}", err);
                                }
                                clamp_selection(state);
                            }
                        }
                        KeyCode::Char('j') => todos_move_down(state),
                        KeyCode::Char('k') => todos_move_up(state),
                        KeyCode::Char('l') | KeyCode::Char(' ') => {
                            toggle_todo(state);
                            clamp_selection(state);
                        }
                        KeyCode::Char('A') => {
                            state.list.mark_all_done();
                            clamp_selection(state);
                        }
                        KeyCode::Char('U') => {
                            state.list.mark_all_undone();
                            clamp_selection(state);
                        }
                        KeyCode::Char('f') => {
                            state.filter = state.filter.next();
                            clamp_selection(state);
                        }
                        KeyCode::Char('v') => state.show_details = !state.show_details,
                        _ => {}
                    },
                    AppState::Input => match key.code {
                        KeyCode::Char(c) => {
                            state.input.push(c);
                        }
                        KeyCode::Backspace => {
                            state.input.pop();
                        }
                        KeyCode::Esc => {
                            state.input = "".to_string();
                            state.state = AppState::List
                        }
                        KeyCode::Enter => {
                            save_todo(state);
                            state.input = "".to_string();
                            state.state = AppState::List;
                        }
                        _ => {}
                    },
                }
            }
        }
    })
}

fn save_todo(state: &mut State) {
    let title = state.input.trim();
    if title.is_empty() {
        return;
    }
    state.list.add(Todo::new(title));
    clamp_selection(state);
}

fn toggle_todo(state: &mut State) {
    let Some(index) = selected_index(state) else {
        return;
    };
    let result = match state.list.item_at(index).map(Todo::is_done) {
        Ok(true) => state.list.mark_undone_at(index),
        Ok(false) => state.list.mark_done_at(index),
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        log::warn!("could not toggle item: {}", err);
    }
}

/// Keeps the selection inside the filtered view after it changed size.
fn clamp_selection(state: &mut State) {
    let len = visible_indices(&state.list, state.filter).len();
    let selected = match (state.todo_list_state.selected(), len) {
        (_, 0) => None,
        (Some(v), len) => Some(min(v, len - 1)),
        (None, _) => Some(0),
    };
    state.todo_list_state.select(selected);
}

fn todos_move_up(state: &mut State) {
    match state.todo_list_state.selected() {
        Some(v) => {
            let max = match v {
                0 => None,
                v => Some(v - 1),
            };
            state.todo_list_state.select(max);
        }
        None => clamp_selection(state),
    }
}

fn todos_move_down(state: &mut State) {
    let len = visible_indices(&state.list, state.filter).len();
    match state.todo_list_state.selected() {
        Some(v) if len > 0 => {
            state.todo_list_state.select(Some(min(v + 1, len - 1)));
        }
        _ => clamp_selection(state),
    }
}

fn draw_input(terminal: &mut Terminal<CrosstermBackend<Stdout>>, state: &State) {
    terminal
        .draw(|frame| {
            let size = frame.size();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(2)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(4),
                        Constraint::Min(0),
                    ]
                    .as_ref(),
                )
                .split(size);

            let text = vec![
                Line::from(format!("New todo in '{}'", state.list.title())),
                Line::from("(Enter) Save todo".green().italic()),
                Line::from("(Esc) Cancel".red()),
            ];

            frame.render_widget(
                Paragraph::new(text)
                    .style(Style::default())
                    .alignment(Alignment::Center),
                chunks[0],
            );
            frame.render_widget(
                Paragraph::new(state.input.clone())
                    .block(
                        Block::default()
                            .title("Title")
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded),
                    )
                    .style(Style::default())
                    .alignment(Alignment::Center),
                chunks[1],
            )
        })
        .ok();
}

fn draw_list(terminal: &mut Terminal<CrosstermBackend<Stdout>>, state: &mut State) {
    let view = filtered(&state.list, state.filter);

    let todo_items: Vec<_> = view
        .iter()
        .map(|todo| {
            let style = match todo.is_done() {
                true => Style::default().fg(Color::DarkGray),
                false => Style::default(),
            };
            ListItem::new(todo.to_string()).style(style)
        })
        .collect();

    let header = format!(
        "--- {} --- ({}, {}/{} done)",
        state.list.title(),
        state.filter.label(),
        state.list.all_done().size(),
        state.list.size()
    );
    let todo_ui = List::new(todo_items)
        .block(Block::default().title(header).borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().add_modifier(Modifier::ITALIC))
        .highlight_symbol(">>");

    let details = state
        .todo_list_state
        .selected()
        .and_then(|view_index| view.item_at(view_index).ok())
        .map(Todo::to_verbose_string)
        .unwrap_or_default();
    let details_ui = Paragraph::new(details)
        .block(
            Block::default()
                .title("Changes")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    let help = vec![Line::from(vec![
        "(N) New  ".green(),
        "(space) Toggle  ".into(),
        "(A/U) All done/undone  ".into(),
        "(f) Filter  (v) Changes  ".into(),
        "(D) Delete  ".red(),
        "(q) Quit".red(),
    ])];

    let show_details = state.show_details;
    terminal
        .draw(|frame| {
            let size = frame.size();
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .margin(2)
                .constraints([Constraint::Min(2), Constraint::Length(1)].as_ref())
                .split(size);
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    match show_details {
                        true => [Constraint::Percentage(50), Constraint::Percentage(50)],
                        false => [Constraint::Percentage(100), Constraint::Percentage(0)],
                    }
                    .as_ref(),
                )
                .split(rows[0]);

            frame.render_stateful_widget(todo_ui, columns[0], &mut state.todo_list_state);
            if show_details {
                frame.render_widget(details_ui, columns[1]);
            }
            frame.render_widget(Paragraph::new(help), rows[1]);
        })
        .ok();
}
