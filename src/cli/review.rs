use crossterm::event::KeyCode;
use log::warn;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::cli::{load_file, Context};
use crate::error::Result;
use crate::fmt::{date, money};
use crate::reports::expense_summary;
use crate::reviewer::{add_category, ReviewSession};
use crate::store::CategoryStore;
use crate::tui::{
    run_screen, Screen, ScreenAction, EDITED_STYLE, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE,
    OK_STYLE, SELECTED_STYLE,
};

enum Mode {
    Browse,
    NewCategory,
}

struct ExpenseEditor {
    session: ReviewSession,
    store: CategoryStore,
    currency: String,
    /// Session row index of each debit, in file order.
    rows: Vec<usize>,
    selected: usize,
    mode: Mode,
    input: String,
    status: Option<(String, bool)>,
    applied: usize,
    learned: usize,
}

impl ExpenseEditor {
    fn new(session: ReviewSession, store: CategoryStore, currency: &str) -> Self {
        let rows = session
            .transactions()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_debit())
            .map(|(i, _)| i)
            .collect();
        Self {
            session,
            store,
            currency: currency.to_string(),
            rows,
            selected: 0,
            mode: Mode::Browse,
            input: String::new(),
            status: None,
            applied: 0,
            learned: 0,
        }
    }

    fn current_row(&self) -> Option<usize> {
        self.rows.get(self.selected).copied()
    }

    /// Step the selected row's category through the store's category list,
    /// wrapping at either end.
    fn cycle_category(&mut self, forward: bool) {
        let Some(row) = self.current_row() else {
            return;
        };
        let names: Vec<String> = self.store.names().iter().map(|s| s.to_string()).collect();
        if names.is_empty() {
            return;
        }
        let current = self.session.category_of(row).unwrap_or_default();
        let pos = names.iter().position(|n| n == current).unwrap_or(0);
        let next = if forward {
            (pos + 1) % names.len()
        } else {
            (pos + names.len() - 1) % names.len()
        };
        if let Err(e) = self.session.edit(&self.store, row, &names[next]) {
            self.status = Some((e.to_string(), false));
        }
    }

    fn apply(&mut self) {
        match self.session.apply(&mut self.store) {
            Ok(result) => {
                self.applied += result.changed;
                self.learned += result.keywords_added;
                self.status = Some((
                    format!(
                        "Applied {} changes, learned {} keywords",
                        result.changed, result.keywords_added
                    ),
                    true,
                ));
            }
            Err(e) => {
                warn!("applying edits failed: {e}");
                self.status = Some((format!("Could not apply changes: {e}"), false));
            }
        }
    }

    fn submit_category(&mut self) {
        let name = std::mem::take(&mut self.input);
        self.mode = Mode::Browse;
        self.status = Some(match add_category(&mut self.store, &name) {
            Ok(true) => (format!("Added category: {}", name.trim()), true),
            Ok(false) => (format!("Category already exists: {}", name.trim()), false),
            Err(e) => (e.to_string(), false),
        });
    }

    fn draw_expenses(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|&i| {
                let txn = &self.session.transactions()[i];
                let shown = self.session.category_of(i).unwrap_or_default();
                let category = if shown != txn.category {
                    Cell::from(format!("{shown} *")).style(EDITED_STYLE)
                } else {
                    Cell::from(shown.to_string())
                };
                Row::new(vec![
                    Cell::from(date(txn.date)),
                    Cell::from(txn.details.clone()),
                    Cell::from(Line::from(money(txn.amount, &self.currency)).right_aligned()),
                    category,
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Fill(2),
                Constraint::Length(16),
                Constraint::Fill(1),
            ],
        )
        .header(Row::new(vec!["Date", "Details", "Amount", "Category"]).style(HEADER_STYLE))
        .block(Block::bordered().title(" Your Expenses "))
        .row_highlight_style(SELECTED_STYLE);

        let mut state = TableState::default().with_selected(self.current_row().map(|_| self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_summary(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let rows: Vec<Row> = expense_summary(self.session.transactions())
            .into_iter()
            .map(|item| {
                Row::new(vec![
                    Cell::from(item.name),
                    Cell::from(Line::from(money(item.total, &self.currency)).right_aligned()),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(16)])
            .header(Row::new(vec!["Category", "Amount"]).style(HEADER_STYLE))
            .block(Block::bordered().title(" Expenses Summary "));
        frame.render_widget(table, area);
    }
}

impl Screen for ExpenseEditor {
    fn draw(&mut self, frame: &mut Frame) {
        let [title_area, body_area, status_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [table_area, summary_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(body_area);

        let pending = self.session.pending_count();
        let title = Line::from(vec![
            Span::styled("Review expenses", HEADER_STYLE),
            Span::raw(format!("  {} rows", self.rows.len())),
            if pending > 0 {
                Span::styled(format!("  {pending} unapplied"), EDITED_STYLE)
            } else {
                Span::raw("")
            },
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        self.draw_expenses(frame, table_area);
        self.draw_summary(frame, summary_area);

        let status = match (&self.mode, &self.status) {
            (Mode::NewCategory, _) => {
                Line::from(format!("  New category name: {}\u{2588}", self.input))
            }
            (Mode::Browse, Some((msg, true))) => Line::from(Span::styled(msg.clone(), OK_STYLE)),
            (Mode::Browse, Some((msg, false))) => {
                Line::from(Span::styled(msg.clone(), ERROR_STYLE))
            }
            (Mode::Browse, None) => Line::from(""),
        };
        frame.render_widget(Paragraph::new(status), status_area);

        let hints = match self.mode {
            Mode::Browse => {
                "\u{2191}\u{2193} move, \u{2190}\u{2192} change category, a=apply, n=new category, u=undo, q=quit"
            }
            Mode::NewCategory => "Enter=add, Esc=cancel",
        };
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().patch(FOOTER_STYLE).italic()),
            hints_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ScreenAction {
        match self.mode {
            Mode::Browse => match code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.selected + 1 < self.rows.len() {
                        self.selected += 1;
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => self.cycle_category(false),
                KeyCode::Right | KeyCode::Char('l') => self.cycle_category(true),
                KeyCode::Char('a') => self.apply(),
                KeyCode::Char('u') => {
                    let n = self.session.discard();
                    self.status = Some((format!("Discarded {n} unapplied changes"), true));
                }
                KeyCode::Char('n') => {
                    self.input.clear();
                    self.status = None;
                    self.mode = Mode::NewCategory;
                }
                KeyCode::Char('q') | KeyCode::Esc => return ScreenAction::Close,
                _ => {}
            },
            Mode::NewCategory => match code {
                KeyCode::Char(c) => self.input.push(c),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Enter => self.submit_category(),
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Browse;
                }
                _ => {}
            },
        }
        ScreenAction::Continue
    }
}

pub fn run(ctx: &Context, file: &str) -> Result<()> {
    let store = ctx.store_for_update()?;
    let transactions = load_file(file, &store)?;
    let session = ReviewSession::new(transactions);

    let mut editor = ExpenseEditor::new(session, store, ctx.currency());
    if editor.rows.is_empty() {
        println!("No expenses to review.");
        return Ok(());
    }

    let result = run_screen(&mut editor);

    let discarded = editor.session.pending_count();
    println!(
        "{} changes applied, {} keywords learned",
        editor.applied, editor.learned
    );
    if discarded > 0 {
        println!("{discarded} unapplied changes discarded");
    }
    result
}
