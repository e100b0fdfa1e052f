use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{format_amount, truncate};

/// Rows above the first data row inside the content area: table border
/// plus header. The mouse gesture in `run::tui` relies on this offset.
pub(crate) const TABLE_TOP_OFFSET: u16 = 2;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();

    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded", p.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to open the add form, or use :add",
                p.dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(
                " Expenses (0) ",
                Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, exp)| {
            let is_cursor = i == app.expense_index;

            let style = if is_cursor {
                p.selected_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(exp.date.clone()),
                Cell::from(truncate(&exp.description, 40)),
                Cell::from(truncate(&exp.category, 16)),
                Cell::from(Span::styled(format_amount(exp.amount), p.spend_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(
                format!(" Expenses ({}) ", app.expenses.len()),
                Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
