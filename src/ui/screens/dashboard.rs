use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category chart
            Constraint::Length(3), // Monthly trend sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_monthly_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let status = app.goal_status;

    render_card(
        f,
        cards[0],
        app,
        "Goal",
        status.goal,
        p.accent,
        if status.goal == 0.0 {
            Some("no goal set".to_string())
        } else {
            None
        },
    );
    render_card(
        f,
        cards[1],
        app,
        "Total Spent",
        status.total,
        p.red,
        Some(format!("{} expenses", app.expenses.len())),
    );
    render_card(
        f,
        cards[2],
        app,
        "Remaining",
        status.remaining,
        if status.exceeded { p.red } else { p.green },
        if status.exceeded {
            Some("over goal".to_string())
        } else {
            None
        },
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    amount: f64,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let p = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, p.dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = Span::styled(
        " Spending by Category ",
        Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
    );

    if app.by_category.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(title);
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with a or :add",
            p.dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .by_category
        .iter()
        .take(12)
        .map(|(name, amt)| {
            // NaN casts to 0, so a poisoned bucket simply draws flat
            let val = amt.max(0.0) as u64;
            let label = truncate(name, 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(p.accent))
                .value_style(Style::default().fg(p.text).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.overlay))
                .title(title),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(p.accent))
        .value_style(Style::default().fg(p.text));

    f.render_widget(chart, area);
}

fn render_monthly_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let data: Vec<u64> = app
        .by_month
        .iter()
        .map(|(_, amt)| amt.max(0.0) as u64)
        .collect();

    let months = if app.by_month.is_empty() {
        String::new()
    } else {
        let labels: Vec<&str> = app.by_month.iter().map(|(m, _)| m.as_str()).collect();
        format!("({}) ", labels.join(" · "))
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.overlay))
                .title(Span::styled(
                    format!(" Monthly Spending {months}"),
                    Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(p.yellow));

    f.render_widget(sparkline, area);
}
