use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{AddForm, App, InputMode, Screen};
use super::commands;
use super::util::format_amount;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if let Some(alert) = &app.alert {
        render_alert_banner(f, chunks[1], app, &alert.message);
    }
    if app.input_mode == InputMode::Editing {
        render_add_form(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area(), app);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(p.text_dim)),
                    Span::styled(
                        format!("{s}"),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(p.text_dim),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(p.overlay)))
        .style(Style::default().bg(p.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Expenses => super::screens::expenses::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(p.header_bg)
            .bg(p.accent)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(p.header_bg)
            .bg(p.green)
            .add_modifier(Modifier::BOLD),
        InputMode::Editing => Style::default()
            .fg(p.header_bg)
            .bg(p.green)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(p.header_bg)
            .bg(p.red)
            .add_modifier(Modifier::BOLD),
    };

    let goal = app.goal_status.goal;
    let goal_label = if goal > 0.0 {
        format!("goal {}", format_amount(goal))
    } else {
        "no goal".to_string()
    };
    let info = format!(
        " {} | {} expenses | {}",
        app.screen,
        app.expenses.len(),
        goal_label
    );

    let right = match app.screen {
        Screen::Dashboard => " :goal set goal | t theme | ? help ",
        Screen::Expenses => " a add | D delete | t theme | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, p.status_bar_style()),
        Span::styled(" ".repeat(pad), p.status_bar_style()),
        Span::styled(right, p.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(p.accent)),
                Span::styled(&app.command_input, p.command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Editing => {
            let label = AddForm::LABELS[app.form.active];
            let value = &app.form.fields[app.form.active];
            (
                Line::from(vec![
                    Span::styled(
                        format!("{label}> "),
                        Style::default().fg(p.green),
                    ),
                    Span::styled(value, p.command_bar_style()),
                ]),
                Some((label.len() + 2 + value.len()) as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(p.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(p.red)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, a to add an expense, ? for help",
                    p.dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, p.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(p.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// One-line overspend banner across the top of the content area. Display
/// only; it expires on a poll tick without touching any state but its own.
fn render_alert_banner(f: &mut Frame, content: Rect, app: &App, message: &str) {
    let p = app.palette();
    let width = (message.len() as u16 + 4).min(content.width);
    let x = content.x + (content.width.saturating_sub(width)) / 2;
    let area = Rect::new(x, content.y, width, 1);

    f.render_widget(Clear, area);
    let banner = Paragraph::new(Line::from(Span::styled(
        format!("  {message}  "),
        p.alert_style(),
    )))
    .centered();
    f.render_widget(banner, area);
}

fn render_add_form(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let popup_width = 46.min(area.width.saturating_sub(4));
    let popup_height = (AddForm::LABELS.len() as u16 + 4).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let mut lines = vec![Line::from("")];
    for (i, label) in AddForm::LABELS.iter().enumerate() {
        let value = &app.form.fields[i];
        let (marker, style) = if i == app.form.active {
            ("› ", Style::default().fg(p.accent).add_modifier(Modifier::BOLD))
        } else {
            ("  ", p.normal_style())
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker}{label:<12}"), style),
            Span::styled(value.clone(), p.normal_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter next/save | Tab cycle | Esc cancel ",
        p.dim_style(),
    )));

    f.render_widget(Clear, popup_area);
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg))
            .title(Span::styled(
                " Add Expense ",
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(form, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let mut help_text = vec![
        Line::from(Span::styled(
            " SpendTUI Help ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Navigation",
            Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-2        Switch tabs",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Actions",
            Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  a                Add expense (form)    D          Delete expense",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  t                Toggle theme          :          Command mode",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  drag row left    Delete expense        Ctrl-q     Quit",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Commands",
            Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
        )),
    ];

    // Build command list dynamically from the COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<22} {desc}"),
            p.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(p.text_dim),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(help, popup_area);
}
