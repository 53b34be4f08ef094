use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::domain::email::Mailbox;
use crate::terminal::state::AppState;
use crate::terminal::structs::{
    ButtonStyle, ComposeField, DetailAction, EmailDetail, RowStyle, View,
};

pub fn render(f: &mut Frame, state: &mut AppState) {
    let [nav, main, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_nav(f, nav, state);

    match state.view {
        View::MailboxList => render_mailbox(f, main, state),
        View::Compose => render_compose(f, main, state),
        View::EmailDetail => render_detail(f, main, state),
    }

    render_hints(f, footer, state.view);

    if let Some(msg) = &state.alert {
        render_alert(f, msg);
    }
}

fn render_nav(f: &mut Frame, area: Rect, state: &AppState) {
    let entry = |key: &'static str, label: String, active: bool| {
        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        vec![
            Span::styled(key, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {label} "), style),
            Span::raw("  "),
        ]
    };

    let on_list = |m: Mailbox| state.view == View::MailboxList && state.mailbox == m;
    let mut spans = Vec::new();
    spans.extend(entry("i", Mailbox::Inbox.title(), on_list(Mailbox::Inbox)));
    spans.extend(entry("s", Mailbox::Sent.title(), on_list(Mailbox::Sent)));
    spans.extend(entry("a", "Archived".to_string(), on_list(Mailbox::Archive)));
    spans.extend(entry("c", "Compose".to_string(), state.view == View::Compose));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_mailbox(f: &mut Frame, area: Rect, state: &mut AppState) {
    let block = Block::default()
        .title(format!(" {} ", state.heading))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let items: Vec<ListItem> = state
        .rows
        .iter()
        .map(|r| {
            let (base, subject) = match r.style {
                RowStyle::Unread => (
                    Style::default().fg(Color::White),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                RowStyle::Read => (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(r.sender.clone(), base),
                    Span::raw("  "),
                    Span::styled(r.timestamp.clone(), Style::default().fg(Color::Gray)),
                ]),
                Line::from(Span::styled(r.subject.clone(), subject)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));

    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn render_compose(f: &mut Frame, area: Rect, state: &AppState) {
    let [recipients, subject, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);

    let draft = &state.draft;
    let fields = [
        (ComposeField::Recipients, " To ", recipients),
        (ComposeField::Subject, " Subject ", subject),
        (ComposeField::Body, " Body ", body),
    ];

    for (field, title, rect) in fields {
        let border = if draft.focus == field {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let p = Paragraph::new(draft.field(field))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(p, rect);
    }
}

fn button(label: &'static str, style: ButtonStyle, selected: bool) -> Span<'static> {
    let color = match style {
        ButtonStyle::Danger => Color::Red,
        ButtonStyle::Success => Color::Green,
        ButtonStyle::Info => Color::Cyan,
    };
    let mut s = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if selected {
        s = s.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {label} ]"), s)
}

fn detail_text(detail: &EmailDetail) -> Text<'static> {
    let e = &detail.email;
    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        field("From: ", e.sender.clone()),
        field("To: ", e.recipients.join(", ")),
        field("Subject: ", e.subject.clone()),
        field("Timestamp: ", e.timestamp.clone()),
        Line::raw(""),
    ];
    lines.extend(e.body.lines().map(|l| Line::raw(l.to_string())));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        button(
            detail.archive.label,
            detail.archive.style,
            detail.selected == DetailAction::Archive,
        ),
        Span::raw("  "),
        button(
            EmailDetail::REPLY_LABEL,
            EmailDetail::REPLY_STYLE,
            detail.selected == DetailAction::Reply,
        ),
    ]));
    Text::from(lines)
}

fn render_detail(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Email ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = match &state.detail {
        Some(d) => detail_text(d),
        None => Text::from("Loading…"),
    };

    let p = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.body_scroll, 0));
    f.render_widget(p, area);
}

fn render_hints(f: &mut Frame, area: Rect, view: View) {
    let keys: &[(&str, &str)] = match view {
        View::MailboxList => &[("j/k", "move"), ("Enter", "open"), ("q", "quit")],
        View::EmailDetail => &[
            ("Tab", "select"),
            ("Enter", "press"),
            ("x", "archive"),
            ("r", "reply"),
            ("Esc", "back"),
        ],
        View::Compose => &[
            ("Tab", "next field"),
            ("Ctrl-S", "send"),
            ("Esc", "discard"),
            ("F1-F4", "navigate"),
        ],
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(k, what)| {
            [
                Span::styled(*k, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {what}  ")),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_alert(f: &mut Frame, msg: &str) {
    let width = (msg.chars().count() as u16 + 6).min(f.area().width);
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(f.area());
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let p = Paragraph::new(vec![Line::raw(msg.to_string()), Line::raw(""), Line::raw("[ OK ]")])
        .block(block)
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
