use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::render::Tone;
use crate::tui::app::TuiApp;

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Length(1), // Feedback line
            Constraint::Length(7), // Feeds pane
            Constraint::Min(5),    // Posts pane
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_input(frame, app, chunks[0]);
    render_feedback(frame, app, chunks[1]);
    render_feeds_pane(frame, app, chunks[2]);
    render_posts_pane(frame, app, chunks[3]);
    render_help_bar(frame, app, chunks[4]);

    if app.modal_open {
        render_modal(frame, app);
    }
}

fn render_input(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let border_style = if app.editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if app.submit_enabled {
        " RSS link "
    } else {
        " RSS link (loading...) "
    };

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);

    if app.editing {
        frame.set_cursor_position((area.x + 1 + app.input.len() as u16, area.y + 1));
    }
}

fn render_feedback(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let Some((tone, text)) = &app.feedback else {
        return;
    };

    let style = match tone {
        Tone::Success => Style::default().fg(Color::Green),
        Tone::Failure => Style::default().fg(Color::Red),
    };
    frame.render_widget(Paragraph::new(text.as_str()).style(style), area);
}

fn render_feeds_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let items: Vec<ListItem> = app
        .feeds
        .iter()
        .map(|feed| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    feed.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    feed.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = format!(" Feeds ({}) ", app.feeds.len());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_posts_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = !app.editing && !app.modal_open;

    let items: Vec<ListItem> = app
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let base_style = if post.viewed {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let style = if i == app.post_index && is_active {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if i == app.post_index {
                base_style.bg(Color::DarkGray)
            } else {
                base_style
            };

            ListItem::new(post.title.clone()).style(style)
        })
        .collect();

    let title = format!(" Posts ({}) ", app.posts.len());
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(list, area);
}

fn render_help_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let help = if app.modal_open {
        "Esc close | o open link"
    } else if app.editing {
        "Enter submit | Esc browse posts"
    } else {
        "j/k move | Enter/v preview | o open link | i edit URL | q quit"
    };
    let bar = Paragraph::new(help).style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(bar, area);
}

fn render_modal(frame: &mut Frame, app: &TuiApp) {
    let Some(modal) = &app.modal else {
        return;
    };

    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            modal.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(modal.body.clone()),
        Line::from(""),
        Line::from(Span::styled(
            modal.link.clone(),
            Style::default().fg(Color::Blue),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Preview ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
