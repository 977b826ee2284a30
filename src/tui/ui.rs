use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, DetailState, StudyTab, View};
use crate::models::OverallAnalytics;
use crate::study::numeric::display_pct;
use crate::study::StudyPhase;

pub fn draw(frame: &mut Frame, app: &App) {
    match app.view {
        View::Dashboard => draw_dashboard(frame, app),
        View::Upload => draw_upload(frame, app),
        View::Document => draw_document(frame, app),
        View::Analytics => draw_analytics(frame, app),
    }

    if app.show_help {
        render_help(frame);
    }
}

// Dashboard

fn draw_dashboard(frame: &mut Frame, app: &App) {
    let banner_height = if app.source.is_live() { 0 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title bar
            Constraint::Length(banner_height), // Demo-mode banner
            Constraint::Min(0),                // Body
            Constraint::Length(1),             // Status line
        ])
        .split(frame.area());

    let block = Block::default()
        .title(" studyhall ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    let stats = format!(" {} documents", app.documents.len());
    frame.render_widget(
        Paragraph::new(stats).style(Style::default().fg(Color::White)),
        inner,
    );

    if !app.source.is_live() {
        let banner = Paragraph::new(
            " ⚠ No backend configured — showing sample data. Set backend_url in config.toml.",
        )
        .style(Style::default().fg(Color::Black).bg(Color::Yellow));
        frame.render_widget(banner, chunks[1]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[2]);

    render_document_list(frame, app, body[0]);
    render_snapshot(frame, &app.snapshot, body[1], " Study Stats ");

    let status = "j/k:nav  Enter:open  u:upload  a:analytics  r:refresh  ?:help  q:quit";
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn render_document_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .documents
        .iter()
        .map(|document| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", document.created_at.format("%Y-%m-%d")),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(&document.title, Style::default().fg(Color::White)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if app.documents_failed {
        " Documents (unavailable) "
    } else {
        " Documents "
    };

    if items.is_empty() {
        let message = if app.documents_failed {
            "Could not reach the backend.\nPress 'r' to retry."
        } else {
            "No documents yet.\nPress 'u' to upload a PDF."
        };
        let paragraph = Paragraph::new(message)
            .block(Block::default().title(title).borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_snapshot(frame: &mut Frame, snapshot: &OverallAnalytics, area: Rect, title: &str) {
    let lines = vec![
        Line::from(format!(
            "Study time      {}",
            format_study_time(snapshot.total_study_time)
        )),
        Line::from(format!(
            "Streak          {} days (best {})",
            snapshot.current_streak, snapshot.longest_streak
        )),
        Line::from(format!(
            "Flashcards      {} seen / {} mastered",
            snapshot.total_flashcards_seen, snapshot.total_flashcards_mastered
        )),
        Line::from(format!(
            "Card accuracy   {}%",
            display_pct(snapshot.flashcard_accuracy_overall)
        )),
        Line::from(format!(
            "Quizzes         {} completed, avg {}%",
            snapshot.total_quizzes_completed,
            display_pct(snapshot.average_quiz_score_overall)
        )),
        Line::from(format!(
            "Sessions        {} this week",
            snapshot.study_sessions_this_week_count
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn format_study_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

// Upload

fn draw_upload(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Upload a PDF ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title field
            Constraint::Length(3), // File field
            Constraint::Length(1), // Attachment state
            Constraint::Length(1), // Error line
            Constraint::Min(0),
            Constraint::Length(1), // Keys
        ])
        .split(inner);

    render_form_field(
        frame,
        chunks[0],
        " Title ",
        &app.upload_form.title,
        app.upload_form.focus == crate::upload::UploadField::Title,
    );
    render_form_field(
        frame,
        chunks[1],
        " PDF path ",
        &app.upload_form.path_input,
        app.upload_form.focus == crate::upload::UploadField::File,
    );

    let attachment = if app.upload_in_flight {
        Span::styled("⏳ Uploading…", Style::default().fg(Color::Yellow))
    } else if app.upload_form.attached.is_some() {
        Span::styled("✓ PDF attached", Style::default().fg(Color::Green))
    } else {
        Span::styled("No file attached", Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(attachment)), chunks[2]);

    if let Some(error) = &app.upload_form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[3],
        );
    }

    let keys = "Tab:switch field  Enter:submit  Esc:cancel";
    frame.render_widget(
        Paragraph::new(keys).style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );
}

fn render_form_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if focused {
        format!("{value}_")
    } else {
        value.to_string()
    };
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(label.to_string())
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(paragraph, area);
}

// Document view

fn draw_document(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Document title
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Tab body
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    let title = match &app.detail {
        DetailState::Ready(detail) => detail.title.as_str(),
        DetailState::Loading => "Loading…",
        DetailState::Missing => "Not found",
    };
    let block = Block::default()
        .title(" Document ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(title).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[0]);

    let tabs = Tabs::new(vec!["Summary", "Flashcards", "Quiz"])
        .select(app.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[1]);

    match &app.detail {
        DetailState::Loading => {
            frame.render_widget(
                Paragraph::new("Fetching document…")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                chunks[2],
            );
        }
        DetailState::Missing => {
            let message = "This document could not be loaded.\n\n\
                           It may have been removed, or the backend may be unreachable.\n\
                           Press Esc to return to the dashboard.";
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                chunks[2],
            );
        }
        DetailState::Ready(_) => match app.tab {
            StudyTab::Summary => render_summary_tab(frame, app, chunks[2]),
            StudyTab::Flashcards => render_flashcards_tab(frame, app, chunks[2]),
            StudyTab::Quiz => render_quiz_tab(frame, app, chunks[2]),
        },
    }

    let status = match app.tab {
        _ if !matches!(app.detail, DetailState::Ready(_)) => "Esc:back  q:quit",
        StudyTab::Summary => "Tab:next tab  Esc:back  r:refresh  ?:help",
        StudyTab::Flashcards => {
            if app.study.is_active() {
                "Space:flip  n/p:next/prev  1:Hard 2:Medium 3:Easy  e:end session"
            } else {
                "Enter:start session  Tab:next tab  Esc:back"
            }
        }
        StudyTab::Quiz => "j/k:question  1-9:answer  Enter:submit  Esc:back",
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn render_summary_tab(frame: &mut Frame, app: &App, area: Rect) {
    let DetailState::Ready(detail) = &app.detail else {
        return;
    };

    let content = detail
        .summary
        .as_ref()
        .map(|s| s.content.clone())
        .unwrap_or_else(|| {
            "Summary not generated yet.\n\nPress 'r' to refresh once processing finishes."
                .to_string()
        });

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Summary ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_flashcards_tab(frame: &mut Frame, app: &App, area: Rect) {
    let DetailState::Ready(detail) = &app.detail else {
        return;
    };

    let block = Block::default()
        .title(" Flashcards ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if detail.flashcards.is_empty() {
        frame.render_widget(
            Paragraph::new("No flashcards yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    match app.study.phase() {
        StudyPhase::NotStarted => {
            let text = if app.session_pending {
                "Starting session…".to_string()
            } else {
                format!(
                    "{} cards in this deck.\n\nPress Enter to start a study session.",
                    detail.flashcards.len()
                )
            };
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }

        StudyPhase::Ended => {
            frame.render_widget(
                Paragraph::new("Session complete.\n\nPress Enter to study again.")
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }

        StudyPhase::Active { index, show_answer } => {
            let card = &detail.flashcards[index];
            let width = inner.width.saturating_sub(4).max(20) as usize;

            let mut lines: Vec<Line> = Vec::new();
            let elapsed = app
                .study
                .elapsed()
                .map(|d| format!("{:02}:{:02}", d.as_secs() / 60, d.as_secs() % 60))
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("Card {}/{}  {elapsed}", index + 1, detail.flashcards.len()),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::default());

            for wrapped in textwrap::wrap(&card.question, width) {
                lines.push(Line::from(Span::styled(
                    wrapped.into_owned(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )));
            }
            lines.push(Line::default());

            if show_answer {
                for wrapped in textwrap::wrap(&card.answer, width) {
                    lines.push(Line::from(Span::styled(
                        wrapped.into_owned(),
                        Style::default().fg(Color::Green),
                    )));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "How did you do?  1:Hard  2:Medium  3:Easy",
                    Style::default().fg(Color::Yellow),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Press Space to reveal the answer",
                    Style::default().fg(Color::DarkGray),
                )));
            }

            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
    }
}

fn render_quiz_tab(frame: &mut Frame, app: &App, area: Rect) {
    let DetailState::Ready(detail) = &app.detail else {
        return;
    };

    let Some(quiz) = &detail.quiz else {
        frame.render_widget(
            Paragraph::new("No quiz yet.")
                .block(Block::default().title(" Quiz ").borders(Borders::ALL))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            area,
        );
        return;
    };

    let mut title = format!(" {} ", quiz.title);
    if let Some(result) = app.quiz_result {
        title = format!(
            " {} — Score: {}% ({}/{}) ",
            quiz.title, result.percent, result.correct, result.total
        );
    }

    let items: Vec<ListItem> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selected = app.sheet.selection(&question.id);
            let mut lines = vec![Line::from(Span::styled(
                format!("{}. {}", i + 1, question.question),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))];
            for (j, option) in question.options.iter().enumerate() {
                let marker = if selected == Some(option.as_str()) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if selected == Some(option.as_str()) {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(Span::styled(
                    format!("   {marker} {}. {option}", j + 1),
                    style,
                )));
            }
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.quiz_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

// Analytics

fn draw_analytics(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Overall counters
            Constraint::Length(10), // Daily study time
            Constraint::Min(0),     // Accuracy + quiz scores
            Constraint::Length(1),  // Status line
        ])
        .split(frame.area());

    render_snapshot(frame, &app.analytics.overall_analytics, chunks[0], " Overall ");
    render_study_time_chart(frame, app, chunks[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[2]);
    render_accuracy_rows(frame, app, bottom[0]);
    render_quiz_scores(frame, app, bottom[1]);

    let status = "r:refresh  Esc:back  q:quit";
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn render_study_time_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = &app.analytics.study_sessions_chart_data;
    let block = Block::default()
        .title(" Study time, last 7 days (minutes) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if series.is_empty() {
        let paragraph = Paragraph::new("No data available")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    // "2026-06-06" -> "06-06" for the bar labels.
    let labels: Vec<(String, u64)> = series
        .iter()
        .map(|day| {
            let label = day.date.get(5..).unwrap_or(&day.date).to_string();
            (label, day.duration)
        })
        .collect();
    let data: Vec<(&str, u64)> = labels.iter().map(|(label, v)| (label.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

fn render_accuracy_rows(frame: &mut Frame, app: &App, area: Rect) {
    let series = &app.analytics.flashcard_performance_chart_data;
    let block = Block::default()
        .title(" Flashcard accuracy by document ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    if series.is_empty() {
        let paragraph = Paragraph::new("No data available")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = inner_width.saturating_sub(28).max(10);

    let lines: Vec<Line> = series
        .iter()
        .map(|row| {
            let pct = display_pct(row.accuracy).clamp(0, 100) as usize;
            let filled = bar_width * pct / 100;
            let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
            Line::from(vec![
                Span::styled(
                    format!("{:<20.20} ", row.document_title),
                    Style::default().fg(Color::White),
                ),
                Span::styled(bar, Style::default().fg(Color::Green)),
                Span::styled(
                    format!(" {pct:>3}% ({})", row.attempts),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quiz_scores(frame: &mut Frame, app: &App, area: Rect) {
    let series = &app.analytics.quiz_performance_chart_data;
    let block = Block::default()
        .title(" Recent quiz scores ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    if series.is_empty() {
        let paragraph = Paragraph::new("No data available")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = series
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", row.date),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(
                    format!("{:<24.24}", row.quiz_title),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>4}%", display_pct(row.score)),
                    Style::default().fg(Color::Magenta),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// Help overlay

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());

    let help_text = vec![
        "",
        " Dashboard:",
        "   j / k     Move selection",
        "   Enter     Open document",
        "   u         Upload a PDF",
        "   a         Analytics",
        "   r         Refresh",
        "",
        " Document:",
        "   Tab       Next tab",
        "   Enter     Start study session / submit quiz",
        "   Space     Reveal flashcard answer",
        "   n / p     Next / previous card",
        "   1 2 3     Rate card Hard / Medium / Easy",
        "   e         End study session",
        "   1-9       Choose quiz answer",
        "   Esc       Back to dashboard",
        "",
        " General:",
        "   ?         Toggle this help",
        "   q         Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
