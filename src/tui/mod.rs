// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, format_file_size, format_taken_at};
pub use input::{handle_confirm_input, handle_key_event, KeyAction};

use crate::async_preview::PreviewState;
use crate::deletion::{DeletionMode, DeletionRequester};
use crate::domain::{
    Clock, Gesture, PhotoRecord, TriageEngine, TriageState, TriageStatistics, TriageSummary,
};
use crate::error::TriageError;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main photo view (or the loading, summary and error screens)
    Browsing,
    /// Help overlay visible
    Help,
    /// Confirmation dialog for delete action
    ConfirmDelete,
    /// Welcome screen shown on first launch
    Welcome,
}

/// Everything the renderer needs from one frame of engine state
#[derive(Debug, Clone)]
pub struct TriageView<'a> {
    pub state: &'a TriageState,
    pub current: Option<&'a PhotoRecord>,
    pub statistics: TriageStatistics,
    pub summary: Option<TriageSummary>,
    pub gesture: Gesture,
    pub can_undo: bool,
    /// Out-of-band message, e.g. a failed deletion
    pub notice: Option<&'a str>,
    pub mode: DeletionMode,
}

impl<'a> TriageView<'a> {
    pub fn from_engine<R: DeletionRequester, C: Clock>(engine: &'a TriageEngine<R, C>) -> Self {
        Self {
            state: engine.state(),
            current: engine.current_item(),
            statistics: engine.statistics(),
            summary: engine.summary(),
            gesture: engine.last_gesture(),
            can_undo: engine.pending_undo().is_some(),
            notice: None,
            mode: DeletionMode::default(),
        }
    }

    pub fn with_notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_mode(mut self, mode: DeletionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Renders the whole screen for the engine's current state.
///
/// `preview` is the decode state of `view.current`, if any.
pub fn render_app(frame: &mut Frame, view: &TriageView, preview: Option<&PreviewState>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header with progress
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view);

    match view.state {
        TriageState::Empty | TriageState::Loading => render_loading_screen(frame, chunks[1]),
        TriageState::Active => match view.current {
            Some(photo) => render_photo(frame, chunks[1], photo, view.gesture, preview),
            None => render_loading_screen(frame, chunks[1]),
        },
        TriageState::Complete => {
            frame.render_widget(plain_block(" Done "), chunks[1]);
        }
        TriageState::Error(error) => render_error_screen(frame, chunks[1], error),
    }

    render_footer(frame, chunks[2], view);

    if let (TriageState::Complete, Some(summary)) = (view.state, view.summary) {
        render_summary(frame, &summary, &view.statistics, view.mode, view.can_undo);
    }
}

fn plain_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Helper to create a centered rect
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

/// Header: position in the batch, photo info and a progress gauge
fn render_header(frame: &mut Frame, area: Rect, view: &TriageView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .split(area);

    let stats = &view.statistics;
    let (title_text, info) = match view.current {
        Some(photo) => {
            let mut details = vec![format_file_size(photo.size), format_taken_at(&photo.taken_at)];
            if let Some(dimensions) = photo.dimensions_label() {
                details.push(dimensions);
            }
            (
                format!(" Photo {}/{} ", stats.cursor + 1, stats.total),
                vec![
                    Span::styled(
                        photo.name.clone(),
                        Style::default()
                            .fg(TEXT_PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("({})", details.join(" • ")),
                        Style::default().fg(TEXT_SECONDARY),
                    ),
                ],
            )
        }
        None => (
            " Pswp ".to_string(),
            vec![Span::styled(
                header_status(view.state),
                Style::default().fg(TEXT_SECONDARY),
            )],
        ),
    };

    let mut title_spans = vec![Span::styled(
        title_text,
        Style::default()
            .fg(ACCENT_HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    )];
    if view.mode == DeletionMode::DryRun {
        title_spans.push(Span::styled(
            " [DRY RUN] ",
            Style::default().fg(ACCENT_PRIMARY),
        ));
    }

    let header = Paragraph::new(vec![Line::from(title_spans), Line::from(info)])
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, chunks[0]);

    let progress = calculate_progress(stats.cursor, stats.total);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!("{} / {}", stats.cursor, stats.total));

    frame.render_widget(gauge, chunks[1]);
}

fn header_status(state: &TriageState) -> &'static str {
    match state {
        TriageState::Empty | TriageState::Loading => "Loading photos...",
        TriageState::Active => "",
        TriageState::Complete => "All photos reviewed",
        TriageState::Error(_) => "Something went wrong",
    }
}

/// The current photo, with the gesture badge on top while it is visible
fn render_photo(
    frame: &mut Frame,
    area: Rect,
    photo: &PhotoRecord,
    gesture: Gesture,
    preview: Option<&PreviewState>,
) {
    let border_color = match gesture {
        Gesture::None => BORDER_COLOR,
        Gesture::Skip => ACCENT_SECONDARY,
        Gesture::Delete => ACCENT_PRIMARY,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", photo.name));

    let paragraph = match preview {
        Some(PreviewState::Ready(preview)) => {
            Paragraph::new(preview.lines.clone()).alignment(Alignment::Center)
        }
        Some(PreviewState::Error(e)) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  [!] Cannot display this photo",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("  {}", e)),
            Line::from(""),
            Line::from(format!("  Path: {}", photo.path.display())),
            Line::from(Span::styled(
                "  Press o to open it in your viewer",
                Style::default().fg(TEXT_SECONDARY),
            )),
        ])
        .wrap(Wrap { trim: false }),
        Some(PreviewState::Loading) | None => Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame()),
                    Style::default().fg(ACCENT_HIGHLIGHT),
                ),
                Span::styled("Decoding photo", Style::default().fg(TEXT_PRIMARY)),
            ]),
        ])
        .alignment(Alignment::Center),
    };

    frame.render_widget(
        paragraph.block(block).style(Style::default().fg(TEXT_PRIMARY)),
        area,
    );

    render_gesture_badge(frame, area, gesture);
}

fn render_gesture_badge(frame: &mut Frame, area: Rect, gesture: Gesture) {
    let (label, color) = match gesture {
        Gesture::None => return,
        Gesture::Skip => (" ✓ KEEP ", ACCENT_SECONDARY),
        Gesture::Delete => (" ✗ DELETE ", ACCENT_PRIMARY),
    };

    let width = (label.chars().count() as u16 + 2).min(area.width);
    let height = 3.min(area.height);
    let badge_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, badge_area);
    let badge = Paragraph::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(BG_DARK)),
    );
    frame.render_widget(badge, badge_area);
}

fn spinner_frame() -> &'static str {
    let spinners = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    spinners[(now / 100) as usize % spinners.len()]
}

fn render_loading_screen(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame()),
                Style::default().fg(ACCENT_HIGHLIGHT),
            ),
            Span::styled(
                "Loading photos",
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Picking a fresh batch from your library",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(plain_block(" Loading "))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Error screen with a hint and the retry key
pub fn render_error_screen(frame: &mut Frame, area: Rect, error: &TriageError) {
    let hint = match error {
        TriageError::NoItems => {
            "There are no photos in this directory. Try --recursive or another folder."
        }
        TriageError::PermissionDenied(_) => "Grant read access to the photo library and retry.",
        _ => "Check that the library is reachable and retry.",
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(TEXT_SECONDARY))),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("r ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("Retry    "),
            Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_PRIMARY))
                .title(" Error "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Renders the result screen at the end of a session
pub fn render_summary(
    frame: &mut Frame,
    summary: &TriageSummary,
    stats: &TriageStatistics,
    mode: DeletionMode,
    can_undo: bool,
) {
    let area = frame.area();

    // Center the summary box
    let summary_area = centered_rect(60, 60, area);

    // Clear the background
    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let in_flight = (summary.deleted_count + stats.reverted)
        .saturating_sub(stats.confirmed_deletions + stats.failed_deletions);
    let freed_label = if mode == DeletionMode::DryRun {
        "Would free:  "
    } else {
        "Freed:       "
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("   Reviewed:  "),
            Span::styled(
                format!("{}", summary.total_processed),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Kept:     "),
            Span::styled(
                format!("{}", summary.kept_count),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Deleted:  "),
            Span::styled(
                format!("{}", summary.deleted_count),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if stats.reverted > 0 {
        lines.push(Line::from(vec![
            Span::styled("   ↺ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Undone:   "),
            Span::styled(
                format!("{}", stats.reverted),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(freed_label),
        Span::styled(
            format_file_size(stats.bytes_freed),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    if in_flight > 0 {
        lines.push(Line::from(Span::styled(
            format!("Deleting {} more...", in_flight),
            Style::default().fg(TEXT_SECONDARY),
        )));
    }
    if stats.failed_deletions > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} deletion(s) failed, see the log", stats.failed_deletions),
            Style::default().fg(ACCENT_PRIMARY),
        )));
    }

    let mut controls = vec![
        Span::styled("r ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::raw("Again   "),
    ];
    if can_undo {
        controls.extend([
            Span::styled("u ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("Undo   "),
        ]);
    }
    controls.extend([
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("Done"),
    ]);
    lines.push(Line::from(""));
    lines.push(Line::from(controls));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Footer with controls, replaced by the notice when there is one
fn render_footer(frame: &mut Frame, area: Rect, view: &TriageView) {
    let separator = || Span::raw("  │  ");
    let key = |k: &'static str, color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let label = |l: &'static str| Span::styled(l, Style::default().fg(TEXT_SECONDARY));

    let controls = match (view.notice, view.state) {
        (Some(notice), _) => Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(ACCENT_PRIMARY),
        )),
        (None, TriageState::Active) => {
            let mut spans = vec![
                key(" ← ", ACCENT_SECONDARY),
                label("Keep"),
                separator(),
                key("→ ", ACCENT_PRIMARY),
                label("Delete"),
            ];
            if view.can_undo {
                spans.extend([separator(), key("u ", ACCENT_HIGHLIGHT), label("Undo")]);
            }
            spans.extend([
                separator(),
                key("o ", TEXT_SECONDARY),
                label("Open"),
                separator(),
                key("? ", TEXT_SECONDARY),
                label("Help"),
                separator(),
                key("q ", TEXT_SECONDARY),
                label("Quit"),
            ]);
            Line::from(spans)
        }
        (None, TriageState::Complete) | (None, TriageState::Error(_)) => Line::from(vec![
            key("r ", ACCENT_HIGHLIGHT),
            label("Restart"),
            separator(),
            key("q ", TEXT_SECONDARY),
            label("Quit"),
        ]),
        (None, _) => Line::from(vec![key("q ", TEXT_SECONDARY), label("Quit")]),
    };

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(60, 70, area);

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |keys: &'static str, color, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), Style::default().fg(color)),
            Span::raw(text),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("← / k", ACCENT_SECONDARY, "Keep photo"),
        entry("→ / d", ACCENT_PRIMARY, "Delete photo"),
        Line::from(""),
        entry("u / Ctrl+Z", ACCENT_HIGHLIGHT, "Undo last delete (count only)"),
        entry("o", TEXT_SECONDARY, "Open in system viewer"),
        entry("r", TEXT_SECONDARY, "New batch / retry"),
        Line::from(""),
        entry("q / Esc", TEXT_SECONDARY, "Quit"),
        entry("?", TEXT_SECONDARY, "Toggle help"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Left)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame, batch_size: usize) {
    let area = centered_rect(80, 80, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let bullet = |text: String| {
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(text),
        ])
    };

    let welcome_lines = vec![
        Line::from(""),
        heading("Welcome to pswp!"),
        Line::from(""),
        Line::from(format!(
            "Each session shows {} photos picked at random from your library.",
            batch_size
        )),
        Line::from("Decide on each one and see how much space you freed at the end."),
        Line::from(""),
        heading("How it works:"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ← / k  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("  Keep the photo and move on"),
        ]),
        Line::from(vec![
            Span::styled("  → / d  ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("  Delete the photo"),
        ]),
        Line::from(vec![
            Span::styled("  u      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  Undo the last delete"),
        ]),
        Line::from(vec![
            Span::styled("  ?      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  Show help (access this anytime)"),
        ]),
        Line::from(""),
        heading("Good to know:"),
        Line::from(""),
        bullet("Photos are moved to your system trash unless you pass --permanent".to_string()),
        bullet("Undo fixes the count only; the photo stays deleted".to_string()),
        bullet("Run with --dry-run to try it without deleting anything".to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start...",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let welcome_text = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(" Welcome ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome_text, area);
}

/// Renders the confirmation dialog for delete action
pub fn render_confirm_delete_overlay(frame: &mut Frame, photo: &PhotoRecord, mode: DeletionMode) {
    let area = frame.area();
    let confirm_area = centered_rect(50, 60, area);

    // Clear background
    frame.render_widget(Clear, confirm_area);

    let block = Block::default()
        .title(" ⚠ Delete Photo ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_PRIMARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(confirm_area);
    frame.render_widget(block, confirm_area);

    let consequence = match mode {
        DeletionMode::Trash => "It will be moved to the trash.",
        DeletionMode::Permanent => "It will be removed from disk.",
        DeletionMode::DryRun => "Dry run: nothing will be deleted.",
    };

    let confirm_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Delete this photo?",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Photo: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(photo.name.clone(), Style::default().fg(TEXT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("  Size:  ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(format_file_size(photo.size), Style::default().fg(TEXT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("  Taken: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(
                format_taken_at(&photo.taken_at),
                Style::default().fg(TEXT_PRIMARY),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(consequence, Style::default().fg(TEXT_SECONDARY))),
        Line::from(Span::styled(
            "This cannot be undone from here.",
            Style::default().fg(ACCENT_PRIMARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("es  "),
            Span::styled("[Enter]", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("     "),
            Span::styled("[N]", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("o  "),
            Span::styled("[Esc]", Style::default().fg(ACCENT_SECONDARY)),
        ]),
    ];

    let paragraph = Paragraph::new(confirm_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}
