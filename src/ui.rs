use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};

use crate::app::{App, FocusPane, Section};
use crate::chat::Role;
use crate::contact::ContactField;
use crate::profile::Profile;
use crate::theme::Theme;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [nav_area, content_area] =
        Layout::horizontal([Constraint::Length(20), Constraint::Min(0)]).areas(body_area);

    render_navigation(app, frame, nav_area);
    render_content(app, frame, content_area);

    render_footer(app, frame, footer_area);

    // Overlays; the contact form sits above the assistant widget.
    if app.chat.open {
        render_chat_widget(app, frame, body_area);
    }
    if app.contact.open {
        render_contact_form(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", app.profile.name),
            Style::default().fg(theme.bar_fg).bold(),
        ),
        Span::styled(
            format!("— {} ", app.profile.title),
            Style::default().fg(theme.bar_fg),
        ),
        Span::styled(
            format!("· {} ", app.profile.location),
            Style::default().fg(theme.bar_fg).dim(),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.bar_fg).dim(),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(theme.bar_bg));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let key_style = Style::default().bg(theme.bar_bg).fg(theme.bar_fg);
    let label_style = Style::default();

    let hints: Vec<Span> = if app.contact.open {
        vec![
            Span::styled(" Tab ", key_style),
            Span::styled(" field ", label_style),
            Span::styled(" Ctrl-S ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" close ", label_style),
        ]
    } else if app.chat.open {
        vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Up/Down ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" close ", label_style),
        ]
    } else {
        vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" nav ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" focus ", label_style),
            Span::styled(" a ", key_style),
            Span::styled(" assistant ", label_style),
            Span::styled(" m ", key_style),
            Span::styled(" contact ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]
    };

    let footer = Paragraph::new(Line::from(hints));
    frame.render_widget(footer, area);
}

fn render_navigation(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == FocusPane::Navigation && !app.chat.open && !app.contact.open;
    let border_color = if focused { theme.accent } else { theme.border };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Sections ");

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| ListItem::new(format!(" {} ", section.title())))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.section_state);
}

fn render_content(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == FocusPane::Content && !app.chat.open && !app.contact.open;
    let border_color = if focused { theme.accent } else { theme.border };

    let section = app.selected_section();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", section.title()));

    let inner_area = block.inner(area);
    app.content_height = inner_area.height;

    let lines = section_lines(&app.profile, &theme, section);
    app.total_content_lines = lines.len() as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);

    if app.total_content_lines > app.content_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state = ScrollbarState::new(app.total_content_lines as usize)
            .position(app.content_scroll as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn section_lines(profile: &Profile, theme: &Theme, section: Section) -> Vec<Line<'static>> {
    match section {
        Section::About => about_lines(profile, theme),
        Section::Skills => skills_lines(profile, theme),
        Section::Experience => experience_lines(profile, theme),
        Section::Education => education_lines(profile, theme),
        Section::Projects => projects_lines(profile, theme),
        Section::Contact => contact_lines(profile, theme),
    }
}

fn heading(text: impl Into<String>, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(theme.heading).bold(),
    ))
}

fn dim(text: impl Into<String>, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(theme.dim)))
}

fn about_lines(profile: &Profile, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(profile.name.clone(), theme),
        dim(profile.title.clone(), theme),
        Line::default(),
        Line::from(profile.summary.clone()),
        Line::default(),
    ];

    for social in &profile.socials {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", social.platform),
                Style::default().fg(theme.accent),
            ),
            Span::raw(social.url.clone()),
        ]));
    }

    if let Some(link) = &profile.resume_download_link {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Resume PDF: ", Style::default().fg(theme.accent)),
            Span::raw(link.clone()),
        ]));
    }

    lines
}

fn skills_lines(profile: &Profile, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for category in &profile.skills {
        lines.push(heading(category.category.clone(), theme));
        lines.push(Line::from(format!("  {}", category.items.join(" · "))));
        lines.push(Line::default());
    }
    lines
}

fn experience_lines(profile: &Profile, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for job in &profile.experience {
        lines.push(Line::from(vec![
            Span::styled(job.role.clone(), Style::default().fg(theme.heading).bold()),
            Span::styled(
                format!("  {} — {}", job.start_date, job.end_date),
                Style::default().fg(theme.dim),
            ),
        ]));
        lines.push(dim(job.company.clone(), theme));
        lines.push(Line::default());
        lines.push(Line::from(job.description.clone()));
        if let Some(highlights) = &job.highlights {
            for highlight in highlights {
                lines.push(Line::from(format!("  • {highlight}")));
            }
        }
        lines.push(dim(job.technologies.join(" · "), theme));
        lines.push(Line::default());
    }
    lines
}

fn education_lines(profile: &Profile, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in &profile.education {
        lines.push(heading(entry.degree.clone(), theme));
        lines.push(Line::from(format!("{} · {}", entry.institution, entry.year)));
        lines.push(Line::default());
    }
    lines
}

fn projects_lines(profile: &Profile, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for project in &profile.projects {
        lines.push(heading(project.title.clone(), theme));
        lines.push(Line::from(project.description.clone()));
        lines.push(dim(project.tech_stack.join(" · "), theme));
        if let Some(link) = &project.link {
            lines.push(Line::from(vec![
                Span::styled("Link: ", Style::default().fg(theme.accent)),
                Span::raw(link.clone()),
            ]));
        }
        lines.push(Line::default());
    }
    lines
}

fn contact_lines(profile: &Profile, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Email: ", Style::default().fg(theme.accent)),
            Span::raw(profile.email.clone()),
        ]),
    ];
    if let Some(phone) = &profile.phone {
        lines.push(Line::from(vec![
            Span::styled("Phone: ", Style::default().fg(theme.accent)),
            Span::raw(phone.clone()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Location: ", Style::default().fg(theme.accent)),
        Span::raw(profile.location.clone()),
    ]));
    lines.push(Line::default());
    lines.push(dim("Press 'm' to compose a message.", theme));
    lines
}

/// Floating assistant widget, anchored bottom-right like the original
/// page overlay.
fn render_chat_widget(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let popup_width = 52.min(area.width.saturating_sub(4));
    let popup_height = 20.min(area.height.saturating_sub(2));
    let popup_x = area.x + area.width.saturating_sub(popup_width + 2);
    let popup_y = area.y + area.height.saturating_sub(popup_height);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(popup_area);

    let transcript_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Resume Assistant ");

    // Inner dimensions feed the scroll-to-bottom wrap math.
    let inner = transcript_block.inner(transcript_area);
    app.chat_height = inner.height;
    app.chat_width = inner.width;

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.chat.conversation.messages() {
        match msg.role {
            Role::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(theme.user).add_modifier(Modifier::BOLD),
                )));
            }
            Role::Model => {
                lines.push(Line::from(Span::styled(
                    "Assistant:",
                    Style::default()
                        .fg(theme.assistant)
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }
        for line in msg.text.lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::default());
    }

    if app.chat.pending {
        lines.push(Line::from(Span::styled(
            "Assistant:",
            Style::default()
                .fg(theme.assistant)
                .add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{dots}"),
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )));
    }

    let transcript = Paragraph::new(lines)
        .block(transcript_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(transcript, transcript_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.chat.pending {
            theme.border
        } else {
            theme.accent
        }))
        .title(" Ask me anything ");

    // Horizontal scroll keeps the cursor visible in a narrow field.
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let cursor_pos = app.chat.cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };
    let visible_text: String = app
        .chat
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(theme.user))
        .block(input_block);
    frame.render_widget(input, input_area);

    frame.set_cursor_position((
        input_area.x + (cursor_pos - scroll_offset) as u16 + 1,
        input_area.y + 1,
    ));
}

fn render_contact_form(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 16.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(format!(" Contact {} ", app.profile.name));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [name_area, subject_area, message_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_form_field(
        frame,
        name_area,
        " Your name ",
        &app.contact.name,
        app.contact.field == ContactField::Name,
        &theme,
    );
    render_form_field(
        frame,
        subject_area,
        " Subject ",
        &app.contact.subject,
        app.contact.field == ContactField::Subject,
        &theme,
    );
    render_form_field(
        frame,
        message_area,
        " Message ",
        &app.contact.message,
        app.contact.field == ContactField::Message,
        &theme,
    );

    let hint = Paragraph::new("Opens your mail client; nothing is sent from here.")
        .style(Style::default().fg(theme.dim));
    frame.render_widget(hint, hint_area);
}

fn render_form_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    active: bool,
    theme: &Theme,
) {
    let border_color = if active { theme.accent } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title.to_string());

    let field = Paragraph::new(value.to_string())
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(field, area);

    if active {
        // Cursor after the last character of the last line.
        let last_line_len = value.lines().last().map(|l| l.chars().count()).unwrap_or(0);
        let line_count = value.lines().count().max(1) as u16;
        let ends_with_newline = value.ends_with('\n');
        let (cursor_x, cursor_y) = if ends_with_newline {
            (0, line_count)
        } else {
            (last_line_len as u16, line_count.saturating_sub(1))
        };
        frame.set_cursor_position((
            area.x + 1 + cursor_x.min(area.width.saturating_sub(3)),
            area.y + 1 + cursor_y.min(area.height.saturating_sub(3)),
        ));
    }
}
