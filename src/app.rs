use ratatui::widgets::ListState;

use crate::chat::ChatWidget;
use crate::contact::ContactForm;
use crate::gemini::{self, GeminiClient};
use crate::profile::Profile;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Skills,
    Experience,
    Education,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::About,
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Contact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Navigation,
    Content,
}

pub struct App {
    pub should_quit: bool,
    pub focus: FocusPane,

    // Section navigation
    pub section_state: ListState,
    pub content_scroll: u16,
    pub content_height: u16,
    pub total_content_lines: u16,

    // Assistant widget
    pub chat: ChatWidget,
    pub assistant_task: Option<tokio::task::JoinHandle<String>>,
    pub chat_scroll: u16,
    pub chat_height: u16, // inner chat area, for scroll calculations
    pub chat_width: u16,  // inner chat area, for wrap calculations
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Contact form overlay
    pub contact: ContactForm,

    // Data
    pub profile: Profile,
    pub theme: Theme,
    pub gemini: GeminiClient,
}

impl App {
    pub fn new(profile: Profile, theme: Theme, gemini: GeminiClient) -> Self {
        let mut section_state = ListState::default();
        section_state.select(Some(0));

        Self {
            should_quit: false,
            focus: FocusPane::Navigation,

            section_state,
            content_scroll: 0,
            content_height: 0,
            total_content_lines: 0,

            chat: ChatWidget::new(),
            assistant_task: None,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,

            contact: ContactForm::new(),

            profile,
            theme,
            gemini,
        }
    }

    pub fn selected_section(&self) -> Section {
        self.section_state
            .selected()
            .and_then(|i| Section::ALL.get(i).copied())
            .unwrap_or(Section::About)
    }

    // Section navigation
    pub fn nav_down(&mut self) {
        let i = self.section_state.selected().unwrap_or(0);
        self.section_state
            .select(Some((i + 1).min(Section::ALL.len() - 1)));
        self.content_scroll = 0;
    }

    pub fn nav_up(&mut self) {
        let i = self.section_state.selected().unwrap_or(0);
        self.section_state.select(Some(i.saturating_sub(1)));
        self.content_scroll = 0;
    }

    pub fn nav_first(&mut self) {
        self.section_state.select(Some(0));
        self.content_scroll = 0;
    }

    pub fn nav_last(&mut self) {
        self.section_state.select(Some(Section::ALL.len() - 1));
        self.content_scroll = 0;
    }

    // Content scrolling
    pub fn scroll_down(&mut self) {
        if self.content_scroll < self.total_content_lines.saturating_sub(self.content_height) {
            self.content_scroll = self.content_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half_page = self.content_height / 2;
        let max_scroll = self.total_content_lines.saturating_sub(self.content_height);
        self.content_scroll = (self.content_scroll + half_page).min(max_scroll);
    }

    pub fn scroll_half_page_up(&mut self) {
        let half_page = self.content_height / 2;
        self.content_scroll = self.content_scroll.saturating_sub(half_page);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.chat.pending {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Run the Input Controller. If the submission is accepted, spawn
    /// the dispatch task. The gate in `ChatWidget::submit` guarantees
    /// at most one task is ever in flight.
    pub fn submit_chat(&mut self) {
        if let Some(outgoing) = self.chat.submit() {
            let client = self.gemini.clone();
            self.assistant_task = Some(tokio::spawn(async move {
                client.send_message(&outgoing.message, &outgoing.history).await
            }));
            self.scroll_chat_to_bottom();
        }
    }

    /// Called on every loop pass. Joins the dispatch task once it has
    /// finished and appends its reply; the task itself never errors,
    /// so a join failure (panic/abort) maps to the same apology the
    /// dispatch boundary produces.
    pub async fn poll_assistant(&mut self) {
        if self
            .assistant_task
            .as_ref()
            .is_some_and(|task| task.is_finished())
        {
            if let Some(task) = self.assistant_task.take() {
                let reply = task.await.unwrap_or_else(|err| {
                    tracing::error!("assistant task did not complete: {err}");
                    gemini::UNAVAILABLE_REPLY.to_string()
                });
                self.chat.resolve(reply);
                self.scroll_chat_to_bottom();
            }
        }
    }

    /// Scroll the chat transcript so the newest entry (or the typing
    /// indicator) is visible, accounting for line wrapping.
    pub fn scroll_chat_to_bottom(&mut self) {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            40
        };

        let mut total_lines: u16 = 0;

        for msg in self.chat.conversation.messages() {
            total_lines += 1; // role line
            for line in msg.text.lines() {
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // blank line after message
        }

        if self.chat.pending {
            total_lines += 2; // role line + typing indicator
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            12
        };

        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let profile = Profile::builtin().unwrap();
        // Nothing listens here; dispatches resolve to the apology.
        let gemini =
            GeminiClient::with_base_url("http://127.0.0.1:1", "", &profile.system_instruction());
        App::new(profile, Theme::default(), gemini)
    }

    #[test]
    fn section_navigation_clamps_at_ends() {
        let mut app = test_app();
        assert_eq!(app.selected_section(), Section::About);

        app.nav_up();
        assert_eq!(app.selected_section(), Section::About);

        for _ in 0..10 {
            app.nav_down();
        }
        assert_eq!(app.selected_section(), Section::Contact);

        app.nav_first();
        assert_eq!(app.selected_section(), Section::About);
        app.nav_last();
        assert_eq!(app.selected_section(), Section::Contact);
    }

    #[test]
    fn changing_section_resets_scroll() {
        let mut app = test_app();
        app.total_content_lines = 100;
        app.content_height = 10;
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.content_scroll, 2);
        app.nav_down();
        assert_eq!(app.content_scroll, 0);
    }

    #[tokio::test]
    async fn submit_spawns_one_task_and_refuses_while_pending() {
        let mut app = test_app();
        app.chat.input = "What are your skills?".to_string();
        app.submit_chat();
        assert!(app.chat.pending);
        assert!(app.assistant_task.is_some());

        // A second submission while pending changes nothing.
        app.chat.input = "Hello again".to_string();
        let len_before = app.chat.conversation.len();
        app.submit_chat();
        assert_eq!(app.chat.conversation.len(), len_before);
        assert!(app.assistant_task.is_some());
    }

    #[tokio::test]
    async fn failed_dispatch_resolves_to_apology_and_resets_pending() {
        let mut app = test_app();
        app.chat.input = "Hello?".to_string();
        app.submit_chat();

        // The connection to 127.0.0.1:1 fails almost immediately;
        // poll until the task has been joined.
        for _ in 0..200 {
            app.poll_assistant().await;
            if !app.chat.pending {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert!(!app.chat.pending);
        assert!(app.assistant_task.is_none());
        let last = app.chat.conversation.messages().last().unwrap();
        assert_eq!(last.role, crate::chat::Role::Model);
        assert_eq!(last.text, gemini::UNAVAILABLE_REPLY);
        // Greeting + user turn + apology.
        assert_eq!(app.chat.conversation.len(), 3);
    }

    #[test]
    fn animation_only_advances_while_pending() {
        let mut app = test_app();
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);
        app.chat.pending = true;
        app.tick_animation();
        assert_eq!(app.animation_frame, 1);
    }
}
