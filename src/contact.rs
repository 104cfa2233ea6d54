/// Contact form state and mailto composition. No network call: the
/// composed URI is handed to the platform opener and the visitor's
/// mail client takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Subject,
    Message,
}

#[derive(Debug)]
pub struct ContactForm {
    pub open: bool,
    pub name: String,
    pub subject: String,
    pub message: String,
    pub field: ContactField,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            open: false,
            name: String::new(),
            subject: String::new(),
            message: String::new(),
            field: ContactField::Name,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.field = ContactField::Name;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            ContactField::Name => ContactField::Subject,
            ContactField::Subject => ContactField::Message,
            ContactField::Message => ContactField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            ContactField::Name => ContactField::Message,
            ContactField::Subject => ContactField::Name,
            ContactField::Message => ContactField::Subject,
        };
    }

    pub fn active_text_mut(&mut self) -> &mut String {
        match self.field {
            ContactField::Name => &mut self.name,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Name and message are required; subject is optional and gets a
    /// default line. Returns the mailto URI when the form is complete.
    pub fn submit(&mut self, email: &str, owner_first_name: &str) -> Option<String> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return None;
        }
        Some(mailto_uri(
            email,
            owner_first_name,
            &self.name,
            &self.subject,
            &self.message,
        ))
    }
}

pub fn mailto_uri(
    email: &str,
    owner_first_name: &str,
    visitor_name: &str,
    subject: &str,
    message: &str,
) -> String {
    let subject_line = if subject.trim().is_empty() {
        format!("Portfolio Contact from {visitor_name}")
    } else {
        subject.to_string()
    };
    let body = format!(
        "Hi {owner_first_name},\n\n{message}\n\nBest regards,\n{visitor_name}"
    );
    format!(
        "mailto:{}?subject={}&body={}",
        email,
        urlencoding::encode(&subject_line),
        urlencoding::encode(&body),
    )
}

/// Hand the URI to the platform's default handler. Best effort; a
/// missing opener is logged and otherwise ignored.
pub fn open_mail_client(uri: &str) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";

    if let Err(err) = std::process::Command::new(opener)
        .arg(uri)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
    {
        tracing::warn!("could not launch mail client via {opener}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_percent_encodes_subject_and_body() {
        let uri = mailto_uri(
            "alex@example.com",
            "Alex",
            "Sam Lee",
            "Job opening & next steps",
            "Loved your work!",
        );
        assert!(uri.starts_with("mailto:alex@example.com?subject="));
        assert!(uri.contains("Job%20opening%20%26%20next%20steps"));
        assert!(uri.contains("Hi%20Alex%2C%0A%0ALoved%20your%20work%21"));
        assert!(uri.ends_with("%0A%0ABest%20regards%2C%0ASam%20Lee"));
    }

    #[test]
    fn blank_subject_gets_default_line() {
        let uri = mailto_uri("alex@example.com", "Alex", "Sam", "  ", "Hello");
        assert!(uri.contains("subject=Portfolio%20Contact%20from%20Sam"));
    }

    #[test]
    fn submit_requires_name_and_message() {
        let mut form = ContactForm::new();
        form.message = "Hello there".to_string();
        assert!(form.submit("alex@example.com", "Alex").is_none());

        form.name = "Sam".to_string();
        form.message = "   ".to_string();
        assert!(form.submit("alex@example.com", "Alex").is_none());

        form.message = "Hello there".to_string();
        let uri = form.submit("alex@example.com", "Alex").unwrap();
        assert!(uri.starts_with("mailto:alex@example.com?"));
    }

    #[test]
    fn field_cycle_wraps_both_ways() {
        let mut form = ContactForm::new();
        assert_eq!(form.field, ContactField::Name);
        form.next_field();
        form.next_field();
        assert_eq!(form.field, ContactField::Message);
        form.next_field();
        assert_eq!(form.field, ContactField::Name);
        form.prev_field();
        assert_eq!(form.field, ContactField::Message);
    }
}
