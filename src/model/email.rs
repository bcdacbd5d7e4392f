use serde::{Deserialize, Serialize};

/// Mailbox id of the inbox; emails without an explicit mailbox land here on the board
pub const INBOX_MAILBOX_ID: &str = "INBOX";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailboxKind {
    System,
    User,
    Custom,
    #[serde(other)]
    Other,
}

/// Icon category of a mailbox
///
/// Unknown icon tags sent by the API fall back to [`MailboxIcon::Mail`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MailboxIcon {
    Inbox,
    Star,
    Clock,
    FileEdit,
    Archive,
    Trash,
    Briefcase,
    User,
    #[default]
    Mail,
    Users,
    Tag,
    Bell,
    MessageSquare,
}

impl MailboxIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Star => "Star",
            Self::Clock => "Clock",
            Self::FileEdit => "FileEdit",
            Self::Archive => "Archive",
            Self::Trash => "Trash2",
            Self::Briefcase => "Briefcase",
            Self::User => "User",
            Self::Mail => "Mail",
            Self::Users => "Users",
            Self::Tag => "Tag",
            Self::Bell => "Bell",
            Self::MessageSquare => "MessageSquare",
        }
    }
}

impl From<&str> for MailboxIcon {
    fn from(tag: &str) -> Self {
        match tag {
            "Inbox" => Self::Inbox,
            "Star" => Self::Star,
            "Clock" => Self::Clock,
            "FileEdit" => Self::FileEdit,
            "Archive" => Self::Archive,
            "Trash" | "Trash2" => Self::Trash,
            "Briefcase" => Self::Briefcase,
            "User" => Self::User,
            "Users" => Self::Users,
            "Tag" => Self::Tag,
            "Bell" => Self::Bell,
            "MessageSquare" => Self::MessageSquare,
            _ => Self::Mail,
        }
    }
}

impl From<String> for MailboxIcon {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<MailboxIcon> for String {
    fn from(icon: MailboxIcon) -> Self {
        icon.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: MailboxIcon,
    #[serde(default)]
    pub is_main: bool,
    #[serde(rename = "type")]
    pub kind: MailboxKind,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

impl EmailAddress {
    /// The name when present, otherwise the address
    pub fn display(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    pub from: EmailAddress,
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    pub subject: String,
    #[serde(default)]
    pub preview: String,
    pub timestamp: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub has_attachments: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub mailbox_id: Option<String>,
}

impl Email {
    /// Attachment count shown on cards, at least one when the email is flagged as having any
    pub fn attachment_count(&self) -> usize {
        if self.attachments.is_empty() {
            1
        } else {
            self.attachments.len()
        }
    }
}

/// AI generated summary of a single message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSummary {
    #[serde(default)]
    pub one_line_subject: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEmailRequest<'a> {
    pub target_mailbox_id: &'a str,
}

#[derive(Serialize)]
pub struct CreateLabelRequest<'a> {
    pub name: &'a str,
}
