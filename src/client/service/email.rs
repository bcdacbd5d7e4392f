use serde::de::IgnoredAny;
use url::form_urlencoded::byte_serialize;

use crate::{
    client::{
        error::ClientError,
        service::api::{ApiClient, Auth},
    },
    model::email::{CreateLabelRequest, Email, EmailSummary, Mailbox, MoveEmailRequest},
};

/// Percent-encodes an id for use as a single path segment
fn segment(id: &str) -> String {
    byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Mailbox, label and summary endpoints, all authenticated with the session's access token
#[derive(Clone)]
pub struct EmailService {
    client: ApiClient,
}

impl EmailService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_mailboxes(&self) -> Result<Vec<Mailbox>, ClientError> {
        self.client.get("/mailboxes", Auth::Bearer).await
    }

    pub async fn list_emails(&self, mailbox_id: &str) -> Result<Vec<Email>, ClientError> {
        self.client
            .get(
                &format!("/mailboxes/{}/emails", segment(mailbox_id)),
                Auth::Bearer,
            )
            .await
    }

    pub async fn move_email(
        &self,
        email_id: &str,
        target_mailbox_id: &str,
    ) -> Result<(), ClientError> {
        self.client
            .post::<_, IgnoredAny>(
                &format!("/emails/{}/move", segment(email_id)),
                &MoveEmailRequest { target_mailbox_id },
                Auth::Bearer,
            )
            .await
            .map(drop)
    }

    pub async fn create_label(&self, name: &str) -> Result<Mailbox, ClientError> {
        self.client
            .post("/labels", &CreateLabelRequest { name }, Auth::Bearer)
            .await
    }

    pub async fn delete_label(&self, label_id: &str) -> Result<(), ClientError> {
        self.client
            .delete::<IgnoredAny>(&format!("/labels/{}", segment(label_id)), Auth::Bearer)
            .await
            .map(drop)
    }

    pub async fn summarize_email(&self, message_id: &str) -> Result<EmailSummary, ClientError> {
        self.client
            .get(
                &format!("/emails/{}/summary", segment(message_id)),
                Auth::Bearer,
            )
            .await
    }
}
