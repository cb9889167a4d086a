//! Invite repository trait and CouchDB implementation

use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use core_runtime::config::DocumentStoreConfig;
use core_runtime::logging::redact_if_sensitive;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::couchdb::{
    check_status, parse_body, FindRequest, FindResponse, InviteSelector, LIST_LIMIT,
    SINGLE_RESULT,
};
use crate::error::{Result, SharingError};
use crate::models::{DocumentAck, Invitation, InvitationBody};

/// Invitation persistence interface
///
/// The store owns the documents: nothing is cached, and optimistic
/// concurrency is enforced by the store through the revision token.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Create a new, not yet accepted invitation
    async fn send_invitation(
        &self,
        to_email: &str,
        from_email: &str,
        playlist_id: &str,
        writable: bool,
    ) -> Result<Invitation>;

    /// Find the invitation for an exact (recipient, sender, playlist) triple
    ///
    /// # Returns
    /// - `Ok(Some(invitation))` if found
    /// - `Ok(None)` if not found
    async fn get_invitation(
        &self,
        to_email: &str,
        from_email: &str,
        playlist_id: &str,
    ) -> Result<Option<Invitation>>;

    /// Load an invitation by document id
    ///
    /// # Errors
    /// Returns [`SharingError::NotFound`] if no such document exists.
    async fn get_invitation_by_id(&self, id: &str) -> Result<Invitation>;

    /// Find the invitation of a recipient to a playlist, whoever sent it
    async fn get_invitation_by_playlist_and_user(
        &self,
        to_email: &str,
        playlist_id: &str,
    ) -> Result<Option<Invitation>>;

    /// All invitations addressed to a user (up to 100)
    async fn get_invitations_of_user(&self, to_email: &str) -> Result<Vec<Invitation>>;

    /// Not yet accepted invitations addressed to a user (up to 100)
    async fn get_pending_invitations_of_user(&self, to_email: &str) -> Result<Vec<Invitation>>;

    /// Invitations a user sent for one playlist (up to 100)
    async fn get_invites_of_playlist(
        &self,
        from_email: &str,
        playlist_id: &str,
    ) -> Result<Vec<Invitation>>;

    /// Delete an invitation at revision `rev`
    ///
    /// # Errors
    /// Returns [`SharingError::Conflict`] if `rev` is stale.
    async fn delete_invite(&self, id: &str, rev: &str) -> Result<DocumentAck>;

    /// Write back an invitation; `invitation.rev` must be current.
    ///
    /// Returns the invitation carrying its new revision.
    ///
    /// # Errors
    /// Returns [`SharingError::Conflict`] if `invitation.rev` is stale.
    async fn update_invite(&self, invitation: &Invitation) -> Result<Invitation>;
}

/// [`InviteRepository`] over the CouchDB HTTP API
///
/// | Operation | Request |
/// |-----------|---------|
/// | create | `POST /{db}/` |
/// | queries | `POST /{db}/_find` with a selector and a limit |
/// | load | `GET /{db}/{id}` |
/// | delete | `DELETE /{db}/{id}?rev={rev}` |
/// | update | `PUT /{db}/{id}` with `_rev` in the body |
pub struct CouchInviteRepository {
    http_client: Arc<dyn HttpClient>,
    database_url: String,
    credentials: Option<(String, String)>,
}

impl CouchInviteRepository {
    /// `database_url` is the invitations database URL, e.g.
    /// `http://localhost:5984/invites/`.
    pub fn new(http_client: Arc<dyn HttpClient>, database_url: impl Into<String>) -> Self {
        let mut database_url = database_url.into();
        if !database_url.ends_with('/') {
            database_url.push('/');
        }

        Self {
            http_client,
            database_url,
            credentials: None,
        }
    }

    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &DocumentStoreConfig) -> Self {
        let repository = Self::new(http_client, config.invites_url());
        match (&config.username, &config.password) {
            (Some(username), Some(password)) => repository.with_basic_auth(username, password),
            _ => repository,
        }
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}{}", self.database_url, urlencoding::encode(id))
    }

    fn request(&self, method: HttpMethod, url: String) -> HttpRequest {
        let request = HttpRequest::new(method, url).header("Accept", "application/json");
        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, password),
            None => request,
        }
    }

    async fn send(&self, request: HttpRequest, context: &str) -> Result<HttpResponse> {
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SharingError::Network(e.to_string()))?;

        check_status(&response, context)?;
        Ok(response)
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        method: HttpMethod,
        url: String,
        body: &B,
        context: &str,
    ) -> Result<HttpResponse> {
        let request = self.request(method, url).json(body)?;
        self.send(request, context).await
    }

    async fn find(&self, selector: InviteSelector, limit: u32) -> Result<Vec<Invitation>> {
        let url = format!("{}_find", self.database_url);
        let response = self
            .send_json(HttpMethod::Post, url, &FindRequest { selector, limit }, "_find")
            .await?;

        let found: FindResponse<Invitation> = parse_body(&response)?;
        debug!(count = found.docs.len(), "Invitation query completed");
        Ok(found.docs)
    }

    async fn find_one(&self, selector: InviteSelector) -> Result<Option<Invitation>> {
        Ok(self.find(selector, SINGLE_RESULT).await?.into_iter().next())
    }
}

#[async_trait]
impl InviteRepository for CouchInviteRepository {
    #[instrument(skip_all, fields(to = %redact_if_sensitive("to_user", to_email), playlist_id = %playlist_id))]
    async fn send_invitation(
        &self,
        to_email: &str,
        from_email: &str,
        playlist_id: &str,
        writable: bool,
    ) -> Result<Invitation> {
        let body = InvitationBody {
            accepted: false,
            to_user: to_email,
            from_user: from_email,
            playlist_id,
            write: writable,
            rev: None,
        };

        let response = self
            .send_json(HttpMethod::Post, self.database_url.clone(), &body, "create invitation")
            .await?;
        let ack: DocumentAck = parse_body(&response)?;

        debug!(id = %ack.id, "Invitation created");

        Ok(Invitation {
            id: ack.id,
            rev: ack.rev,
            to_user: to_email.to_string(),
            from_user: from_email.to_string(),
            playlist_id: playlist_id.to_string(),
            accepted: false,
            write: writable,
        })
    }

    async fn get_invitation(
        &self,
        to_email: &str,
        from_email: &str,
        playlist_id: &str,
    ) -> Result<Option<Invitation>> {
        self.find_one(
            InviteSelector::default()
                .to_user(to_email)
                .from_user(from_email)
                .playlist(playlist_id),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_invitation_by_id(&self, id: &str) -> Result<Invitation> {
        let response = self
            .send(self.request(HttpMethod::Get, self.document_url(id)), id)
            .await?;
        parse_body(&response)
    }

    async fn get_invitation_by_playlist_and_user(
        &self,
        to_email: &str,
        playlist_id: &str,
    ) -> Result<Option<Invitation>> {
        self.find_one(InviteSelector::default().to_user(to_email).playlist(playlist_id))
            .await
    }

    async fn get_invitations_of_user(&self, to_email: &str) -> Result<Vec<Invitation>> {
        self.find(InviteSelector::default().to_user(to_email), LIST_LIMIT)
            .await
    }

    async fn get_pending_invitations_of_user(&self, to_email: &str) -> Result<Vec<Invitation>> {
        self.find(
            InviteSelector::default().to_user(to_email).accepted(false),
            LIST_LIMIT,
        )
        .await
    }

    async fn get_invites_of_playlist(
        &self,
        from_email: &str,
        playlist_id: &str,
    ) -> Result<Vec<Invitation>> {
        self.find(
            InviteSelector::default()
                .from_user(from_email)
                .playlist(playlist_id),
            LIST_LIMIT,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_invite(&self, id: &str, rev: &str) -> Result<DocumentAck> {
        let url = format!("{}?rev={}", self.document_url(id), urlencoding::encode(rev));
        let response = self.send(self.request(HttpMethod::Delete, url), id).await?;
        parse_body(&response)
    }

    #[instrument(skip(self, invitation), fields(id = %invitation.id, rev = %invitation.rev))]
    async fn update_invite(&self, invitation: &Invitation) -> Result<Invitation> {
        let response = self
            .send_json(
                HttpMethod::Put,
                self.document_url(&invitation.id),
                &InvitationBody::for_update(invitation),
                &invitation.id,
            )
            .await?;
        let ack: DocumentAck = parse_body(&response)?;

        Ok(Invitation {
            rev: ack.rev,
            ..invitation.clone()
        })
    }
}
