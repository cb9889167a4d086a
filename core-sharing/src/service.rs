//! Playlist sharing flows
//!
//! Owners invite collaborators by email; recipients accept or decline;
//! owners may revoke. Write access requires an accepted invitation with the
//! write flag set.
//!
//! Only single-document consistency is provided: two concurrent invites for
//! the same triple may both pass the duplicate check.

use std::sync::Arc;

use core_runtime::logging::redact_if_sensitive;
use tracing::{debug, info, instrument};

use crate::error::{Result, SharingError};
use crate::models::{DocumentAck, Invitation};
use crate::repository::InviteRepository;

/// Invitation workflows over an [`InviteRepository`]
pub struct SharingService {
    repository: Arc<dyn InviteRepository>,
}

impl SharingService {
    pub fn new(repository: Arc<dyn InviteRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn InviteRepository> {
        &self.repository
    }

    /// Invite `to` to collaborate on `playlist_id`
    ///
    /// # Errors
    /// - `InvalidInput` for malformed emails, an empty playlist id or a self-invite
    /// - `Conflict` if the same invitation already exists
    #[instrument(skip_all, fields(
        from = %redact_if_sensitive("from_user", from),
        to = %redact_if_sensitive("to_user", to),
        playlist_id = %playlist_id,
    ))]
    pub async fn invite(
        &self,
        from: &str,
        to: &str,
        playlist_id: &str,
        writable: bool,
    ) -> Result<Invitation> {
        validate_email("from", from)?;
        validate_email("to", to)?;
        validate_playlist_id(playlist_id)?;

        if from.eq_ignore_ascii_case(to) {
            return Err(SharingError::InvalidInput {
                field: "to".to_string(),
                message: "cannot invite yourself".to_string(),
            });
        }

        if self
            .repository
            .get_invitation(to, from, playlist_id)
            .await?
            .is_some()
        {
            return Err(SharingError::Conflict(
                "user already invited to this playlist".to_string(),
            ));
        }

        let invitation = self
            .repository
            .send_invitation(to, from, playlist_id, writable)
            .await?;

        info!(id = %invitation.id, writable, "Invitation sent");
        Ok(invitation)
    }

    /// Accept an invitation addressed to `user`; accepting twice is a no-op.
    #[instrument(skip(self, user))]
    pub async fn accept(&self, invite_id: &str, user: &str) -> Result<Invitation> {
        let mut invitation = self.repository.get_invitation_by_id(invite_id).await?;
        ensure_party(&invitation.to_user, user, "only the recipient can accept")?;

        if invitation.accepted {
            debug!("Invitation already accepted");
            return Ok(invitation);
        }

        invitation.accepted = true;
        let updated = self.repository.update_invite(&invitation).await?;

        info!(rev = %updated.rev, "Invitation accepted");
        Ok(updated)
    }

    /// Recipient rejects (or leaves) a shared playlist
    #[instrument(skip(self, user))]
    pub async fn decline(&self, invite_id: &str, user: &str) -> Result<DocumentAck> {
        let invitation = self.repository.get_invitation_by_id(invite_id).await?;
        ensure_party(&invitation.to_user, user, "only the recipient can decline")?;

        self.repository
            .delete_invite(&invitation.id, &invitation.rev)
            .await
    }

    /// Owner withdraws an invitation
    #[instrument(skip(self, owner))]
    pub async fn revoke(&self, invite_id: &str, owner: &str) -> Result<DocumentAck> {
        let invitation = self.repository.get_invitation_by_id(invite_id).await?;
        ensure_party(&invitation.from_user, owner, "only the sender can revoke")?;

        self.repository
            .delete_invite(&invitation.id, &invitation.rev)
            .await
    }

    /// Invitations waiting for `user`'s answer
    pub async fn pending_for(&self, user: &str) -> Result<Vec<Invitation>> {
        self.repository.get_pending_invitations_of_user(user).await
    }

    /// Every invitation addressed to `user`, answered or not
    pub async fn invitations_for(&self, user: &str) -> Result<Vec<Invitation>> {
        self.repository.get_invitations_of_user(user).await
    }

    /// Invitations `owner` sent for `playlist_id`
    pub async fn collaborators(&self, owner: &str, playlist_id: &str) -> Result<Vec<Invitation>> {
        self.repository
            .get_invites_of_playlist(owner, playlist_id)
            .await
    }

    /// Whether `user` holds an accepted, writable invitation to `playlist_id`
    pub async fn can_write(&self, user: &str, playlist_id: &str) -> Result<bool> {
        Ok(self
            .repository
            .get_invitation_by_playlist_and_user(user, playlist_id)
            .await?
            .is_some_and(|invitation| invitation.accepted && invitation.write))
    }
}

fn ensure_party(expected: &str, actual: &str, message: &str) -> Result<()> {
    if expected.eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        Err(SharingError::Forbidden(message.to_string()))
    }
}

fn validate_email(field: &str, email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SharingError::InvalidInput {
            field: field.to_string(),
            message: "not a valid email address".to_string(),
        })
    }
}

fn validate_playlist_id(playlist_id: &str) -> Result<()> {
    if playlist_id.trim().is_empty() {
        return Err(SharingError::InvalidInput {
            field: "playlist_id".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}
