//! Invitation documents

use serde::{Deserialize, Serialize};

/// A playlist-sharing invitation as stored in the document store.
///
/// `id` and `rev` are assigned by the store; `rev` changes on every write and
/// must be echoed back on update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev")]
    pub rev: String,
    pub to_user: String,
    pub from_user: String,
    pub playlist_id: String,
    pub accepted: bool,
    /// Whether the recipient may edit the playlist
    pub write: bool,
}

/// Body written on create (`rev: None`) and update (`rev: Some`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvitationBody<'a> {
    pub accepted: bool,
    pub to_user: &'a str,
    pub from_user: &'a str,
    pub playlist_id: &'a str,
    pub write: bool,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<&'a str>,
}

impl<'a> InvitationBody<'a> {
    pub(crate) fn for_update(invitation: &'a Invitation) -> Self {
        Self {
            accepted: invitation.accepted,
            to_user: &invitation.to_user,
            from_user: &invitation.from_user,
            playlist_id: &invitation.playlist_id,
            write: invitation.write,
            rev: Some(&invitation.rev),
        }
    }
}

/// Store acknowledgement of a write: `{ok, id, rev}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAck {
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invitation_wire_names() {
        let invitation: Invitation = serde_json::from_value(json!({
            "_id": "inv1",
            "_rev": "1-abc",
            "toUser": "bob@example.com",
            "fromUser": "alice@example.com",
            "playlistId": "pl-1",
            "accepted": false,
            "write": true
        }))
        .unwrap();

        assert_eq!(invitation.id, "inv1");
        assert_eq!(invitation.rev, "1-abc");
        assert_eq!(invitation.to_user, "bob@example.com");
        assert!(invitation.write);
    }

    #[test]
    fn test_update_body_carries_revision() {
        let invitation = Invitation {
            id: "inv1".into(),
            rev: "2-def".into(),
            to_user: "bob@example.com".into(),
            from_user: "alice@example.com".into(),
            playlist_id: "pl-1".into(),
            accepted: true,
            write: false,
        };

        let body = serde_json::to_value(InvitationBody::for_update(&invitation)).unwrap();

        assert_eq!(
            body,
            json!({
                "accepted": true,
                "toUser": "bob@example.com",
                "fromUser": "alice@example.com",
                "playlistId": "pl-1",
                "write": false,
                "_rev": "2-def"
            })
        );
    }
}
