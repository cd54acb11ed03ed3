use serde::{Deserialize, Serialize};

/// Permissions carried in the `video` claim of an access token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    /// Permission to join `room`
    #[serde(default, skip_serializing_if = "is_false")]
    pub room_join: bool,

    /// Room the grant applies to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub room: String,

    /// Permission to use the egress (recording) service
    #[serde(default, skip_serializing_if = "is_false")]
    pub room_record: bool,
}

impl VideoGrant {
    /// Grant for joining a single room
    pub fn join(room: impl Into<String>) -> Self {
        Self {
            room_join: true,
            room: room.into(),
            ..Default::default()
        }
    }

    /// Grant for calling the egress API
    pub fn record() -> Self {
        Self {
            room_record: true,
            ..Default::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// JWT claims of a platform access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// API key the token was signed for
    pub iss: String,
    /// Participant identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,
    pub nbf: i64,
    pub exp: i64,
    pub video: VideoGrant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_grant_uses_wire_names() {
        let json = serde_json::to_value(VideoGrant::join("standup")).unwrap();
        assert_eq!(json["roomJoin"], true);
        assert_eq!(json["room"], "standup");
        assert!(json.get("roomRecord").is_none());
    }

    #[test]
    fn record_grant_omits_room() {
        let json = serde_json::to_value(VideoGrant::record()).unwrap();
        assert_eq!(json, serde_json::json!({ "roomRecord": true }));
    }
}
