use url::form_urlencoded;

/// Where shareable links point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    /// Fixed base, e.g. `http://localhost:8501`
    Fixed(String),
    /// Publicly hosted: `https://{Host}` of the inbound request
    FromRequestHost,
}

impl BaseUrl {
    /// Resolve against the inbound request's `Host` header
    pub fn resolve(&self, host: Option<&str>) -> String {
        match self {
            BaseUrl::Fixed(base) => base.clone(),
            BaseUrl::FromRequestHost => {
                format!("https://{}", host.unwrap_or("localhost"))
            }
        }
    }
}

/// Room named by a `room` query parameter.
///
/// Repeated keys resolve to the last value; empty values count as absent.
pub fn room_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "room")
        .map(|(_, value)| value.into_owned())
        .last()
        .filter(|room| !room.is_empty())
}

/// `{base}/?room={room}`, with the room form-urlencoded
pub fn share_link(base: &str, room: &str) -> String {
    let room: String = form_urlencoded::byte_serialize(room.as_bytes()).collect();
    format!("{}/?room={}", base.trim_end_matches('/'), room)
}
