/// The visible part of a message, displayed by the device's system tray.
///
/// Empty fields are left out of the request. See
/// https://firebase.google.com/docs/cloud-messaging/http-server-ref#notification-payload-support
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sound: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub click_action: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body_loc_key: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_loc_args: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title_loc_key: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title_loc_args: Vec<String>,

    /// iOS only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,

    /// iOS only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub badge: String,

    /// Android only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub android_channel_id: String,

    /// Android only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    /// Android only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,

    /// Android only, in `#rrggbb` format
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

impl Notification {
    pub fn new<S>(title: S, body: S) -> Self
    where
        S: Into<String>,
    {
        Notification {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}
