use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{error::ValidationError, notification::Notification};

/// Maximum number of registration ids in one multicast message.
pub const MAX_REGISTRATION_IDS: usize = 1000;

/// Maximum time to live, 28 days in seconds.
pub const MAX_TIME_TO_LIVE: u32 = 2_419_200;

/// Maximum number of `&&` and `||` operators in a condition.
pub const MAX_CONDITION_OPERATORS: usize = 5;

/// Delivery priority of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A downstream message for the legacy HTTP protocol.
///
/// Exactly one of `to`, `registration_ids` or `condition` should be set. Empty
/// and unset fields are not serialized. See
/// https://firebase.google.com/docs/cloud-messaging/http-server-ref#downstream-http-messages-json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// A registration token, a notification key or a `/topics/` name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registration_ids: Vec<String>,

    /// A logical expression of topics, e.g. `'dogs' in topics || 'cats' in topics`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collapse_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub content_available: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub mutable_content: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub delay_while_idle: bool,

    /// Seconds the message is kept if the device is offline. Unset uses the
    /// service default of four weeks, zero means "now or never".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<u32>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub restricted_package_name: String,

    /// Lets the service validate the request without delivering it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub apns: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub webpush: Map<String, Value>,
}

impl Message {
    /// Checks the message is well-formed enough to be sent.
    ///
    /// The target check only requires one target to look usable, it does not
    /// reject messages that set several of them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let operators = self.condition.matches("&&").count() + self.condition.matches("||").count();
        let condition_unusable = self.condition.is_empty() || operators > MAX_CONDITION_OPERATORS;

        if self.to.is_empty() && condition_unusable && self.registration_ids.is_empty() {
            return Err(ValidationError::InvalidTarget);
        }

        if self.registration_ids.len() > MAX_REGISTRATION_IDS {
            return Err(ValidationError::TooManyRegistrationIds);
        }

        if let Some(ttl) = self.time_to_live {
            if ttl > MAX_TIME_TO_LIVE {
                return Err(ValidationError::InvalidTimeToLive);
            }
        }

        Ok(())
    }
}

/// Validates a message that might not exist.
pub fn validate(message: Option<&Message>) -> Result<(), ValidationError> {
    match message {
        Some(message) => message.validate(),
        None => Err(ValidationError::MissingMessage),
    }
}

/// The main class for creating a message.
#[derive(Debug)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// A message to a single registration token, notification key or topic.
    pub fn to<S: Into<String>>(target: S) -> MessageBuilder {
        MessageBuilder {
            message: Message {
                to: target.into(),
                ..Default::default()
            },
        }
    }

    /// A multicast message to up to 1000 registration tokens.
    pub fn registration_ids<I, S>(tokens: I) -> MessageBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MessageBuilder {
            message: Message {
                registration_ids: tokens.into_iter().map(Into::into).collect(),
                ..Default::default()
            },
        }
    }

    /// A message to every device matching a topic condition.
    pub fn condition<S: Into<String>>(condition: S) -> MessageBuilder {
        MessageBuilder {
            message: Message {
                condition: condition.into(),
                ..Default::default()
            },
        }
    }

    /// Groups messages so only the last one is delivered when the device comes
    /// back online.
    pub fn set_collapse_key<S: Into<String>>(&mut self, collapse_key: S) {
        self.message.collapse_key = collapse_key.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.message.priority = Some(priority);
    }

    /// iOS: wakes the app in the background.
    pub fn set_content_available(&mut self, content_available: bool) {
        self.message.content_available = content_available;
    }

    /// iOS: lets a notification service extension modify the notification.
    pub fn set_mutable_content(&mut self, mutable_content: bool) {
        self.message.mutable_content = mutable_content;
    }

    pub fn set_delay_while_idle(&mut self, delay_while_idle: bool) {
        self.message.delay_while_idle = delay_while_idle;
    }

    /// How long the service should keep the message if the device is offline,
    /// in seconds. At most 2419200.
    pub fn set_time_to_live(&mut self, ttl: u32) {
        self.message.time_to_live = Some(ttl);
    }

    pub fn set_restricted_package_name<S: Into<String>>(&mut self, package_name: S) {
        self.message.restricted_package_name = package_name.into();
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.message.dry_run = dry_run;
    }

    pub fn add_data<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.message.data.insert(key.into(), value.into());
    }

    pub fn set_notification(&mut self, notification: Notification) {
        self.message.notification = Some(notification);
    }

    /// Free-form APNs options, sent as is.
    pub fn set_apns(&mut self, apns: Map<String, Value>) {
        self.message.apns = apns;
    }

    /// Free-form web push options, sent as is.
    pub fn set_webpush(&mut self, webpush: Map<String, Value>) {
        self.message.webpush = webpush;
    }

    /// Validates and returns the message.
    pub fn build(self) -> Result<Message, ValidationError> {
        self.message.validate()?;
        Ok(self.message)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::ValidationError;
    use crate::message::*;
    use crate::notification::Notification;

    fn tokens(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("token-{}", i)).collect()
    }

    #[test]
    fn missing_message_is_rejected() {
        assert_eq!(Err(ValidationError::MissingMessage), validate(None));
    }

    #[test]
    fn message_without_target_is_rejected() {
        let message = Message::default();

        assert_eq!(Err(ValidationError::InvalidTarget), message.validate());
        assert_eq!(Err(ValidationError::InvalidTarget), validate(Some(&message)));
    }

    #[test]
    fn options_do_not_count_as_a_target() {
        let message = Message {
            collapse_key: "updates".into(),
            dry_run: true,
            notification: Some(Notification::new("A", "B")),
            ..Default::default()
        };

        assert_eq!(Err(ValidationError::InvalidTarget), message.validate());
    }

    #[test]
    fn condition_with_five_operators_is_accepted() {
        let message = Message {
            condition: "'a' in topics && 'b' in topics || 'c' in topics && 'd' in topics || 'e' in topics && 'f' in topics"
                .into(),
            ..Default::default()
        };

        assert_eq!(Ok(()), message.validate());
    }

    #[test]
    fn condition_with_six_operators_is_rejected() {
        let message = Message {
            condition: "'a' in topics && 'b' in topics && 'c' in topics && 'd' in topics && 'e' in topics && 'f' in topics && 'g' in topics"
                .into(),
            ..Default::default()
        };

        assert_eq!(Err(ValidationError::InvalidTarget), message.validate());
    }

    #[test]
    fn too_many_operators_are_fine_when_another_target_is_set() {
        let message = Message {
            to: "token".into(),
            condition: "a && b && c && d && e && f && g".into(),
            ..Default::default()
        };

        assert_eq!(Ok(()), message.validate());
    }

    #[test]
    fn a_thousand_registration_ids_are_accepted() {
        let message = Message {
            registration_ids: tokens(1000),
            ..Default::default()
        };

        assert_eq!(Ok(()), message.validate());
    }

    #[test]
    fn more_than_a_thousand_registration_ids_are_rejected() {
        let message = Message {
            to: "token".into(),
            registration_ids: tokens(1001),
            time_to_live: Some(MAX_TIME_TO_LIVE + 1),
            ..Default::default()
        };

        assert_eq!(Err(ValidationError::TooManyRegistrationIds), message.validate());
    }

    #[test]
    fn time_to_live_above_28_days_is_rejected() {
        let mut message = Message {
            to: "token".into(),
            time_to_live: Some(2_419_201),
            ..Default::default()
        };

        assert_eq!(Err(ValidationError::InvalidTimeToLive), message.validate());

        message.time_to_live = Some(2_419_200);
        assert_eq!(Ok(()), message.validate());

        message.time_to_live = Some(0);
        assert_eq!(Ok(()), message.validate());
    }

    #[test]
    fn default_options_serialize_only_the_target() {
        let message = Message {
            to: "T".into(),
            ..Default::default()
        };

        assert_eq!(r#"{"to":"T"}"#, serde_json::to_string(&message).unwrap());

        let message = Message {
            registration_ids: vec!["a".into(), "b".into()],
            ..Default::default()
        };

        assert_eq!(
            r#"{"registration_ids":["a","b"]}"#,
            serde_json::to_string(&message).unwrap()
        );
    }

    #[test]
    fn zero_time_to_live_is_sent() {
        let message = Message {
            to: "T".into(),
            time_to_live: Some(0),
            ..Default::default()
        };

        assert_eq!(r#"{"to":"T","time_to_live":0}"#, serde_json::to_string(&message).unwrap());
    }

    #[test]
    fn dry_run_notification_serializes_exactly() {
        let mut builder = MessageBuilder::to("T");
        builder.set_dry_run(true);
        builder.set_notification(Notification::new("A", "B"));

        let message = builder.build().unwrap();

        assert_eq!(
            r#"{"to":"T","dry_run":true,"notification":{"title":"A","body":"B"}}"#,
            serde_json::to_string(&message).unwrap()
        );
    }

    #[test]
    fn builder_sets_every_option() {
        let mut builder = MessageBuilder::condition("'news' in topics");
        builder.set_collapse_key("news");
        builder.set_priority(Priority::High);
        builder.set_content_available(true);
        builder.set_mutable_content(true);
        builder.set_delay_while_idle(true);
        builder.set_time_to_live(3600);
        builder.set_restricted_package_name("com.example");
        builder.add_data("story", "42");

        let mut apns = serde_json::Map::new();
        apns.insert("headers".into(), json!({"apns-priority": "10"}));
        builder.set_apns(apns);

        let json = serde_json::to_value(builder.build().unwrap()).unwrap();

        assert_eq!(
            json!({
                "condition": "'news' in topics",
                "collapse_key": "news",
                "priority": "high",
                "content_available": true,
                "mutable_content": true,
                "delay_while_idle": true,
                "time_to_live": 3600,
                "restricted_package_name": "com.example",
                "data": {"story": "42"},
                "apns": {"headers": {"apns-priority": "10"}}
            }),
            json
        );
    }

    #[test]
    fn builder_rejects_invalid_messages() {
        let mut builder = MessageBuilder::registration_ids(tokens(2));
        builder.set_time_to_live(MAX_TIME_TO_LIVE + 1);

        assert_eq!(Err(ValidationError::InvalidTimeToLive), builder.build());
        assert_eq!(
            Err(ValidationError::TooManyRegistrationIds),
            MessageBuilder::registration_ids(tokens(1001)).build()
        );
    }
}
