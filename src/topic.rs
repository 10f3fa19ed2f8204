/// Body of the instance-id batch add and batch remove calls.
///
/// The tokens go out as `registration_tokens` in snake_case, the field name
/// the instance-id service reads. A camelCase `registrationTokens` is ignored
/// by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSubscription {
    /// The topic, e.g. `/topics/news`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registration_tokens: Vec<String>,
}

impl TopicSubscription {
    pub fn new<S: Into<String>>(tokens: &[String], topic: S) -> Self {
        TopicSubscription {
            to: topic.into(),
            registration_tokens: tokens.to_vec(),
        }
    }
}
