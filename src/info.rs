use std::collections::HashMap;

/// Details about an app instance, as returned by the instance-id service.
///
/// See https://developers.google.com/instance-id/reference/server#get_information_about_app_instances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub rel: Relationship,
}

impl DeviceInfo {
    /// Names of the topics the app instance is subscribed to.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.rel.topics.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub topics: HashMap<String, RelDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::info::DeviceInfo;

    #[test]
    fn parses_an_app_instance_with_topics() {
        let response = r#"
        {
            "applicationVersion": "36",
            "connectDate": "2018-02-21",
            "application": "com.iid.example",
            "authorizedEntity": "123456782354",
            "rel": {
                "topics": {
                    "topicname1": { "addDate": "2015-07-30" },
                    "topicname2": { "addDate": "2015-07-30" }
                }
            },
            "connectionType": "WIFI",
            "platform": "ANDROID"
        }
        "#;

        let info: DeviceInfo = serde_json::from_str(response).unwrap();

        assert_eq!(Some("com.iid.example"), info.application.as_deref());
        assert_eq!(Some("ANDROID"), info.platform.as_deref());
        assert_eq!(Some("WIFI"), info.connection_type.as_deref());
        assert_eq!(None, info.scope);

        let mut topics: Vec<&str> = info.topics().collect();
        topics.sort_unstable();
        assert_eq!(vec!["topicname1", "topicname2"], topics);
        assert_eq!(Some("2015-07-30"), info.rel.topics["topicname1"].add_date.as_deref());
    }

    #[test]
    fn parses_an_app_instance_without_relations() {
        let info: DeviceInfo = serde_json::from_str(r#"{"platform": "IOS"}"#).unwrap();

        assert_eq!(0, info.topics().count());
    }
}
