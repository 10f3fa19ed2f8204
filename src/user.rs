/// An account of the identity toolkit.
///
/// See https://firebase.google.com/docs/reference/rest/auth#section-get-account-info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub local_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Timestamps are epoch strings, in seconds for `validSince` and
    /// milliseconds for the others.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_since: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_user_info: Vec<ProviderInfo>,
}

/// A sign-in provider linked to the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    #[serde(default)]
    pub provider_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupUserResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupUserRequest<'a> {
    pub id_token: &'a str,
}

#[cfg(test)]
mod tests {
    use crate::user::*;

    #[test]
    fn parses_a_lookup_response() {
        let response = r#"
        {
            "kind": "identitytoolkit#GetAccountInfoResponse",
            "users": [
                {
                    "localId": "3cfw9FdvyKcR3EHm4VuMPGEJTLj1",
                    "phoneNumber": "+84906516578",
                    "emailVerified": false,
                    "validSince": "1573626353",
                    "disabled": false,
                    "lastLoginAt": "1573626353612",
                    "createdAt": "1573626353611",
                    "providerUserInfo": [
                        { "providerId": "phone", "rawId": "+84906516578" }
                    ]
                }
            ]
        }
        "#;

        let lookup: LookupUserResponse = serde_json::from_str(response).unwrap();
        let user = &lookup.users[0];

        assert_eq!("identitytoolkit#GetAccountInfoResponse", lookup.kind);
        assert_eq!("3cfw9FdvyKcR3EHm4VuMPGEJTLj1", user.local_id);
        assert_eq!(Some("+84906516578"), user.phone_number.as_deref());
        assert_eq!(None, user.email);
        assert!(!user.disabled);
        assert_eq!("phone", user.provider_user_info[0].provider_id);
    }

    #[test]
    fn serializes_the_request_in_camel_case() {
        let body = serde_json::to_string(&LookupUserRequest { id_token: "jwt" }).unwrap();

        assert_eq!(r#"{"idToken":"jwt"}"#, body);
    }
}
