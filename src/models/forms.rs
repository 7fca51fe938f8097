use serde::Deserialize;
use super::Descriptor;

// Every field is optional so that an absent or null value reaches the
// handler, which answers with its own "missing" response.

#[derive(Debug, Deserialize, Default)]
pub struct EnrollForm {
    pub username: Option<String>,
    pub descriptor: Option<Descriptor>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MatchForm {
    pub descriptor: Option<Descriptor>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeleteForm {
    pub username: Option<String>,
}

impl EnrollForm {
    /// Both fields, or `None` when either is missing. An empty username
    /// counts as missing.
    pub fn into_parts(self) -> Option<(String, Descriptor)> {
        let username = self.username.filter(|u| !u.is_empty())?;
        let descriptor = self.descriptor?;
        Some((username, descriptor))
    }
}

impl DeleteForm {
    pub fn username(self) -> Option<String> {
        self.username.filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enroll_form_requires_both_fields() {
        let form: EnrollForm = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert!(form.into_parts().is_none());

        let form: EnrollForm = serde_json::from_str(r#"{"descriptor":[0.1]}"#).unwrap();
        assert!(form.into_parts().is_none());

        let form: EnrollForm =
            serde_json::from_str(r#"{"username":"","descriptor":[0.1]}"#).unwrap();
        assert!(form.into_parts().is_none());

        let form: EnrollForm =
            serde_json::from_str(r#"{"username":"alice","descriptor":null}"#).unwrap();
        assert!(form.into_parts().is_none());
    }

    #[test]
    fn enroll_form_accepts_empty_descriptor() {
        let form: EnrollForm =
            serde_json::from_str(r#"{"username":"alice","descriptor":[]}"#).unwrap();
        let (username, descriptor) = form.into_parts().unwrap();
        assert_eq!(username, "alice");
        assert!(descriptor.is_empty());
    }

    #[test]
    fn delete_form_treats_empty_username_as_missing() {
        let form: DeleteForm = serde_json::from_str(r#"{"username":""}"#).unwrap();
        assert_eq!(form.username(), None);

        let form: DeleteForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.username(), None);
    }
}
