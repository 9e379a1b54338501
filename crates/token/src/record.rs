//! Transferable record: the flat key/value form of a token that crosses a
//! process boundary.

use serde::{Deserialize, Serialize};

use mt_domain::error::Result;

use crate::handle::RawHandle;

/// Flat record moved between processes.  Every key is optional on the wire;
/// [`SessionToken::from_record`](crate::SessionToken::from_record) decides
/// which ones a given token type requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Owning user id.  Read as 0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,
    /// Wire value of the [`TokenType`](crate::TokenType).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Session id.  An empty string is a valid id, absence is not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_binder: Option<RawHandle>,
}

impl TransferRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a record.  Malformed JSON or a value of the wrong shape (a
    /// non-integer `type`, a negative `uid`) fails here as [`Error::Json`],
    /// before any token validation; only well-formed records reach
    /// [`SessionToken::from_record`](crate::SessionToken::from_record).
    ///
    /// [`Error::Json`]: mt_domain::Error::Json
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_domain::Error;

    #[test]
    fn absent_keys_are_omitted() {
        let record = TransferRecord {
            token_type: Some(1),
            package_name: Some("com.example.player".into()),
            id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"type":1,"package_name":"com.example.player","id":""}"#
        );
    }

    #[test]
    fn empty_object_parses_to_empty_record() {
        assert_eq!(TransferRecord::from_json("{}").unwrap(), TransferRecord::default());
    }

    #[test]
    fn wire_keys_match_record_layout() {
        let record = TransferRecord::from_json(
            r#"{"uid":10001,"type":0,"package_name":"p","id":"main","session_binder":77}"#,
        )
        .unwrap();
        assert_eq!(record.uid, Some(10001));
        assert_eq!(record.token_type, Some(0));
        assert_eq!(record.session_binder, Some(RawHandle(77)));
        assert!(record.service_name.is_none());
    }

    #[test]
    fn negative_uid_is_a_json_error() {
        let err = TransferRecord::from_json(r#"{"uid":-1}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn malformed_type_is_a_json_error() {
        for raw in [r#"{"type":"session"}"#, r#"{"type":4294967296}"#] {
            let err = TransferRecord::from_json(raw).unwrap_err();
            assert!(matches!(err, Error::Json(_)), "{raw}");
        }
    }
}
