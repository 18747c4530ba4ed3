use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::format_date;
use super::validation::{ValidationError, validate_code, validate_date, validate_distance};

/// Separator used when sending place lists to the API.
pub const PLACE_SEPARATOR: &str = ", ";

/// Snapshot of everything the user has entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormPayload {
    pub distance: String,
    pub from_places: Vec<String>,
    pub to_places: Vec<String>,
    pub date: String,
    pub token: String,
}

impl FormPayload {
    /// Creates an empty payload dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: format_date(today),
            ..Self::default()
        }
    }

    /// Completeness check run before asking for a code.
    ///
    /// Only checks presence; formats are checked by [`validate_entry`](Self::validate_entry).
    pub fn check_complete(&self) -> Result<(), ValidationError> {
        if self.distance.trim().is_empty()
            || self.date.is_empty()
            || self.from_places.is_empty()
            || self.to_places.is_empty()
        {
            return Err(ValidationError::IncompleteForm);
        }
        Ok(())
    }

    /// Full check of the entry fields (everything except the token).
    pub fn validate_entry(&self, today: NaiveDate) -> Result<(), ValidationError> {
        self.check_complete()?;
        validate_distance(&self.distance)?;
        validate_date(&self.date, today)?;
        Ok(())
    }

    /// Extracts the non-sensitive fields that are remembered between runs.
    pub fn cached_fields(&self) -> CachedFields {
        CachedFields {
            distance: self.distance.clone(),
            from_places: self.from_places.clone(),
            to_places: self.to_places.clone(),
        }
    }
}

/// Last-used field values, persisted after a successful submit.
///
/// Never carries the token or the date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedFields {
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub from_places: Vec<String>,
    #[serde(default)]
    pub to_places: Vec<String>,
}

/// Body of the create-log-entry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    pub distance: String,
    pub from_places: String,
    pub to_places: String,
    pub date: String,
    pub token: String,
}

impl CreateLogRequest {
    /// Builds a request from a payload, validating every field and the code.
    pub fn from_payload(payload: &FormPayload, today: NaiveDate) -> Result<Self, ValidationError> {
        payload.validate_entry(today)?;
        validate_code(&payload.token)?;
        Ok(Self {
            distance: payload.distance.trim().to_string(),
            from_places: payload.from_places.join(PLACE_SEPARATOR),
            to_places: payload.to_places.join(PLACE_SEPARATOR),
            date: payload.date.clone(),
            token: payload.token.clone(),
        })
    }
}

/// Body of the export-spreadsheet call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub token: String,
}

impl ExportRequest {
    /// Builds a request, validating the code.
    pub fn new(token: &str) -> Result<Self, ValidationError> {
        validate_code(token)?;
        Ok(Self {
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn filled() -> FormPayload {
        FormPayload {
            distance: "53128".into(),
            from_places: vec!["Hyderabad".into(), "Medak".into()],
            to_places: vec!["Mumbai".into()],
            date: "2026-03-14".into(),
            token: "123456".into(),
        }
    }

    mod completeness {
        use super::*;

        #[test]
        fn new_payload_is_dated_today() {
            let payload = FormPayload::new(today());
            assert_eq!(payload.date, "2026-03-14");
            assert_eq!(payload.token, "");
        }

        #[test]
        fn filled_payload_is_complete() {
            assert_eq!(filled().check_complete(), Ok(()));
        }

        #[test]
        fn each_missing_field_is_incomplete() {
            let cases = [
                FormPayload {
                    distance: String::new(),
                    ..filled()
                },
                FormPayload {
                    date: String::new(),
                    ..filled()
                },
                FormPayload {
                    from_places: vec![],
                    ..filled()
                },
                FormPayload {
                    to_places: vec![],
                    ..filled()
                },
            ];
            for payload in cases {
                assert_eq!(
                    payload.check_complete(),
                    Err(ValidationError::IncompleteForm),
                    "{payload:?} should be incomplete"
                );
            }
        }

        #[test]
        fn whitespace_distance_is_incomplete() {
            let payload = FormPayload {
                distance: "   ".into(),
                ..filled()
            };
            assert_eq!(payload.check_complete(), Err(ValidationError::IncompleteForm));
        }

        #[test]
        fn token_not_required_for_completeness() {
            let payload = FormPayload {
                token: String::new(),
                ..filled()
            };
            assert_eq!(payload.check_complete(), Ok(()));
        }
    }

    mod entry_validation {
        use super::*;

        #[test]
        fn future_date_rejected() {
            let payload = FormPayload {
                date: "2026-03-15".into(),
                ..filled()
            };
            assert!(matches!(
                payload.validate_entry(today()),
                Err(ValidationError::InvalidDate(_))
            ));
        }

        #[test]
        fn non_numeric_distance_rejected() {
            let payload = FormPayload {
                distance: "ten".into(),
                ..filled()
            };
            assert!(matches!(
                payload.validate_entry(today()),
                Err(ValidationError::InvalidDistance(_))
            ));
        }

        #[test]
        fn incompleteness_reported_before_format() {
            let payload = FormPayload {
                distance: "ten".into(),
                to_places: vec![],
                ..filled()
            };
            assert_eq!(
                payload.validate_entry(today()),
                Err(ValidationError::IncompleteForm)
            );
        }
    }

    mod create_request {
        use super::*;

        #[test]
        fn joins_places_with_comma_space() {
            let request = CreateLogRequest::from_payload(&filled(), today()).unwrap();
            assert_eq!(request.from_places, "Hyderabad, Medak");
            assert_eq!(request.to_places, "Mumbai");
        }

        #[test]
        fn serializes_with_api_field_names() {
            let request = CreateLogRequest::from_payload(&filled(), today()).unwrap();
            let json = serde_json::to_value(&request).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "distance": "53128",
                    "fromPlaces": "Hyderabad, Medak",
                    "toPlaces": "Mumbai",
                    "date": "2026-03-14",
                    "token": "123456",
                })
            );
        }

        #[test]
        fn short_token_rejected() {
            let payload = FormPayload {
                token: "12345".into(),
                ..filled()
            };
            assert_eq!(
                CreateLogRequest::from_payload(&payload, today()),
                Err(ValidationError::InvalidCode)
            );
        }

        #[test]
        fn unpadded_date_never_sent() {
            let payload = FormPayload {
                date: "2026-3-4".into(),
                ..filled()
            };
            assert_eq!(
                CreateLogRequest::from_payload(&payload, today()),
                Err(ValidationError::InvalidDate("2026-3-4".into()))
            );
        }

        #[test]
        fn incomplete_payload_rejected_even_with_valid_token() {
            let payload = FormPayload {
                from_places: vec![],
                ..filled()
            };
            assert_eq!(
                CreateLogRequest::from_payload(&payload, today()),
                Err(ValidationError::IncompleteForm)
            );
        }
    }

    mod export_request {
        use super::*;

        #[test]
        fn valid_token() {
            let request = ExportRequest::new("654321").unwrap();
            assert_eq!(
                serde_json::to_value(&request).unwrap(),
                serde_json::json!({ "token": "654321" })
            );
        }

        #[test]
        fn invalid_token() {
            assert_eq!(ExportRequest::new("65432"), Err(ValidationError::InvalidCode));
        }
    }

    mod cache {
        use super::*;

        #[test]
        fn cached_fields_exclude_token_and_date() {
            let cached = filled().cached_fields();
            let json = serde_json::to_value(&cached).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "distance": "53128",
                    "fromPlaces": ["Hyderabad", "Medak"],
                    "toPlaces": ["Mumbai"],
                })
            );
        }

        #[test]
        fn missing_cache_keys_default() {
            let cached: CachedFields = serde_json::from_str(r#"{"distance":"10"}"#).unwrap();
            assert_eq!(cached.distance, "10");
            assert!(cached.from_places.is_empty());
            assert!(cached.to_places.is_empty());
        }
    }
}
