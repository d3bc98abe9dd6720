mod common;

use chrono::{Duration, TimeZone, Utc};
use prodcheck_engine as pe;
use pe::domain::verify::{is_expired, parse_expiry};

#[test]
fn authentic_when_verified_and_not_expired() {
    let record = common::product("Vitamin C", true, "2026-01-15");
    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.status, pe::VerificationStatus::Authentic);
    assert!(!result.is_expired);
    assert!(result.is_authentic);
    assert!(!result.is_suspicious);
}

#[test]
fn warning_when_unverified_and_expired() {
    let record = common::product("Old Syrup", false, "2024-01-15");
    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.status, pe::VerificationStatus::Warning);
    assert!(result.is_expired);
    assert!(!result.is_authentic);
}

#[test]
fn status_truth_table() {
    let cases = [
        (true, "2026-01-15", pe::VerificationStatus::Authentic),
        (true, "2024-01-15", pe::VerificationStatus::Warning),
        (false, "2026-01-15", pe::VerificationStatus::Warning),
        (false, "2024-01-15", pe::VerificationStatus::Warning),
    ];
    for (verified, expiry, expected) in cases {
        let result = pe::derive(
            common::product("p", verified, expiry),
            common::now_2025(),
            pe::LocationOutcome::Skipped,
        );
        assert_eq!(result.status, expected, "verified={verified} expiry={expiry}");
    }
}

#[test]
fn suspicious_flag_forces_warning() {
    assert_eq!(
        pe::VerificationStatus::from_flags(true, false, true),
        pe::VerificationStatus::Warning
    );
    assert_eq!(
        pe::VerificationStatus::from_flags(true, false, false),
        pe::VerificationStatus::Authentic
    );
}

#[test]
fn date_only_expiry_is_utc_midnight() {
    let expiry = parse_expiry("2025-06-01").unwrap();
    assert_eq!(expiry, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
}

#[test]
fn expiry_boundary_is_exclusive() {
    let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    assert!(!is_expired(Some("2025-06-01"), expiry));
    assert!(is_expired(Some("2025-06-01"), expiry + Duration::milliseconds(1)));
    assert!(!is_expired(Some("2025-06-01"), expiry - Duration::seconds(1)));
}

#[test]
fn rfc3339_expiry_is_accepted() {
    let now = common::now_2025();
    assert!(is_expired(Some("2025-06-01T11:59:59.000Z"), now));
    assert!(!is_expired(Some("2025-06-01T14:00:00+01:00"), now));
    assert!(is_expired(Some("2025-05-31T23:00:00"), now));
}

#[test]
fn missing_or_garbage_expiry_is_not_expired() {
    let now = common::now_2025();
    assert!(!is_expired(None, now));
    assert!(!is_expired(Some("next tuesday"), now));
    assert!(!is_expired(Some(""), now));
}

#[test]
fn field_remapping() {
    let record = common::product("Vitamin C", true, "2026-01-15");
    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.batch_number.as_deref(), Some("B-2024-07"));
    assert_eq!(result.batch, result.batch_number);
    assert_eq!(result.origin, "Acme");
    assert_eq!(result.warranty, "Standard manufacturer warranty");
    // description stands in for instructions
    assert_eq!(result.instructions, "Take one daily");
}

#[test]
fn registry_warranty_and_instructions_win() {
    let mut record = common::product("Drill", true, "2030-01-01");
    record.warranty = Some("2 years".into());
    record.instructions = Some("Wear goggles".into());
    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.warranty, "2 years");
    assert_eq!(result.instructions, "Wear goggles");
}

#[test]
fn fallbacks_are_never_empty() {
    let record = pe::ProductRecord {
        name: "Bare".into(),
        warranty: Some("   ".into()),
        description: Some(String::new()),
        ..Default::default()
    };
    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.warranty, "Standard manufacturer warranty");
    assert_eq!(result.instructions, "Follow manufacturer guidelines");
    assert!(!result.is_expired);
    assert_eq!(result.status, pe::VerificationStatus::Warning);
}

#[test]
fn location_outcome_is_attached() {
    let sample = common::sample_at(12.97, 77.59);
    let captured = pe::derive(
        common::product("p", true, "2026-01-15"),
        common::now_2025(),
        pe::LocationOutcome::Captured(sample.clone()),
    );
    assert_eq!(captured.verification_location, Some(sample));
    assert!(captured.location_error.is_none());

    let failed = pe::derive(
        common::product("p", true, "2026-01-15"),
        common::now_2025(),
        pe::LocationOutcome::Failed(pe::LocationError::PermissionDenied),
    );
    assert!(failed.verification_location.is_none());
    assert_eq!(failed.location_error.as_deref(), Some("Location permission denied"));
}

#[test]
fn serialized_result_uses_display_names() {
    let json = serde_json::json!({
        "_id": "665f",
        "name": "Vitamin C",
        "brand": "Acme",
        "batch": "B1",
        "expiryDate": "2026-01-15",
        "price": 12,
        "stock": 3,
        "isVerified": true,
        "barcode": "PROD001"
    });
    let record: pe::ProductRecord = serde_json::from_value(json).unwrap();
    assert_eq!(record.id.as_deref(), Some("665f"));
    assert_eq!(record.price, Some(12.0));

    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    let out = serde_json::to_value(&result).unwrap();
    assert_eq!(out["status"], "authentic");
    assert_eq!(out["batchNumber"], "B1");
    assert_eq!(out["isAuthentic"], true);
    assert_eq!(out["isExpired"], false);
    assert_eq!(out["verificationDate"], "2025-06-01T12:00:00.000Z");
    // unknown registry fields pass through
    assert_eq!(out["barcode"], "PROD001");
    assert!(out.get("locationError").is_none());
}

#[test]
fn derived_fields_override_same_named_registry_keys() {
    let json = serde_json::json!({
        "name": "Cough Syrup",
        "brand": "Acme",
        "expiryDate": "2024-01-15",
        "isVerified": false,
        "status": "active",
        "isExpired": false,
        "isAuthentic": true,
        "origin": "China",
        "batchNumber": "FAKE",
        "verificationDate": "1999-01-01",
        "barcode": "EXPIRED001"
    });
    let record: pe::ProductRecord = serde_json::from_value(json).unwrap();
    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.status, pe::VerificationStatus::Warning);
    assert!(!result.extra.contains_key("status"));
    assert!(!result.extra.contains_key("origin"));

    let out = serde_json::to_value(&result).unwrap();
    assert_eq!(out["status"], "warning");
    assert_eq!(out["isExpired"], true);
    assert_eq!(out["isAuthentic"], false);
    assert_eq!(out["origin"], "Acme");
    assert!(out.get("batchNumber").is_none());
    assert_eq!(out["verificationDate"], "2025-06-01T12:00:00.000Z");
    assert_eq!(out["barcode"], "EXPIRED001");

    let text = serde_json::to_string(&result).unwrap();
    assert_eq!(text.matches("\"status\"").count(), 1);
    assert_eq!(text.matches("\"origin\"").count(), 1);
}

#[test]
fn null_registry_fields_read_as_missing() {
    let json = serde_json::json!({
        "_id": "665f",
        "name": null,
        "brand": null,
        "isVerified": null,
        "expiryDate": "2026-01-15"
    });
    let record: pe::ProductRecord = serde_json::from_value(json).unwrap();
    assert!(!record.is_verified);
    assert_eq!(record.name, "");

    let result = pe::derive(record, common::now_2025(), pe::LocationOutcome::Skipped);
    assert_eq!(result.status, pe::VerificationStatus::Warning);
    assert!(!result.is_expired);
    assert_eq!(result.origin, "");
}
