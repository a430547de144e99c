use std::str::FromStr;

use serde_json::json;

use super::*;

fn loader_work_type() -> WorkType {
    WorkType {
        id: 7,
        name: "Грузчик".to_owned(),
        name_gt5: "грузчиков".to_owned(),
        name_lt5: "грузчика".to_owned(),
        name_one: "грузчик".to_owned(),
    }
}

fn full_record() -> serde_json::Value {
    json!({
        "id": "1",
        "logo": "  https://cdn.example.com/acme.png \n",
        "address": "Tverskaya 1",
        "companyName": "Acme",
        "dateStartByCity": "21.05.2025",
        "timeStartByCity": "08:00",
        "timeEndByCity": "20:00",
        "currentWorkers": 2,
        "planWorkers": 5,
        "workTypes": [
            { "id": 7, "name": "Грузчик", "nameGt5": "грузчиков", "nameLt5": "грузчика", "nameOne": "грузчик" }
        ],
        "priceWorker": 1500.75,
        "bonusPriceWorker": 0,
        "customerFeedbacksCount": "12",
        "customerRating": 4.8,
        "isPromotionEnabled": true
    })
}

#[test]
fn parses_full_server_record() {
    let shift: Shift = serde_json::from_value(full_record()).expect("record should parse");

    assert_eq!(shift.id, "1");
    assert_eq!(shift.company_name, "Acme");
    assert_eq!(shift.current_workers, 2);
    assert_eq!(shift.plan_workers, 5);
    assert_eq!(shift.work_types, vec![loader_work_type()]);
    assert_eq!(shift.price_worker, Decimal::from_str("1500.75").unwrap());
    assert_eq!(shift.customer_feedbacks_count, "12");
    assert!(shift.is_promotion_enabled);
}

#[test]
fn round_trip_preserves_identity_counters_and_pay() {
    let original: Shift = serde_json::from_value(full_record()).unwrap();
    let rendered = serde_json::to_string(&original).expect("shift should serialize");
    let reparsed: Shift = serde_json::from_str(&rendered).expect("serialized shift should parse");

    assert_eq!(reparsed.id, original.id);
    assert_eq!(reparsed.company_name, original.company_name);
    assert_eq!(reparsed.current_workers, original.current_workers);
    assert_eq!(reparsed.plan_workers, original.plan_workers);
    assert_eq!(reparsed.price_worker, original.price_worker);
    assert_eq!(reparsed.price_worker.to_string(), "1500.75");
}

#[test]
fn sparse_record_defaults_display_fields() {
    let shift: Shift = serde_json::from_value(json!({ "id": "x" })).unwrap();
    assert_eq!(shift.company_name, "");
    assert_eq!(shift.plan_workers, 0);
    assert!(shift.work_types.is_empty());
    assert_eq!(shift.price_worker, Decimal::ZERO);
    assert!(!shift.is_promotion_enabled);
}

#[test]
fn null_display_fields_read_as_defaults() {
    let shift: Shift = serde_json::from_value(json!({
        "id": "2",
        "companyName": "Beta",
        "logo": null,
        "address": null,
        "planWorkers": null,
        "workTypes": [{ "id": 3, "name": "Уборка", "nameOne": null }],
        "priceWorker": 900,
        "bonusPriceWorker": null,
        "customerFeedbacksCount": null,
        "customerRating": null,
        "isPromotionEnabled": null
    }))
    .expect("nulls in display fields should not reject the record");

    assert_eq!(shift.company_name, "Beta");
    assert_eq!(shift.logo_uri(), None);
    assert_eq!(shift.address, "");
    assert_eq!(shift.plan_workers, 0);
    assert_eq!(shift.work_types[0].name_for_count(1), "Уборка");
    assert_eq!(shift.price_worker, Decimal::from(900));
    assert_eq!(shift.bonus_price_worker, Decimal::ZERO);
    assert!(!shift.has_bonus());
    assert!(shift.customer_rating.abs() < f64::EPSILON);
    assert!(!shift.is_promotion_enabled);
}

#[test]
fn null_id_is_rejected() {
    let result = serde_json::from_value::<Shift>(json!({ "id": null, "companyName": "Acme" }));
    assert!(result.is_err());
}

#[test]
fn record_without_id_is_rejected() {
    let result = serde_json::from_value::<Shift>(json!({ "companyName": "Acme" }));
    assert!(result.is_err(), "id is the identity field and must be present");
}

#[test]
fn logo_uri_is_trimmed_and_blank_is_none() {
    let mut shift: Shift = serde_json::from_value(full_record()).unwrap();
    assert_eq!(shift.logo_uri(), Some("https://cdn.example.com/acme.png"));
    shift.logo = "   ".to_owned();
    assert_eq!(shift.logo_uri(), None);
}

#[test]
fn display_labels_match_list_and_detail_views() {
    let shift: Shift = serde_json::from_value(full_record()).unwrap();
    assert_eq!(shift.time_window(), "08:00 – 20:00");
    assert_eq!(shift.schedule_label(), "21.05.2025 08:00 – 20:00");
    assert_eq!(shift.workers_label(), "2/5");
    assert_eq!(shift.work_types_label(), "Грузчик");
    assert_eq!(shift.rating_label(), "4.8 (12)");
    assert!(!shift.has_bonus());
}

#[test]
fn open_slots_saturates_when_overbooked() {
    let mut shift: Shift = serde_json::from_value(full_record()).unwrap();
    assert_eq!(shift.open_slots(), 3);
    assert!(!shift.is_fully_staffed());

    shift.current_workers = 7;
    assert_eq!(shift.open_slots(), 0);
    assert!(shift.is_fully_staffed());
}

#[test]
fn work_type_name_follows_plural_rules() {
    let wt = loader_work_type();
    assert_eq!(wt.name_for_count(1), "грузчик");
    assert_eq!(wt.name_for_count(21), "грузчик");
    assert_eq!(wt.name_for_count(3), "грузчика");
    assert_eq!(wt.name_for_count(24), "грузчика");
    assert_eq!(wt.name_for_count(5), "грузчиков");
    assert_eq!(wt.name_for_count(11), "грузчиков");
    assert_eq!(wt.name_for_count(12), "грузчиков");
    assert_eq!(wt.name_for_count(0), "грузчиков");
}

#[test]
fn work_type_name_falls_back_to_base_name() {
    let wt = WorkType {
        id: 1,
        name: "Picker".to_owned(),
        name_gt5: String::new(),
        name_lt5: String::new(),
        name_one: String::new(),
    };
    assert_eq!(wt.name_for_count(2), "Picker");
}
