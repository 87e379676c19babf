use chrono::{DateTime, Local, Utc};
use lootspin_core::{
    classify_item, interpret_body, Rarity, RawItem, SpinOutcome, UNKNOWN_ITEM_NAME,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn raw(value: serde_json::Value) -> RawItem {
    RawItem::from_value(value)
}

#[test]
fn rarity_truth_table() {
    let cases = [
        (json!({ "highlight": false }), Rarity::Common),
        (json!({ "highlight": false, "highlightRare": true }), Rarity::Common),
        (json!({ "highlight": true, "highlightRare": false }), Rarity::Rare),
        (json!({ "highlight": true }), Rarity::Rare),
        (json!({ "highlight": true, "highlightRare": true }), Rarity::Legendary),
    ];
    for (input, expected) in cases {
        assert_eq!(classify_item(&raw(input.clone())).rarity, expected, "{input}");
    }
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let item = classify_item(&raw(json!({})));
    assert_eq!(item.index, None);
    assert_eq!(item.name, UNKNOWN_ITEM_NAME);
    assert_eq!(item.price, 0.0);
    assert_eq!(item.quick_sell_price, 0.0);
    assert_eq!(item.rarity, Rarity::Common);
    assert!(!item.sold);
    assert_eq!(item.sale_label(), "Kept");
    assert_eq!(item.display_timestamp(), "Invalid Date");
}

#[test]
fn name_prefers_prize_then_loot_name() {
    let prize = classify_item(&raw(json!({ "prize": { "name": "Sword" }, "lootName": "Box" })));
    assert_eq!(prize.name, "Sword");

    let loot = classify_item(&raw(json!({ "prize": { "name": "" }, "lootName": "Box" })));
    assert_eq!(loot.name, "Box");
}

#[test]
fn full_record_is_normalized() {
    let item = classify_item(&raw(json!({
        "index": 3,
        "prize": { "name": "Gem", "price": 12.5 },
        "quickSellPrice": 4,
        "highlight": true,
        "highlightRare": true,
        "sold": true,
        "timestamp": "2024-01-02T03:04:05Z"
    })));

    assert_eq!(item.index, Some(3));
    assert_eq!(item.name, "Gem");
    assert_eq!(item.price, 12.5);
    assert_eq!(item.quick_sell_price, 4.0);
    assert_eq!(item.rarity, Rarity::Legendary);
    assert_eq!(item.sale_label(), "Auto-sold");
    let utc: DateTime<Utc> = "2024-01-02T03:04:05Z".parse().unwrap();
    assert_eq!(item.timestamp, Some(utc));
    let local = utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
    assert_eq!(item.display_timestamp(), local);
}

#[test]
fn malformed_fields_never_fail() {
    let item = classify_item(&raw(json!({
        "index": "first",
        "prize": "not an object",
        "quickSellPrice": { "value": 1 },
        "timestamp": [1, 2]
    })));
    assert_eq!(item.index, None);
    assert_eq!(item.name, UNKNOWN_ITEM_NAME);
    assert_eq!(item.quick_sell_price, 0.0);
    assert_eq!(item.timestamp, None);

    let scalar = classify_item(&raw(json!(42)));
    assert_eq!(scalar.name, UNKNOWN_ITEM_NAME);
}

#[test]
fn classification_is_idempotent() {
    let input = raw(json!({
        "prize": { "name": "Orb", "price": 2 },
        "highlight": true,
        "timestamp": 1
    }));
    assert_eq!(classify_item(&input), classify_item(&input));
}

#[test]
fn array_body_is_success_even_when_empty() {
    assert_eq!(interpret_body(&json!([])), SpinOutcome::Success { items: Vec::new() });

    match interpret_body(&json!([{ "lootName": "A" }, { "lootName": "B" }])) {
        SpinOutcome::Success { items } => {
            let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["A", "B"]);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn non_array_body_is_failure_with_message() {
    assert_eq!(
        interpret_body(&json!({ "message": "Box sold out" })),
        SpinOutcome::failure("Box sold out")
    );
    assert_eq!(
        interpret_body(&json!({ "error": true })),
        SpinOutcome::failure("Unknown error format")
    );
    assert_eq!(
        interpret_body(&json!("plain text")),
        SpinOutcome::failure("Unknown error format")
    );
}
