use serde_json::Value;

pub fn assert_card_response(card: &Value, expected_front: &str, expected_back: &str) {
    assert!(card.get("id").and_then(|v| v.as_str()).is_some(), "Missing id");
    assert_eq!(
        card.get("front_text").and_then(|v| v.as_str()),
        Some(expected_front)
    );
    assert_eq!(
        card.get("back_text").and_then(|v| v.as_str()),
        Some(expected_back)
    );
    assert!(card.get("created_at").is_some(), "Missing created_at");
    assert!(card.get("user_id").is_none(), "Owner id must not be exposed");
}

pub fn back_texts(cards: &Value) -> Vec<String> {
    cards
        .as_array()
        .expect("Expected a JSON array of cards")
        .iter()
        .map(|c| c["back_text"].as_str().unwrap_or_default().to_string())
        .collect()
}
