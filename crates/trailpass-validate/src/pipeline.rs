//! Pipeline evaluation — first failing rule wins.

use serde_json::Value;

use crate::rules::Rule;

/// Evaluate `rules` in declaration order against a decoded JSON body.
/// Stops at the first failure and returns that rule's message; later rules
/// are not evaluated. A body that is not a JSON object fails its first
/// rule (every field lookup misses).
pub fn validate(rules: &[Rule], input: &Value) -> Result<(), String> {
    for rule in rules {
        if let Some(message) = rule.evaluate(input) {
            return Err(message);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::INVALID_VALUE;
    use serde_json::json;

    fn check_in_rules() -> Vec<Rule> {
        vec![
            Rule::required("walletAddress", "Wallet address is required"),
            Rule::required("trailId", "Trail ID is required"),
            Rule::required("trailName", "Trail name is required"),
            Rule::one_of(
                "difficulty",
                &["Beginner", "Intermediate", "Expert", "Extreme"],
                "Invalid difficulty level",
            ),
        ]
    }

    #[test]
    fn test_all_pass() {
        let input = json!({
            "walletAddress": "addr_test_abc",
            "trailId": "3",
            "trailName": "Black Diamond",
            "difficulty": "Expert",
        });
        assert!(validate(&check_in_rules(), &input).is_ok());
    }

    #[test]
    fn test_short_circuit_reports_first_failure() {
        // Fails both walletAddress and trailId; only the first is reported.
        let input = json!({ "trailName": "Black Diamond", "difficulty": "Expert" });
        assert_eq!(
            validate(&check_in_rules(), &input),
            Err("Wallet address is required".to_string())
        );
    }

    #[test]
    fn test_absent_field_fails_required() {
        let input = json!({});
        assert_eq!(
            validate(&check_in_rules(), &input),
            Err("Wallet address is required".to_string())
        );
    }

    #[test]
    fn test_empty_string_fails_required() {
        let input = json!({ "walletAddress": "   " });
        assert_eq!(
            validate(&check_in_rules(), &input),
            Err("Wallet address is required".to_string())
        );
    }

    #[test]
    fn test_enum_membership() {
        let mut input = json!({
            "walletAddress": "w1",
            "trailId": "1",
            "trailName": "Bunny Slope",
            "difficulty": "Insane",
        });
        assert_eq!(
            validate(&check_in_rules(), &input),
            Err("Invalid difficulty level".to_string())
        );

        input["difficulty"] = json!("Beginner");
        assert!(validate(&check_in_rules(), &input).is_ok());
    }

    #[test]
    fn test_non_string_enum_value_is_generic_failure() {
        let input = json!({
            "walletAddress": "w1",
            "trailId": "1",
            "trailName": "Bunny Slope",
            "difficulty": 3,
        });
        assert_eq!(
            validate(&check_in_rules(), &input),
            Err(INVALID_VALUE.to_string())
        );
    }

    #[test]
    fn test_non_object_body_fails_first_rule() {
        assert_eq!(
            validate(&check_in_rules(), &json!("not an object")),
            Err("Wallet address is required".to_string())
        );
    }

    #[test]
    fn test_email_and_password_rules() {
        let rules = vec![
            Rule::required("name", "Name is required"),
            Rule::email("email", "Invalid email"),
            Rule::min_len("password", 6, "Password must contain at least 6 characters"),
            Rule::matches("password", r"\d", "Password must contain a number"),
        ];

        let ok = json!({ "name": "Ana", "email": "ana@example.com", "password": "pow2der" });
        assert!(validate(&rules, &ok).is_ok());

        let bad_email = json!({ "name": "Ana", "email": "not-an-email", "password": "pow2der" });
        assert_eq!(validate(&rules, &bad_email), Err("Invalid email".to_string()));

        let short = json!({ "name": "Ana", "email": "ana@example.com", "password": "p2" });
        assert_eq!(
            validate(&rules, &short),
            Err("Password must contain at least 6 characters".to_string())
        );

        let no_digit = json!({ "name": "Ana", "email": "ana@example.com", "password": "powder" });
        assert_eq!(
            validate(&rules, &no_digit),
            Err("Password must contain a number".to_string())
        );
    }

    #[test]
    fn test_missing_email_reports_rule_message() {
        let rules = vec![Rule::email("email", "Invalid email")];
        assert_eq!(
            validate(&rules, &json!({})),
            Err("Invalid email".to_string())
        );
    }
}
