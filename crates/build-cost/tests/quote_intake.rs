use build_cost::estimator::{BreakdownStage, CostTables};
use build_cost::payment::PaymentMode;
use build_cost::quote::{prepare_quote, ContingencyGuidance, QuoteError, QuoteRequest, RequiredField};
use serde_json::json;

fn request_from(value: serde_json::Value) -> QuoteRequest {
    serde_json::from_value(value).expect("request deserializes")
}

#[test]
fn json_request_produces_full_quote() {
    let request = request_from(json!({
        "contact": { "name": "Marina Souza", "email": "marina@example.com" },
        "project": {
            "region": "sp",
            "area": 150,
            "standard_tier": "high",
            "floor_count": 2,
            "house_type": "two_storey",
            "starts_on_upper_floor": true,
            "contingency_percent": 12,
            "amenities": { "garage": true, "pool": true, "barbecue_area": true }
        },
        "plan": { "mode": "financed", "installment_count": 120, "monthly_rate_percent": 0.9 }
    }));

    let quote = prepare_quote(request, &CostTables::standard()).expect("quote prepared");

    assert_eq!(quote.project.region.as_str(), "SP");
    assert_eq!(quote.payment.mode(), PaymentMode::Financed);
    assert_eq!(quote.contingency_guidance, ContingencyGuidance::Recommended);
    assert_eq!(quote.breakdown.amenities.len(), 3);
    assert!(quote
        .breakdown
        .line_items()
        .iter()
        .any(|line| line.stage == BreakdownStage::UpperFloor));

    let body = serde_json::to_value(&quote).expect("quote serializes");
    assert_eq!(body["payment"]["mode"], "financed");
    assert_eq!(body["payment"]["installment_count"], 120);
    assert_eq!(body["contingency_guidance"], "recommended");
}

#[test]
fn blank_form_is_refused_with_missing_fields() {
    let request = request_from(json!({}));
    let err = prepare_quote(request, &CostTables::standard()).expect_err("blank form refused");
    assert_eq!(
        err,
        QuoteError::Incomplete(vec![
            RequiredField::Name,
            RequiredField::Email,
            RequiredField::Region,
            RequiredField::Area,
        ])
    );
}

#[test]
fn unknown_identifiers_are_rejected_at_the_boundary() {
    let parsed = serde_json::from_value::<QuoteRequest>(json!({
        "project": { "region": "SP", "area": 90, "standard_tier": "luxury" }
    }));
    assert!(parsed.is_err());

    let parsed = serde_json::from_value::<QuoteRequest>(json!({
        "project": { "region": "SP", "area": 90, "floor_count": 7 }
    }));
    assert!(parsed.is_err());
}

#[test]
fn invalid_plan_parameters_surface_as_payment_errors() {
    let request = request_from(json!({
        "contact": { "name": "Caio", "email": "caio@example.com" },
        "project": { "region": "GO", "area": 70 },
        "plan": { "mode": "installment", "installment_count": 0 }
    }));
    let err = prepare_quote(request, &CostTables::standard()).expect_err("zero installments");
    assert!(matches!(err, QuoteError::Payment(_)));
    assert!(err.to_string().contains("installment_count"));
}
