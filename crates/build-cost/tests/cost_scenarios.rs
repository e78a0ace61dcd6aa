use std::io::Cursor;

use build_cost::estimator::{
    estimate, Amenity, AmenitySelection, CostTables, EstimateError, FloorCount, HouseType,
    ProjectParameters, RegionCostTable, StandardTier,
};
use build_cost::payment::{plan, PaymentPlan, PaymentResult};

fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-6 * expected.abs().max(1.0)
}

fn flat_rate_tables() -> CostTables {
    let regions = RegionCostTable::from_reader(Cursor::new("code,name,unit_cost\nXT,Test,2000\n"))
        .expect("test region table parses");
    CostTables::standard().with_regions(regions)
}

fn reference_project() -> ProjectParameters {
    let mut params = ProjectParameters::new("XT", 120.0);
    params.amenities = AmenitySelection::none();
    params.contingency_percent = 10.0;
    params
}

#[test]
fn reference_project_totals_match_hand_calculation() {
    let breakdown = estimate(&reference_project(), &flat_rate_tables()).expect("estimate");

    assert_eq!(breakdown.base, 240_000.0);
    assert!(approx_eq(breakdown.pre_contingency, 240_000.0));
    assert!(approx_eq(breakdown.contingency_value, 24_000.0));
    assert!(approx_eq(breakdown.total, 264_000.0));
    assert!(breakdown.amenities.is_empty());
}

#[test]
fn allocation_always_sums_to_total() {
    let tables = CostTables::standard();
    for tier in StandardTier::ordered() {
        for floors in FloorCount::ordered() {
            for house_type in HouseType::ordered() {
                let mut params = ProjectParameters::new("RS", 137.5);
                params.standard_tier = tier;
                params.floor_count = floors;
                params.house_type = house_type;
                params.starts_on_upper_floor = floors != FloorCount::One;
                params.amenities = AmenitySelection::none().with(Amenity::Pool, true);
                params.contingency_percent = 12.0;

                let breakdown = estimate(&params, &tables).expect("estimate");
                assert!(
                    approx_eq(breakdown.allocation.sum(), breakdown.total),
                    "allocation {} vs total {}",
                    breakdown.allocation.sum(),
                    breakdown.total
                );
            }
        }
    }
}

#[test]
fn allocation_reserve_is_independent_of_contingency_value() {
    let mut params = reference_project();
    params.contingency_percent = 0.0;
    let breakdown = estimate(&params, &flat_rate_tables()).expect("estimate");

    assert_eq!(breakdown.contingency_value, 0.0);
    assert!(approx_eq(
        breakdown.allocation.contingency_reserve,
        breakdown.total * 0.10
    ));
    assert!(breakdown.allocation.contingency_reserve > 0.0);
}

#[test]
fn total_never_decreases_as_area_grows() {
    let tables = CostTables::standard();
    let mut previous = 0.0;
    for area in [1.0, 10.0, 55.5, 120.0, 400.0, 1_250.0] {
        let mut params = ProjectParameters::new("BA", area);
        params.amenities = AmenitySelection::default().with(Amenity::BarbecueArea, true);
        let breakdown = estimate(&params, &tables).expect("estimate");
        assert!(breakdown.total >= previous);
        previous = breakdown.total;
    }
}

#[test]
fn estimates_are_repeatable() {
    let tables = CostTables::standard();
    let mut params = ProjectParameters::new("SC", 212.3);
    params.standard_tier = StandardTier::High;
    params.amenities = AmenitySelection::none()
        .with(Amenity::LeisureArea, true)
        .with(Amenity::SecuritySystem, true);

    let first = estimate(&params, &tables).expect("estimate");
    let second = estimate(&params, &tables).expect("estimate");
    assert_eq!(first.total.to_bits(), second.total.to_bits());
    assert_eq!(first, second);
}

#[test]
fn invalid_inputs_fail_fast() {
    let tables = CostTables::standard();

    let unknown_region = ProjectParameters::new("QQ", 100.0);
    let err = estimate(&unknown_region, &tables).expect_err("unknown region");
    assert!(matches!(
        err,
        EstimateError::InvalidParameter {
            field: "region",
            ..
        }
    ));

    let negative_area = ProjectParameters::new("SP", -4.0);
    assert!(matches!(
        estimate(&negative_area, &tables),
        Err(EstimateError::InvalidParameter { field: "area", .. })
    ));
}

#[test]
fn reference_total_through_every_plan() {
    let total = estimate(&reference_project(), &flat_rate_tables())
        .expect("estimate")
        .total;

    let PaymentResult::Cash(cash) = plan(total, &PaymentPlan::Cash).expect("cash") else {
        panic!("expected cash result");
    };
    assert!(approx_eq(cash.discount, 13_200.0));
    assert!(approx_eq(cash.final_value, 250_800.0));
    assert!(approx_eq(cash.discount + cash.final_value, total));

    let installment = PaymentPlan::Installment {
        down_payment_percent: Some(30.0),
        installment_count: Some(12),
    };
    let PaymentResult::Installment(split) = plan(total, &installment).expect("installment")
    else {
        panic!("expected installment result");
    };
    assert!(approx_eq(split.down_payment, 79_200.0));
    assert!(approx_eq(split.remaining, 184_800.0));
    assert!(approx_eq(split.installment_value, 15_400.0));
    assert!(approx_eq(split.down_payment + split.remaining, total));

    let PaymentResult::Financed(loan) = plan(total, &PaymentPlan::financed()).expect("financed")
    else {
        panic!("expected financed result");
    };
    let rate: f64 = 0.015;
    let growth = (1.0 + rate).powi(12);
    let expected = loan.financed_amount * (rate * growth) / (growth - 1.0);
    assert!(approx_eq(loan.financed_amount, 184_800.0));
    assert!(approx_eq(loan.installment_value, expected));
    assert!((loan.installment_value - 16_942.46).abs() < 0.01);
    assert!(approx_eq(
        loan.total_paid,
        loan.down_payment + loan.installment_value * 12.0
    ));
    assert!(approx_eq(loan.total_interest, loan.total_paid - total));
}
