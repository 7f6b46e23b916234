use roi_engine::{
    analyze, compute, compute_all, resolve_cost, validate, Field, ParameterSet, Scenario,
    ValidationOutcome,
};
use serde_json::{json, Map, Value};

fn form_record() -> Map<String, Value> {
    // Values as a browser form would submit them.
    let value = json!({
        "headcount": "100",
        "dse_user_percentage": "60",
        "admin_salary": "50000",
        "admin_on_cost_percentage": "30",
        "admin_time_now": "2",
        "admin_time_with_software": "1",
        "baseline_absence_rate": "5",
        "work_days_per_year": "220",
        "absence_due_to_msd_percentage": "30",
        "cost_per_absence_day": "300",
        "msd_prevalence": "25",
        "reduction_in_msd_absence": "15",
        "reduction_in_clinical_interventions": "25",
        "cost_per_clinical_intervention": "600",
        "msd_needing_intervention_percentage": "20",
        "currency": "GBP",
        "company_name": "ignored"
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn within(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= expected.abs() * tolerance
}

#[test]
fn form_input_flows_through_validation_and_scenarios() {
    let params = match validate(&form_record()) {
        ValidationOutcome::Valid(params) => params,
        ValidationOutcome::Invalid(errors) => panic!("unexpected errors: {errors:?}"),
    };
    assert_eq!(params, ParameterSet::default());

    let triple = compute_all(&params);
    let expected = &triple.expected;
    assert!(within(expected.admin_saving, 13_000.0, 0.05));
    assert!(within(expected.absence_saving, 8_910.0, 0.05));
    assert!(within(expected.intervention_saving, 450.0, 0.05));
    assert_eq!(expected.licence_cost, resolve_cost(100).annual_price);

    assert!(triple.conservative.roi_percentage <= expected.roi_percentage);
    assert!(expected.roi_percentage <= triple.stretch.roi_percentage);
    assert_eq!(*expected, compute(&params, Scenario::Expected));
}

#[test]
fn default_sweep_centres_on_expected_result() {
    let params = ParameterSet::default();
    let expected = compute(&params, Scenario::Expected);
    let curves = analyze(&params, None, None);
    assert_eq!(curves.len(), 5);
    for curve in curves {
        assert_eq!(curve.points.len(), 7);
        assert_eq!(curve.points[3].variation, 0.0);
        assert_eq!(curve.points[3].net_benefit, expected.net_benefit);
    }

    let only_headcount = analyze(&params, Some(&[Field::Headcount][..]), Some(&[-50.0, 50.0][..]));
    assert_eq!(only_headcount.len(), 1);
    assert_eq!(only_headcount[0].points[0].value, 50.0);
    assert_eq!(only_headcount[0].points[1].value, 150.0);
}

#[test]
fn results_serialise_for_the_presentation_layer() {
    let result = compute(&ParameterSet::default(), Scenario::Stretch);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["scenario"], "stretch");
    assert_eq!(json["is_valid"], true);
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(14));
    assert_eq!(json["steps"][0]["unit"], "multiplier");
}
