#![cfg(feature = "serde")]

use swarmopt::{
    benchmarks, optimize,
    optimization::OptimizationOptions,
    strategy::{AlgorithmParameters, ParameterValue},
    OptimizationResult,
};

#[test]
fn test_result_fields_by_name() {
    let result = optimize(
        "GWO",
        benchmarks::sphere,
        vec![(-5.0, 5.0), (-5.0, 5.0)],
        10,
        10,
        3,
        Vec::<(&str, ParameterValue)>::new(),
    )
    .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["best_position"].as_array().unwrap().len(), 2);
    assert_eq!(object["best_value"].as_f64().unwrap(), result.best_value);
    assert!(object["time"].as_f64().unwrap() >= 0.0);

    let back: OptimizationResult = serde_json::from_value(json).unwrap();
    assert_eq!(back.best_position.len(), 2);
}

#[test]
fn test_parameters_from_json() {
    let params: AlgorithmParameters =
        serde_json::from_str(r#"{"Abc": {"limit": 10, "forager_size": null}}"#).unwrap();
    assert!(params.validate(100, 2).is_ok());

    let named: Vec<(String, ParameterValue)> =
        serde_json::from_str(r#"[["visual", [0.5, 4.0]], ["maxTries", 3]]"#).unwrap();
    assert_eq!(named[0].1, ParameterValue::Vector(vec![0.5, 4.0]));
    assert_eq!(named[1].1, ParameterValue::Scalar(3.0));
    let params = AlgorithmParameters::from_named(swarmopt::AlgorithmKind::FishSwarm, named).unwrap();
    assert!(params.validate(10, 2).is_ok());
}

#[test]
fn test_options_round_trip() {
    let options = OptimizationOptions::builder().seed(5).population_size(7).build();
    let json = serde_json::to_string(&options).unwrap();
    let back: OptimizationOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);
}
