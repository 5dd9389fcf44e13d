use beverage_pricer::schema::{column_index, FEATURE_COUNT};
use beverage_pricer::{
    encode, predictor, LinearWeights, PriceRange, PricerConfig, PricerError, Predictor,
    SurveyResponse,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Four classes driven only by `zas_score`: low interaction favours the
/// cheapest band, high interaction the most expensive.
fn zas_driven_artifact() -> NamedTempFile {
    let zas = column_index("zas_score").unwrap();
    let slopes = [-1.0, 0.0, 0.5, 1.0];
    let coefficients = slopes
        .iter()
        .map(|slope| {
            let mut row = vec![0.0; FEATURE_COUNT];
            row[zas] = *slope;
            row
        })
        .collect();
    let weights = LinearWeights {
        labels: vec![0, 1, 2, 3],
        intercepts: vec![6.0, 2.0, -1.0, -5.0],
        coefficients,
        feature_names: None,
    };

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(serde_json::to_string(&weights).unwrap().as_bytes())
        .unwrap();
    file
}

fn reference_response() -> SurveyResponse {
    SurveyResponse::from_json(
        r#"{
            "age": 25,
            "gender": "Male",
            "zone": "Urban",
            "occupation": "Student",
            "income_levels": "<10L",
            "consume_frequency(weekly)": "0-2 times",
            "health_concerns": "Low (Not very concerned)",
            "preferable_consumption_size": "Small",
            "awareness_of_other_brands": "0 to 1",
            "current_brand": "Newcomer",
            "reasons_for_choosing_brands": "Price",
            "flavor_preference": "Traditional",
            "purchase_channel": "Online",
            "packaging_preference": "Simple",
            "typical_consumption_situations": "Casual (eg. At home)"
        }"#,
    )
    .unwrap()
}

fn config_for(artifact: &NamedTempFile) -> PricerConfig {
    PricerConfig {
        model_path: artifact.path().to_path_buf(),
        ..PricerConfig::default()
    }
}

#[test]
fn reference_profile_predicts_cheapest_band() {
    let artifact = zas_driven_artifact();
    let predictor = Predictor::load(&config_for(&artifact)).unwrap();

    let features = encode(&reference_response()).unwrap();
    assert_eq!(features.get("zas_score"), Some(3.0));

    let range = predictor.predict(&reference_response()).unwrap();
    assert_eq!(range, PriceRange::From50To100);
    assert_eq!(range.label(), "₹50 - ₹100");
}

#[test]
fn metro_top_income_predicts_top_band() {
    let artifact = zas_driven_artifact();
    let predictor = Predictor::load(&config_for(&artifact)).unwrap();

    let mut response = reference_response();
    response.zone = "Metro".into();
    response.income_levels = "> 35L".into();

    let range = predictor.predict(&response).unwrap();
    assert_eq!(range.to_string(), "₹200 - ₹250");
}

#[test]
fn predictions_are_repeatable() {
    let artifact = zas_driven_artifact();
    let predictor = Predictor::load(&config_for(&artifact)).unwrap();
    let response = reference_response();

    let first = predictor.predict(&response).unwrap();
    for _ in 0..10 {
        assert_eq!(predictor.predict(&response).unwrap(), first);
    }
}

#[test]
fn artifact_with_extra_class_surfaces_unknown_class() {
    let mut row = vec![0.0; FEATURE_COUNT];
    row[column_index("gender_M").unwrap()] = 10.0;
    let weights = LinearWeights {
        labels: vec![0, 7],
        intercepts: vec![0.0, 0.0],
        coefficients: vec![vec![0.0; FEATURE_COUNT], row],
        feature_names: None,
    };
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(serde_json::to_string(&weights).unwrap().as_bytes())
        .unwrap();

    let predictor = Predictor::load(&config_for(&file)).unwrap();
    let err = predictor.predict(&reference_response()).unwrap_err();
    assert!(matches!(err, PricerError::UnknownClass { class_id: 7 }));
}

#[test]
fn global_predictor_loads_once() {
    assert!(matches!(
        predictor::predict(&reference_response()),
        Err(PricerError::NotInitialized)
    ));

    let missing = PricerConfig {
        model_path: "/nonexistent/model_data.onnx".into(),
        ..PricerConfig::default()
    };
    assert!(matches!(
        predictor::init(&missing),
        Err(PricerError::ModelLoad { .. })
    ));
    assert!(predictor::global().is_err());

    let artifact = zas_driven_artifact();
    let config = config_for(&artifact);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || {
                predictor::init(&config).unwrap() as *const Predictor as usize
            })
        })
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));

    // Already loaded: the configured path is not consulted again.
    let reused = predictor::init(&missing).unwrap() as *const Predictor as usize;
    assert_eq!(reused, addresses[0]);

    let range = predictor::predict(&reference_response()).unwrap();
    assert_eq!(range, PriceRange::From50To100);
}
