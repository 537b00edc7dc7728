use actin_readdy::{Config, ConfigError};
use approx::assert_relative_eq;

#[test]
fn toml_overrides_fill_in_defaults() {
    let config: Config = toml::from_str(
        r#"
        name = "short_run"
        internal_timestep = 0.05
        box_size = [200.0, 200.0, 200.0]
        add_membrane = false
        random_seed = 42
        "#,
    )
    .unwrap();

    assert_eq!(config.name, "short_run");
    assert_relative_eq!(config.internal_timestep, 0.05);
    assert_relative_eq!(config.box_size[1], 200.0);
    assert!(!config.add_membrane);
    assert_eq!(config.random_seed, 42);
    assert_relative_eq!(config.reaction_distance, Config::default().reaction_distance);
    assert!(config.validate().is_ok());
}

#[test]
fn json_overrides_accept_rate_names() {
    let config = Config::from_json_str(
        r#"{"barbed_growth_ATP_rate": 5.5, "n_cpu": 2}"#,
    )
    .unwrap();

    assert_eq!(config.n_cpu, 2);
    let rates = config.rates();
    let (_, rate) = rates
        .iter()
        .find(|(name, _)| *name == "barbed_growth_ATP_rate")
        .unwrap();
    assert_relative_eq!(*rate, 5.5);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(toml::from_str::<Config>("internal_time_step = 0.1").is_err());
    assert!(matches!(
        Config::from_json_str(r#"{"not_a_parameter": 1}"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn parsed_values_are_still_validated() {
    let err = Config::from_json_str(r#"{"internal_timestep": -0.1}"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive {
            name: "internal_timestep",
            ..
        }
    ));
}

#[test]
fn host_overrides_apply_as_a_json_value() {
    let overrides = serde_json::json!({
        "random_seed": 11,
        "membrane_size_y": 60.0,
        "nucleate_ATP_rate": 0.5
    });
    let config = Config::from_overrides(overrides).unwrap();

    assert_eq!(config.random_seed, 11);
    assert_relative_eq!(config.membrane_size()[1], 60.0);
    assert_relative_eq!(config.nucleate_atp_rate, 0.5);

    let written = serde_json::to_value(&config).unwrap();
    assert_eq!(written["nucleate_ATP_rate"], 0.5);
    assert_eq!(written["random_seed"], 11);
}
