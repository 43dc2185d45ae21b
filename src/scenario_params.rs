use pyramidal::params::SimulationParams;

pub fn get_scenario_params() -> SimulationParams {
    let params_yaml_str = r#"
membrane:
  g_k: 5.0
  g_l: 0.05
  g_m: 0.07
  e_na: 50.0
  e_k: -90.0
  e_l: -70.0
  c_m: 1.0
  i_ext: 14.0
  v_init: -65.0
  v_threshold: -20.0
  v_reset: -65.0
  t_refractory: 2.0
  t_settle: 1.0
  dt: 0.01
conductances:
  g_na: 50.0
  g_na_p: 0.15
"#;

    serde_yaml::from_str(params_yaml_str).unwrap()
}
