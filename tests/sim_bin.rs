use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "1", "2"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    assert_eq!(v["agent1"]["field"]["lives"].as_array().map(Vec::len), Some(4));
    let states = [v["agent1"]["state"].as_str(), v["agent2"]["state"].as_str()];
    assert!(states.contains(&Some("Won")) && states.contains(&Some("Lost")));
}
