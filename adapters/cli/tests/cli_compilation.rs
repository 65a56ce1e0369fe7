use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "seafarer"])
        .status()
        .expect("failed to invoke cargo check for the seafarer binary");

    assert!(status.success(), "cargo check --bin seafarer should succeed");
}
