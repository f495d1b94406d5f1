use assert_cmd::Command;

#[test]
fn types_demo_prints_type_and_value() {
    let mut cmd = Command::cargo_bin("types_demo").expect("binary exists");
    cmd.assert()
        .success()
        .stdout("bool(false)\nu64(18446744073709551615)\nComplex((2+3i))\n");
}
