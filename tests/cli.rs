//! E2E tests for the calculate, compare, gst, regimes and schema commands

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn itax(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_itax"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn json_of(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Decimals serialize as strings
fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("decimal should be a string")
        .parse()
        .expect("valid decimal")
}

/// Test the quick estimate table output
#[test]
fn calculate_quick_estimate() {
    let output = itax(&["calculate", "--salary", "800000"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("INCOME TAX (New Regime (2023), FY 2024-25)"));
    assert!(stdout.contains("Taxable income"));
    assert!(stdout.contains("₹7,47,600"));
    assert!(stdout.contains("₹30,950"));
    assert!(stdout.contains("3.87%"));
}

/// Test JSON output from an input file
#[test]
fn calculate_json_output() {
    let output = itax(&["calculate", "-i", "tests/data/salary_800000.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let result = json_of(&output);
    assert_eq!(result["regime"], "NEW");
    assert_eq!(result["financialYear"], "2024-25");
    assert_eq!(decimal(&result["taxableIncome"]), dec!(747600));
    assert_eq!(decimal(&result["slabTax"]), dec!(29760));
    assert_eq!(decimal(&result["totalTax"]), dec!(30950));
    assert_eq!(decimal(&result["effectiveRate"]), dec!(3.87));
}

/// Test that --regime overrides the regime named in the declaration
#[test]
fn calculate_regime_override() {
    let output = itax(&[
        "calculate",
        "-i",
        "tests/data/salary_800000.json",
        "--regime",
        "old",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let result = json_of(&output);
    assert_eq!(result["regime"], "OLD");
    assert_eq!(decimal(&result["totalTax"]), dec!(64501));
}

/// Test a batch of declarations produces one CSV row each
#[test]
fn calculate_batch_csv() {
    let output = itax(&["calculate", "-i", "tests/data/batch.json", "--csv"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("regime,financial_year,gross_income"));
    assert!(lines[0].contains("total_tax"));
    assert!(lines[1].starts_with("NEW,2024-25,"));
    assert!(lines[2].starts_with("OLD,2024-25,"));
}

/// Test declarations piped through stdin
#[test]
fn calculate_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_itax"))
        .args(["calculate", "-i", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"{ "salary": 700000 }"#)
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let result = json_of(&output);
    // fully rebated
    assert_eq!(decimal(&result["rebate"]), dec!(19760));
    assert_eq!(decimal(&result["totalTax"]), Decimal::ZERO);
}

/// Test the comparison table and recommendation
#[test]
fn compare_text_output() {
    let output = itax(&["compare", "-i", "tests/data/salary_800000.json"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("REGIME COMPARISON (FY 2024-25)"));
    assert!(stdout.contains("Old Regime"));
    assert!(stdout.contains("New Regime"));
    assert!(stdout.contains("₹64,501"));
    assert!(stdout.contains("₹30,950"));
    assert!(stdout.contains("RECOMMENDATION: New Regime saves ₹33,551"));
}

/// Test comparison JSON output
#[test]
fn compare_json_output() {
    let output = itax(&["compare", "--salary", "800000", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let comparison = json_of(&output);
    assert_eq!(comparison["recommendation"], "NEW");
    assert_eq!(decimal(&comparison["savings"]), dec!(33551));
    assert_eq!(decimal(&comparison["old"]["totalTax"]), dec!(64501));
    assert_eq!(decimal(&comparison["new"]["totalTax"]), dec!(30950));
}

/// Test batch comparison CSV picks the cheaper regime per declaration
#[test]
fn compare_batch_csv() {
    let output = itax(&["compare", "-i", "tests/data/batch.json", "--csv"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("recommendation"));
    assert!(lines[0].ends_with("savings"));
    assert!(lines[1].contains(",NEW,"));
    // heavy deductions favour the old regime
    assert!(lines[2].contains(",OLD,"));
}

/// Test an unknown regime name is rejected
#[test]
fn invalid_regime_fails() {
    let output = itax(&["calculate", "-i", "tests/data/invalid_regime.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("FLAT"), "stderr: {}", stderr);
}

/// Test a negative amount is reported with the offending declaration
#[test]
fn negative_amount_fails() {
    let output = itax(&["compare", "-i", "tests/data/negative_rent.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("declaration #2"), "stderr: {}", stderr);
    assert!(stderr.contains("rentPaid must not be negative"), "stderr: {}", stderr);
}

/// Test an amount beyond the supported ceiling fails instead of overflowing
#[test]
fn oversized_amount_fails() {
    let output = itax(&["compare", "--salary", "50000000000000000000000000000"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("salary is too large"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

/// Test a year without configured regimes fails
#[test]
fn unconfigured_year_fails() {
    let output = itax(&["calculate", "--salary", "800000", "--year", "2019-20"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no NEW regime configured for financial year 2019-20"));
}

/// Test a regimes file adds a new financial year
#[test]
fn calculate_with_regimes_file() {
    let output = itax(&[
        "calculate",
        "--salary",
        "1277400",
        "--year",
        "2025-26",
        "--regimes",
        "tests/data/regimes_2025_26.json",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let result = json_of(&output);
    assert_eq!(result["regimeLabel"], "New Regime (2025)");
    assert_eq!(decimal(&result["taxableIncome"]), dec!(1200000));
    assert_eq!(decimal(&result["slabTax"]), dec!(60000));
    assert_eq!(decimal(&result["rebate"]), dec!(60000));
    assert_eq!(decimal(&result["totalTax"]), Decimal::ZERO);
}

/// Test the financial year can be derived from a date
#[test]
fn calculate_on_date() {
    let output = itax(&[
        "calculate",
        "--salary",
        "800000",
        "--on",
        "2025-05-01",
        "--regimes",
        "tests/data/regimes_2025_26.json",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(json_of(&output)["financialYear"], "2025-26");
}

/// Test the regimes command validates built-in and file definitions
#[test]
fn regimes_listing() {
    let output = itax(&["regimes"]);
    let stdout = stdout_of(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("OLD REGIME (FY 2024-25)"));
    assert!(stdout.contains("Senior citizen slabs (60+)"));
    assert!(stdout.contains("2 regime definitions valid"));

    let output = itax(&[
        "regimes",
        "--regimes",
        "tests/data/regimes_2025_26.json",
        "--year",
        "2025-26",
    ]);
    let stdout = stdout_of(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("NEW REGIME (2025) (FY 2025-26)"));
    assert!(stdout.contains("1 regime definitions valid"));
}

/// Test an invalid regimes file is rejected with the reason
#[test]
fn regimes_invalid_file() {
    let output = itax(&["regimes", "--regimes", "tests/data/regimes_invalid.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("regimes_invalid.json"), "stderr: {}", stderr);
    assert!(stderr.contains("must be unbounded"), "stderr: {}", stderr);
}

/// Test the regimes JSON dump can be read back as a regimes file
#[test]
fn regimes_json_output() {
    let output = itax(&["regimes", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let config = json_of(&output);
    let regimes = config["regimes"].as_array().expect("regimes array");
    assert_eq!(regimes.len(), 2);
    assert_eq!(regimes[0]["regime"], "OLD");
    assert_eq!(regimes[1]["rebate87A"]["maxIncome"], "700000");
}

/// Test GST calculation by category
#[test]
fn gst_calculate_by_category() {
    let output = itax(&["gst", "calculate", "--amount", "1000", "--category", "luxury", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let gst = json_of(&output);
    assert_eq!(gst["category"], "luxury");
    assert_eq!(decimal(&gst["gstRate"]), dec!(28));
    assert_eq!(decimal(&gst["cgst"]), dec!(140));
    assert_eq!(decimal(&gst["sgst"]), dec!(140));
    assert_eq!(decimal(&gst["total"]), dec!(1280));
}

/// Test GST calculation table with the default rate
#[test]
fn gst_calculate_default_rate() {
    let output = itax(&["gst", "calculate", "--amount", "2500"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("CGST @ 9%"));
    assert!(stdout.contains("₹225.00"));
    assert!(stdout.contains("₹2950.00"));
}

/// Test an out of range GST rate is rejected
#[test]
fn gst_rate_out_of_range_fails() {
    let output = itax(&["gst", "calculate", "--amount", "100", "--rate", "40"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid GST rate 40%"));
}

/// Test an unknown GST category is rejected when parsing arguments
#[test]
fn gst_unknown_category_fails() {
    let output = itax(&["gst", "calculate", "--amount", "100", "--category", "premium"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unknown GST category"), "stderr: {}", stderr);
}

/// Test a GST amount beyond the supported ceiling fails
#[test]
fn gst_oversized_amount_fails() {
    let output = itax(&[
        "gst",
        "calculate",
        "--amount",
        "70000000000000000000000000000",
        "--rate",
        "28",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("amount is too large"), "stderr: {}", stderr);
}

/// Test GST item search
#[test]
fn gst_search() {
    let output = itax(&["gst", "search", "tea"]);
    let stdout = stdout_of(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Tea"));
    assert!(stdout.contains("5%"));

    let output = itax(&["gst", "search", "spaceship"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout_of(&output).contains("No GST rates found for 'spaceship'"));
}

/// Test a GST schedule file replaces the built-in rates
#[test]
fn gst_rates_from_schedule() {
    let output = itax(&["gst", "rates", "--schedule", "tests/data/gst_schedule.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    // inactive entries are hidden
    let rates = json_of(&output);
    let rates = rates.as_array().expect("rates array");
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0]["category"], "sin");
    assert_eq!(rates[0]["items"][0], "Pan masala");
}

/// Test schema output for each input document
#[test]
fn schema_output() {
    let output = itax(&["schema"]);
    let stdout = stdout_of(&output);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("IncomeDeclaration"));
    assert!(stdout.contains("section80C"));
    assert!(stdout.contains("houseRentAllowance"));

    let output = itax(&["schema", "regimes"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout_of(&output).contains("rebate87A"));

    let output = itax(&["schema", "gst"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout_of(&output).contains("GstRateEntry"));
}
