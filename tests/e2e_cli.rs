mod support;

use tempfile::tempdir;

use support::{describe, refused_url, run_volley, run_volley_with_log, spawn_http_server_or_skip};

#[test]
fn e2e_reports_all_requests_as_ok() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip("200 OK")? else {
        return Ok(());
    };

    let output = run_volley(["--url", url.as_str(), "--requests", "100", "--concurrency", "10"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = [
        format!("Starting load test against {}", url),
        "Concurrency: 10".to_owned(),
        "Total requests: 100".to_owned(),
        "Success (2xx):".to_owned(),
        "  HTTP 200 (OK - Request succeeded): 100 requests".to_owned(),
    ];
    for line in &expected {
        if !stdout.lines().any(|candidate| candidate == line) {
            return Err(format!("Missing '{}'\n{}", line, describe(&output)));
        }
    }
    if stdout.contains("Failed requests") {
        return Err(format!("Unexpected failure line\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_not_found_is_counted_as_status() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip("404 Not Found")? else {
        return Ok(());
    };

    let output = run_volley(["-u", url.as_str(), "-n", "7", "-c", "3"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Client Error (4xx):") {
        return Err(format!("Missing 4xx category\n{}", describe(&output)));
    }
    if !stdout.contains("HTTP 404 (Not Found - Resource not found): 7 requests") {
        return Err(format!("Missing 404 count\n{}", describe(&output)));
    }
    if stdout.contains("Failed requests") {
        return Err(format!("404 must not count as failure\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_json_output() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip("200 OK")? else {
        return Ok(());
    };

    let output = run_volley([
        "-u",
        url.as_str(),
        "-n",
        "20",
        "-c",
        "6",
        "--output-format",
        "json",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid json: {}\n{}", err, describe(&output)))?;
    if value.get("completed_requests").and_then(serde_json::Value::as_u64) != Some(20) {
        return Err(format!("Unexpected completed count\n{}", describe(&output)));
    }
    if value.get("errors").and_then(serde_json::Value::as_u64) != Some(0) {
        return Err(format!("Unexpected errors\n{}", describe(&output)));
    }
    let first = value
        .get("status_codes")
        .and_then(serde_json::Value::as_array)
        .and_then(|codes| codes.first())
        .ok_or_else(|| format!("Missing status codes\n{}", describe(&output)))?;
    if first.get("code").and_then(serde_json::Value::as_u64) != Some(200)
        || first.get("count").and_then(serde_json::Value::as_u64) != Some(20)
    {
        return Err(format!("Unexpected status entry\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_unreachable_host_counts_failures() -> Result<(), String> {
    let url = refused_url()?;

    let output = run_volley(["-u", url.as_str(), "-n", "5", "-c", "2"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Failed requests: 5") {
        return Err(format!("Expected 5 failures\n{}", describe(&output)));
    }
    if stdout.contains("HTTP 0") {
        return Err(format!("Failures must not be listed as a status\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_concurrency_above_requests_is_fatal() -> Result<(), String> {
    let output = run_volley(["-u", "http://127.0.0.1:9", "-n", "10", "-c", "20"])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    if !output.stdout.is_empty() {
        return Err(format!("No report expected on fatal error\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_missing_url_is_fatal() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("volley.toml");
    std::fs::write(&config_path, "requests = 3\n").map_err(|err| format!("write failed: {}", err))?;

    let config_arg = config_path.to_string_lossy().into_owned();
    let output = run_volley(["--config", config_arg.as_str()])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    if !output.stdout.is_empty() {
        return Err(format!("No report expected on fatal error\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_zero_requests_is_fatal() -> Result<(), String> {
    let output = run_volley(["-u", "http://127.0.0.1:9", "-n", "0"])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_run_parameters() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip("201 Created")? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.toml");
    let content = format!("url = \"{}\"\nrequests = 9\nconcurrency = 4\n", url);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config_arg = path.to_string_lossy().into_owned();
    let output = run_volley(["--config", config_arg.as_str()])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Concurrency: 4") {
        return Err(format!("Expected concurrency from config\n{}", describe(&output)));
    }
    if !stdout.contains("HTTP 201 (Created - Resource created): 9 requests") {
        return Err(format!("Expected 9 created responses\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_logs_chosen_config_file() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip("200 OK")? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.toml");
    let content = format!("url = \"{}\"\nrequests = 2\n", url);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config_arg = path.to_string_lossy().into_owned();
    let output = run_volley_with_log(["--config", config_arg.as_str(), "--no-color"], "debug")?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let expected = format!("Using config file {}", path.display());
    if !stderr.contains(&expected) {
        return Err(format!("Expected config file log line\n{}", describe(&output)));
    }
    Ok(())
}
