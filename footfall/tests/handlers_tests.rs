use footfall::handlers::*;
use footfall_core::compose::{OutputFormat, PROMPT_TEXT};
use footfall_core::data::DatasetStats;
use footfall_core::{PoiId, Session, Settings};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

const POI_CSV: &str = "placekey,location_name,latitude,longitude,raw_visit_counts
lucky,Lucky Star,36.17,-115.14,1200
golden,Golden Nugget,36.17,-115.15,800
";

const VISITS_CSV: &str = "placekey,county,NAME,lat,lon,visits
lucky,06037,Los Angeles County,34.3,-118.2,10
lucky,32003,Clark County,36.2,-115.0,5
lucky,04013,Maricopa County,33.3,-112.5,0
";

fn write_fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
    let pois = dir.path().join("pois.csv");
    let visits = dir.path().join("visits.csv");
    fs::write(&pois, POI_CSV).unwrap();
    fs::write(&visits, VISITS_CSV).unwrap();
    (pois, visits)
}

fn fixture_session(dir: &TempDir) -> Session {
    let (pois, visits) = write_fixture(dir);
    let config = dir.path().join("footfall.toml");
    fs::write(&config, "").unwrap();
    let settings = resolve_settings(Some(&config), Some(&pois), Some(&visits)).unwrap();
    Session::new(load_dataset(&settings, false).unwrap())
}

fn run(session: &mut Session, input: &str, json: bool) -> (usize, String) {
    let mut output = Vec::new();
    let handled = run_event_loop(session, Cursor::new(input), &mut output, json).unwrap();
    (handled, String::from_utf8(output).unwrap())
}

// ============================================================================
// Settings Resolution Tests
// ============================================================================

#[test]
fn test_resolve_settings_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = dir.path().join("footfall.toml");
    fs::write(&config, "[data]\npois = \"a.csv\"\nvisits = \"b.csv\"\n")?;

    let settings = resolve_settings(Some(&config), None, None)?;

    assert_eq!(settings.data.pois, PathBuf::from("a.csv"));
    assert_eq!(settings.data.visits, PathBuf::from("b.csv"));
    Ok(())
}

#[test]
fn test_resolve_settings_command_line_wins() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = dir.path().join("footfall.toml");
    fs::write(&config, "[data]\npois = \"a.csv\"\nvisits = \"b.csv\"\n")?;
    let override_pois = PathBuf::from("override.csv");

    let settings = resolve_settings(Some(&config), Some(&override_pois), None)?;

    assert_eq!(settings.data.pois, override_pois);
    assert_eq!(settings.data.visits, PathBuf::from("b.csv"));
    Ok(())
}

#[test]
fn test_resolve_settings_missing_config_is_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("missing.toml");

    let result = resolve_settings(Some(&config), None, None);

    assert!(result.is_err());
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/footfall");

    assert!(expanded.ends_with("footfall"));
    assert_eq!(expand_path("/tmp/footfall"), PathBuf::from("/tmp/footfall"));
}

// ============================================================================
// Config Initialization Tests
// ============================================================================

#[test]
fn test_write_default_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let target = dir.path().join("nested").join("config");

    let path = write_default_config(&target, false)?;

    assert!(path.exists());
    let written = Settings::load(&path)?;
    assert_eq!(written, Settings::default());
    Ok(())
}

#[test]
fn test_write_default_config_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    write_default_config(dir.path(), false).unwrap();

    let result = write_default_config(dir.path(), false);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

#[test]
fn test_write_default_config_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = write_default_config(dir.path(), false).unwrap();
    fs::write(&path, "garbage").unwrap();

    write_default_config(dir.path(), true).unwrap();

    assert!(Settings::load(&path).is_ok());
}

// ============================================================================
// Dataset Loading Tests
// ============================================================================

#[test]
fn test_load_dataset_failure_has_context() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("footfall.toml");
    fs::write(&config, "").unwrap();
    let missing = dir.path().join("missing.csv");

    let settings = resolve_settings(Some(&config), Some(&missing), Some(&missing)).unwrap();
    let err = load_dataset(&settings, false).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to load datasets"));
}

// ============================================================================
// Event Loop Tests
// ============================================================================

#[test]
fn test_event_loop_prints_summary_per_event() {
    let dir = TempDir::new().unwrap();
    let mut session = fixture_session(&dir);

    let (handled, output) = run(&mut session, "lucky\n[\"golden\", 800]\n", false);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(handled, 2);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Selected placekey: lucky."));
    assert!(lines[0].contains("total visits in sample: 15."));
    assert_eq!(
        lines[1],
        "No county-level visitor data found for placekey golden."
    );
    assert_eq!(session.state().selected_id(), Some(&PoiId::canonical("golden")));
}

#[test]
fn test_event_loop_skips_blank_lines_and_stops_on_quit() {
    let dir = TempDir::new().unwrap();
    let mut session = fixture_session(&dir);

    let (handled, output) = run(&mut session, "\n   \nlucky\nquit\ngolden\n", false);

    assert_eq!(handled, 1);
    assert_eq!(output.lines().count(), 1);
    assert_eq!(session.state().selected_id(), Some(&PoiId::canonical("lucky")));
}

#[test]
fn test_event_loop_json_payload() {
    let dir = TempDir::new().unwrap();
    let mut session = fixture_session(&dir);

    let (_, output) = run(&mut session, "[\"lucky\", 1200]\n", true);
    let lines: Vec<&str> = output.lines().collect();
    let payload: serde_json::Value = serde_json::from_str(lines[1]).unwrap();

    assert!(lines[0].contains("Raw visitor count: 1200."));
    assert_eq!(payload["poi_opacity"], serde_json::json!([1.0, 0.3]));
    let sizes: Vec<f64> = payload["overlay"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["size"].as_f64().unwrap())
        .collect();
    assert_eq!(sizes, vec![24.0, 15.0, 6.0]);
}

#[test]
fn test_event_loop_empty_input() {
    let dir = TempDir::new().unwrap();
    let mut session = fixture_session(&dir);

    let (handled, output) = run(&mut session, "", false);

    assert_eq!(handled, 0);
    assert!(output.is_empty());
}

// ============================================================================
// Output Formatting Tests
// ============================================================================

#[test]
fn test_format_view_text_initial_state() {
    let dir = TempDir::new().unwrap();
    let session = fixture_session(&dir);

    let text = format_view(&session.current_view(), &session.base_layer(), &OutputFormat::Text).unwrap();

    assert!(text.starts_with(PROMPT_TEXT));
    assert!(text.contains("POI opacity: [1.0, 1.0]"));
    assert!(text.contains("County markers: 0"));
}

#[test]
fn test_format_view_text_flattens_labels() {
    let dir = TempDir::new().unwrap();
    let mut session = fixture_session(&dir);
    let view = session.handle(&footfall_core::ClickPayload::from("lucky"));

    let text = format_view(&view, &session.base_layer(), &OutputFormat::Text).unwrap();

    assert!(text.contains("County markers: 3"));
    assert!(text.contains("County: Clark County | FIPS: 32003 | Visits: 5"));
}

#[test]
fn test_format_view_json_includes_base_layer() {
    let dir = TempDir::new().unwrap();
    let mut session = fixture_session(&dir);
    let view = session.handle(&footfall_core::ClickPayload::from("lucky"));

    let json = format_view(&view, &session.base_layer(), &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["base_layer"]["markers"].as_array().unwrap().len(), 2);
    assert_eq!(value["view"]["payload"]["overlay"].as_array().unwrap().len(), 3);
    assert!(value["view"]["summary"].as_str().unwrap().starts_with("Selected placekey"));
}

#[test]
fn test_format_stats() {
    let stats = DatasetStats {
        poi_count: 3,
        indexed_pois: 2,
        record_count: 7,
        pois_without_data: 1,
        orphan_ids: vec![PoiId::canonical("orphan")],
    };

    let text = format_stats(&stats);

    assert!(text.contains("POIs loaded:            3"));
    assert!(text.contains("Origin records:         7"));
    assert!(text.contains("Orphan placekeys:       1"));
    assert!(text.contains("  - orphan"));
}
