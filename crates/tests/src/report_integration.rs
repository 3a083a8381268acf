//! Integration tests for report extraction
//!
//! These tests load real-shaped HTML exports through the infra loader and run
//! the core parsers on them, checking metadata and device tables end to end.

use std::path::PathBuf;
use venue_core::domain::discover_devices;
use venue_core::{clean_name, Document, ExtractorConfig, Hardware, ParseError, Venue};
use venue_infra::HtmlDocument;

struct Expected {
    file: &'static str,
    console: &'static str,
    version: &'static str,
    show: &'static str,
    devices: &'static [(&'static str, Hardware, usize, usize)],
}

const S3L_X: &[(&str, Hardware, usize, usize)] = &[
    ("Console", Hardware::Local, 4, 4),
    ("Engine", Hardware::Local, 11, 10),
    ("Pro Tools", Hardware::ProTools, 64, 64),
    ("Stage 1", Hardware::StageBox, 16, 12),
    ("Stage 2", Hardware::StageBox, 16, 12),
    ("Stage 3", Hardware::StageBox, 16, 12),
    ("Stage 4", Hardware::StageBox, 16, 12),
];

const PROFILE: &[(&str, Hardware, usize, usize)] = &[
    ("Local", Hardware::Local, 31, 28),
    ("Pro Tools", Hardware::ProTools, 32, 32),
    ("Stage 1", Hardware::StageBox, 48, 48),
];

const D_SHOW: &[(&str, Hardware, usize, usize)] = &[
    ("Pro Tools", Hardware::ProTools, 32, 32),
    ("Stage 1", Hardware::StageBox, 48, 48),
];

const REPORTS: &[Expected] = &[
    // Avid S3L-X console doing recording.
    Expected {
        file: "20170526-icf-conference-worship-night.html",
        console: "Avid VENUE",
        version: "VENUE 4.5.3",
        show: r"ICF Zurich\20170526 Conf WN",
        devices: S3L_X,
    },
    // Avid Profile console doing FoH and in-ear monitoring.
    Expected {
        file: "20170906-icf-ladies-night.html",
        console: "Avid VENUE",
        version: "VENUE 4.5.3",
        show: r"ICF Zurich\20170906 Ladies Night",
        devices: PROFILE,
    },
    // Avid D-Show console doing FoH.
    Expected {
        file: "20170910-avid-d-show-patch-list.html",
        console: "Avid VENUE",
        version: "D-Show 3.1.1",
        show: r"GenX\2017_09_10PM",
        devices: D_SHOW,
    },
    Expected {
        file: "20170910-avid-d-show-system-info.html",
        console: "Avid VENUE",
        version: "D-Show 3.1.1",
        show: r"GenX\2017_09_10PM",
        devices: D_SHOW,
    },
    // Avid S3L-X console doing recording.
    Expected {
        file: "20170910-avid-s3l-x-patch-list.html",
        console: "Avid VENUE",
        version: "VENUE 4.5.3",
        show: r"01 ICF ZH Celebrations\2017-09-10 Rec PM",
        devices: S3L_X,
    },
    Expected {
        file: "20170910-avid-s3l-x-system-info.html",
        console: "Avid VENUE",
        version: "VENUE 4.5.3",
        show: r"01 ICF ZH Celebrations\2017-09-10 Rec PM",
        devices: S3L_X,
    },
];

fn load(file: &str) -> HtmlDocument {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "fixtures", file].iter().collect();
    let html = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("error reading fixture {}: {e}", path.display()));
    HtmlDocument::parse(&html).unwrap_or_else(|e| panic!("error parsing {file}: {e}"))
}

// ============================================================================
// METADATA
// ============================================================================

#[test]
fn test_parse_metadata() {
    let config = ExtractorConfig::default();
    let mut venue = Venue::new();
    for report in REPORTS {
        let doc = load(report.file);
        venue
            .parse_metadata(&doc, &config)
            .unwrap_or_else(|e| panic!("{}: error parsing metadata: {e}", report.file));

        assert_eq!(venue.console(), report.console, "{}: console", report.file);
        assert_eq!(venue.version(), report.version, "{}: version", report.file);
        assert_eq!(venue.show(), report.show, "{}: show", report.file);
    }
}

// ============================================================================
// DEVICE DISCOVERY
// ============================================================================

#[test]
fn test_discover_devices() {
    let config = ExtractorConfig::default();
    for report in REPORTS {
        let doc = load(report.file);
        let devices = discover_devices(&doc, &config.devices)
            .unwrap_or_else(|e| panic!("{}: discover_devices(): {e}", report.file));

        assert_eq!(
            devices.len(),
            report.devices.len(),
            "{}: device names {:?}",
            report.file,
            devices.keys().collect::<Vec<_>>()
        );
        for &(name, hardware, inputs, outputs) in report.devices {
            let Some(dev) = devices.get(name) else {
                panic!("{}: missing device {name}", report.file);
            };
            assert_eq!(dev.hardware(), hardware, "{}: {name} hardware", report.file);
            assert_eq!(dev.num_inputs(), inputs, "{}: {name} inputs", report.file);
            assert_eq!(dev.num_outputs(), outputs, "{}: {name} outputs", report.file);
        }
    }
}

#[test]
fn test_from_document_end_to_end() {
    let doc = load("20170526-icf-conference-worship-night.html");
    let venue = Venue::from_document(&doc, &ExtractorConfig::default()).unwrap();

    assert_eq!(venue.console(), "Avid VENUE");
    assert_eq!(venue.version(), "VENUE 4.5.3");
    assert_eq!(venue.show(), r"ICF Zurich\20170526 Conf WN");

    let summary: Vec<_> = venue
        .devices()
        .values()
        .map(|d| (d.name(), d.hardware(), d.num_inputs(), d.num_outputs()))
        .collect();
    assert_eq!(summary, S3L_X.to_vec());
}

// ============================================================================
// CHANNEL NAMES
// ============================================================================

#[test]
fn test_channel_names_from_report() {
    let doc = load("20170906-icf-ladies-night.html");
    let devices = discover_devices(&doc, &ExtractorConfig::default().devices).unwrap();
    let stage = &devices["Stage 1"];

    let raw: Vec<_> = stage.inputs().iter().map(|ch| ch.name()).collect();
    assert!(raw.contains(&"eGit-L, eGit-R"));
    assert!(raw.contains(&"Drums & Perc"));

    let clean: Vec<_> = stage.inputs().iter().map(|ch| ch.clean_name()).collect();
    assert!(clean.contains(&"eGit"));
    assert!(clean.contains(&"Keys"));
    // Not a stereo pair: different bases, or no -L/-R markers.
    assert!(clean.contains(&"Lead-L, Lead2-R"));
    assert!(clean.contains(&"v1, v2"));
    assert!(!clean.contains(&"Lead"));
}

#[test]
fn test_clean_names_in_d_show_export() {
    let doc = load("20170910-avid-d-show-patch-list.html");
    let devices = discover_devices(&doc, &ExtractorConfig::default().devices).unwrap();
    let outputs: Vec<_> = devices["Stage 1"].outputs().iter().map(|ch| ch.clean_name()).collect();
    assert!(outputs.contains(&"Main"));
    assert!(outputs.contains(&"IEM 1"));
    assert!(outputs.contains(&""));
    assert_eq!(clean_name("IEM 1-L, IEM 1-R"), "IEM 1");
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_unknown_device_aborts_discovery() {
    let html = r#"<html><body>
        <table class="header"><tr><td class="console">Avid VENUE</td><td class="version">VENUE 4.5.3</td></tr>
        <tr><td class="show">A\B</td></tr></table>
        <div class="device"><h2>Stage 1</h2><table class="inputs"><tr><td>1</td><td>Kick</td></tr></table></div>
        <div class="device"><h2>Dante Bridge</h2><table class="inputs"><tr><td>1</td><td>In</td></tr></table></div>
        </body></html>"#;
    let doc = HtmlDocument::parse(html).unwrap();

    let err = Venue::from_document(&doc, &ExtractorConfig::default()).unwrap_err();
    assert!(matches!(err, ParseError::UnknownDeviceType { ref device } if device == "Dante Bridge"));
    assert_eq!(err.to_string(), "Unknown device type for \"Dante Bridge\"");
}

#[test]
fn test_malformed_table_names_device() {
    let html = r#"<div class="device"><h2>Engine</h2>
        <table class="outputs"><tr><td>1</td><td>AES</td></tr><tr><td>x</td><td>Bad</td></tr></table></div>"#;
    let doc = HtmlDocument::parse(html).unwrap();

    let err = discover_devices(&doc, &ExtractorConfig::default().devices).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("outputs"), "{msg}");
    assert!(msg.contains("Engine"), "{msg}");
}

#[test]
fn test_missing_header_is_missing_field() {
    let doc = HtmlDocument::parse("<html><body><h2>Nothing here</h2></body></html>").unwrap();
    let mut venue = Venue::new();
    let err = venue
        .parse_metadata(&doc, &ExtractorConfig::default())
        .unwrap_err();
    assert!(matches!(err, ParseError::MissingField { ref field } if field == "console"));
    assert_eq!(venue, Venue::new());
}

#[test]
fn test_bad_override_expression_is_query_error() {
    let doc = load("20170910-avid-d-show-patch-list.html");
    let mut config = ExtractorConfig::default();
    config.devices.blocks = vec!["//table[@id=".to_string()];

    let err = discover_devices(&doc, &config.devices).unwrap_err();
    assert!(matches!(err, ParseError::Query(ref q) if q.expression == "//table[@id="));
    assert_eq!(doc.select(doc.root(), "//table[@id='device']").unwrap().len(), 2);
}
