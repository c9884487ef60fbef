//! Command runs against temporary files and in-process providers.

use super::helpers::{TestProviders, Workspace, corner_error, read_samples, write_utf8};
use super::*;
use crate::compress::{CompressConfig, compress_with_config};
use crate::fetch::{FetchArgs, FetchConfig, fetch_with_config};
use crate::render::{RenderConfig, render_with_config};
use earthpic_core::{CompressionSummary, QueryError};
use rstest::rstest;

fn fetch_config(workspace: &Workspace, name: &str) -> FetchConfig {
    FetchConfig::try_from(FetchArgs {
        output: Some(workspace.path(name)),
        lat_step: Some(90.0),
        lon_step: Some(180.0),
        workers: Some(3),
        ..FetchArgs::default()
    })
    .expect("config should build")
}

#[rstest]
#[case("samples.csv")]
#[case("samples.json")]
fn fetch_writes_every_sample(#[case] name: &str) {
    let workspace = Workspace::new();
    let config = fetch_config(&workspace, name);

    let outcome = fetch_with_config(&config, &TestProviders::Healthy).expect("fetch succeeds");

    assert_eq!(outcome.samples, 9);
    assert_eq!(outcome.output, workspace.path(name));
    assert_eq!(read_samples(&workspace.path(name)).len(), 9);
}

#[rstest]
fn json_output_is_a_json_array() {
    let workspace = Workspace::new();
    let config = fetch_config(&workspace, "samples.json");

    fetch_with_config(&config, &TestProviders::Healthy).expect("fetch succeeds");

    let bytes = earthpic_fs::read_file(&workspace.path("samples.json")).expect("read");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
    assert_eq!(value.as_array().map(Vec::len), Some(9));
}

#[rstest]
fn failed_fetch_saves_partial_results() {
    let workspace = Workspace::new();
    let config = fetch_config(&workspace, "partial.csv");

    let err = fetch_with_config(&config, &TestProviders::FailingCorner)
        .expect_err("fetch should report the failure");

    match err {
        CliError::PartialFetch {
            fetched,
            path,
            source,
        } => {
            assert_eq!(fetched, 8);
            assert_eq!(path, workspace.path("partial.csv"));
            assert_eq!(source, corner_error());
        }
        other => panic!("expected PartialFetch, found {other:?}"),
    }
    let saved = read_samples(&workspace.path("partial.csv"));
    assert_eq!(saved.len(), 8);
    assert!(saved.iter().all(|s| (s.lat, s.lon) != (90.0, 180.0)));
}

#[rstest]
fn compress_writes_rows_latitude_major() {
    let workspace = Workspace::new();
    let input = workspace.path("in.csv");
    write_utf8(
        &input,
        b"10,3,1,0,0\n0,1,1,0,0\n10,1,1,0,0\n0,0,1,0,0\n10,2,1,0,0\n0,2,0,1,0\n10,0,1,0,0\n",
    );
    let config = CompressConfig {
        input,
        output: workspace.path("out/compact.csv"),
    };

    let summary = compress_with_config(&config).expect("compress succeeds");

    assert_eq!(
        summary,
        CompressionSummary {
            rows: 2,
            removed: 2
        }
    );
    let written = earthpic_fs::read_file(&config.output).expect("read output");
    assert_eq!(
        String::from_utf8(written).expect("utf-8"),
        "0,0,1,0,0\n0,1,1,0,0\n0,2,0,1,0\n10,0,1,0,0\n10,3,1,0,0\n"
    );
}

#[rstest]
fn compress_reports_missing_input() {
    let workspace = Workspace::new();
    let config = CompressConfig {
        input: workspace.path("absent.csv"),
        output: workspace.path("out.csv"),
    };

    let err = compress_with_config(&config).expect_err("missing input");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_INPUT);
            assert_eq!(path, workspace.path("absent.csv"));
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn compress_rejects_directories_as_input() {
    let workspace = Workspace::new();
    write_utf8(&workspace.path("dir/placeholder"), b"");
    let config = CompressConfig {
        input: workspace.path("dir"),
        output: workspace.path("out.csv"),
    };

    let err = compress_with_config(&config).expect_err("directory input");
    assert!(
        matches!(err, CliError::SourcePathNotFile { field, .. } if field == ARG_INPUT),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn compress_reports_malformed_lines() {
    let workspace = Workspace::new();
    let input = workspace.path("bad.csv");
    write_utf8(&input, b"0,0,1,0,0\n0,1,1,0\n");
    let config = CompressConfig {
        input: input.clone(),
        output: workspace.path("out.csv"),
    };

    let err = compress_with_config(&config).expect_err("malformed input");
    match err {
        CliError::ParseSamples { path, source } => {
            assert_eq!(path, input);
            assert_eq!(source.to_string(), "line 2: expected 5 fields, found 4");
        }
        other => panic!("expected ParseSamples, found {other:?}"),
    }
    assert!(earthpic_fs::read_file(&workspace.path("out.csv")).is_err());
}

#[rstest]
fn render_writes_a_png() {
    let workspace = Workspace::new();
    let input = workspace.path("in.csv");
    write_utf8(&input, b"45,90,1,0,0\n-45,90,0,0,1\n");
    let config = RenderConfig {
        input,
        output: workspace.path("earth.png"),
        width: 40,
        height: 20,
    };

    let summary = render_with_config(&config).expect("render succeeds");

    assert_eq!(summary.painted + summary.skipped, 800);
    let image = image::open(config.output.as_std_path())
        .expect("open PNG")
        .to_rgba8();
    assert_eq!(image.dimensions(), (40, 20));
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(image.get_pixel(20, 15).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(20, 5).0, [0, 0, 255, 255]);
}

#[rstest]
fn render_of_an_empty_file_fails() {
    let workspace = Workspace::new();
    let input = workspace.path("empty.csv");
    write_utf8(&input, b"");
    let config = RenderConfig {
        input: input.clone(),
        output: workspace.path("earth.png"),
        width: 8,
        height: 8,
    };

    let err = render_with_config(&config).expect_err("empty picture");
    match err {
        CliError::Render { path, source } => {
            assert_eq!(path, input);
            assert_eq!(source, QueryError::EmptySet);
        }
        other => panic!("expected Render, found {other:?}"),
    }
}
