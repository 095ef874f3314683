//! End-to-end tests for the public API: rendering, parsing, parent paths,
//! and the render/parse round-trip guarantees.

use chrono::{NaiveDate, NaiveDateTime};
use pathform::{patterns, FieldSpec, FieldValue, FieldValues, PathError, PathModel};

fn scenario_model() -> PathModel {
    PathModel::new("/{base_folder}/{subfolder}/{base_name}__{suffix}.{extension}").unwrap()
}

fn scenario_values() -> FieldValues {
    FieldValues::from([
        ("base_folder", FieldValue::text("parent_folder")),
        ("subfolder", FieldValue::text("other_folder")),
        ("base_name", FieldValue::text("mydata")),
        ("suffix", FieldValue::text("2000-01-01")),
        ("extension", FieldValue::text("csv")),
    ])
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn datetime(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(h, m, s).unwrap()
}

#[test]
fn generates_path_from_field_values() {
    let path = scenario_model().get_path(&scenario_values()).unwrap();
    assert_eq!(path, "/parent_folder/other_folder/mydata__2000-01-01.csv");
}

#[test]
fn parses_conforming_path_into_fields() {
    let parsed = scenario_model()
        .parse_path("/data/reports/summary__2025-12-31.csv")
        .unwrap();
    assert_eq!(
        parsed,
        FieldValues::from([
            ("base_folder", FieldValue::text("data")),
            ("subfolder", FieldValue::text("reports")),
            ("base_name", FieldValue::text("summary")),
            ("suffix", FieldValue::text("2025-12-31")),
            ("extension", FieldValue::text("csv")),
        ])
    );
}

#[test]
fn parent_path_omits_file_fields() {
    let parent = scenario_model()
        .get_parent_path(&FieldValues::from([
            ("base_folder", FieldValue::text("parent_folder")),
            ("subfolder", FieldValue::text("other_folder")),
        ]))
        .unwrap();
    assert_eq!(parent, "/parent_folder/other_folder");
}

#[test]
fn datetime_field_renders_and_parses_symmetrically() {
    let model = PathModel::builder("/{archive}/{stamp}.{ext}")
        .field(
            "stamp",
            FieldSpec::new(r"\d{8}_\d{6}").with_datetime_format("%Y%m%d_%H%M%S"),
        )
        .build()
        .unwrap();
    let moment = datetime(2025, 12, 31, 23, 59, 0);

    let values = FieldValues::from([
        ("archive", FieldValue::text("logs")),
        ("stamp", FieldValue::datetime(moment)),
        ("ext", FieldValue::text("log")),
    ]);
    let path = model.get_path(&values).unwrap();
    assert_eq!(path, "/logs/20251231_235900.log");

    let parsed = model.parse_path(&path).unwrap();
    assert_eq!(parsed.get("stamp"), Some(&FieldValue::datetime(moment)));
}

#[test]
fn syntactic_match_with_bad_calendar_value_is_a_decode_error() {
    let model = PathModel::builder("/{day}/{name}")
        .field(
            "day",
            FieldSpec::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d"),
        )
        .build()
        .unwrap();

    // The pattern admits month 13; the calendar does not.
    let err = model.parse_path("/2025-13-01/report").unwrap_err();
    assert!(matches!(
        err,
        PathError::FieldDecode { field, value, .. }
            if field == "day" && value == "2025-13-01"
    ));
}

#[test]
fn pattern_shorter_than_format_is_a_decode_error() {
    let model = PathModel::builder("/{day}/{name}")
        .field("day", FieldSpec::new(r"\d{2}").with_date_format("%Y-%m-%d"))
        .build()
        .unwrap();

    let err = model.parse_path("/20/report").unwrap_err();
    assert!(matches!(err, PathError::FieldDecode { .. }));
}

#[test]
fn nonconforming_path_is_rejected_without_partial_result() {
    let err = scenario_model()
        .parse_path("/not/enough/components")
        .unwrap_err();
    assert!(matches!(err, PathError::PathMismatch { .. }));
}

#[test]
fn mixed_codec_model_round_trips_through_both_checks() {
    let model = PathModel::builder("{base_path}/{day_folder}/{base_name}_{stamp}.{extension}")
        .field("base_path", FieldSpec::catalog("path"))
        .field(
            "day_folder",
            FieldSpec::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d"),
        )
        .field("base_name", FieldSpec::catalog("field"))
        .field(
            "stamp",
            FieldSpec::new(r"\d{4}-\d{2}-\d{2}_\d{6}").with_datetime_format("%Y-%m-%d_%H%M%S"),
        )
        .field("extension", FieldSpec::new(r"[a-z]+"))
        .build()
        .unwrap();

    let values = FieldValues::from([
        ("base_path", FieldValue::text("/parent/folder")),
        ("day_folder", FieldValue::date(date(2025, 2, 1))),
        ("base_name", FieldValue::text("mydata")),
        ("stamp", FieldValue::datetime(datetime(2025, 2, 1, 12, 34, 56))),
        ("extension", FieldValue::text("csv")),
    ]);

    let path = model.get_path(&values).unwrap();
    assert_eq!(path, "/parent/folder/2025-02-01/mydata_2025-02-01_123456.csv");

    model.check_fields_round_trip(&values).unwrap();
    model.check_path_round_trip(&path).unwrap();
}

#[test]
fn lossy_format_fails_the_fields_round_trip_check() {
    // %y folds 1899 and 1999 onto "99", so parsing cannot recover 1899.
    let model = PathModel::builder("/{day}/{name}")
        .field(
            "day",
            FieldSpec::new(r"\d{2}-\d{2}-\d{2}").with_date_format("%y-%m-%d"),
        )
        .build()
        .unwrap();

    let values = FieldValues::from([
        ("day", FieldValue::date(date(1899, 12, 31))),
        ("name", FieldValue::text("ledger")),
    ]);
    let err = model.check_fields_round_trip(&values).unwrap_err();
    assert!(matches!(err, PathError::RoundTrip { .. }));
}

#[test]
fn rendering_is_deterministic() {
    let model = scenario_model();
    let values = scenario_values();
    let first = model.get_path(&values).unwrap();
    let second = model.get_path(&values).unwrap();
    assert_eq!(first, second);

    let parsed_first = model.parse_path(&first).unwrap();
    let parsed_second = model.parse_path(&first).unwrap();
    assert_eq!(parsed_first, parsed_second);
}

#[test]
fn custom_parent_template_shortens_the_parent() {
    let model = PathModel::builder("{base_folder}/{subfolder}/{name}.{ext}")
        .parent_template("{base_folder}")
        .build()
        .unwrap();
    let parent = model
        .get_parent_path(&FieldValues::from([(
            "base_folder",
            FieldValue::text("parent_folder"),
        )]))
        .unwrap();
    assert_eq!(parent, "parent_folder");
}

#[test]
fn parent_path_truncates_when_trailing_fields_are_omitted() {
    let model = PathModel::new("/{region}/{year}/{month}/{name}.{ext}").unwrap();

    let parent = model
        .get_parent_path(&FieldValues::from([
            ("region", FieldValue::text("eu")),
            ("year", FieldValue::text("2025")),
        ]))
        .unwrap();
    assert_eq!(parent, "/eu/2025");

    // A value past the truncation point can never appear in the output.
    let err = model
        .get_parent_path(&FieldValues::from([
            ("region", FieldValue::text("eu")),
            ("month", FieldValue::text("06")),
        ]))
        .unwrap_err();
    assert!(matches!(
        err,
        PathError::UnknownField { field, .. } if field == "month"
    ));
}

#[test]
fn parent_path_renders_date_fields() {
    let model = PathModel::builder("/{base}/{day}/{name}.{ext}")
        .field(
            "day",
            FieldSpec::new(r"\d{4}/\d{2}/\d{2}").with_date_format("%Y/%m/%d"),
        )
        .build()
        .unwrap();
    let parent = model
        .get_parent_path(&FieldValues::from([
            ("base", FieldValue::text("archive")),
            ("day", FieldValue::date(date(2025, 2, 1))),
        ]))
        .unwrap();
    assert_eq!(parent, "/archive/2025/02/01");
}

#[test]
fn catalog_patterns_constrain_parsing() {
    let model = PathModel::builder("/{dir}/{name}.{ext}")
        .field("dir", FieldSpec::catalog("name"))
        .field("name", FieldSpec::catalog("field"))
        .field("ext", FieldSpec::catalog("extension"))
        .build()
        .unwrap();

    // `field` excludes separators, so an underscored name must not match.
    assert!(model.parse_path("/dir/my_data.csv").is_err());
    assert!(model.parse_path("/dir/mydata.tar.gz").is_ok());
}

#[test]
fn default_field_spec_override_applies_to_all_placeholders() {
    let model = PathModel::builder("/{a}/{b}")
        .default_field(FieldSpec::new(r"[a-z]+"))
        .build()
        .unwrap();

    assert!(model.parse_path("/one/two").is_ok());
    assert!(model.parse_path("/ONE/two").is_err());
}

#[test]
fn round_trip_preserves_typed_values_and_order() {
    let model = PathModel::builder("/{base_path}/{subfolder}/{date_path}/{name}_{stamp}.{ext}")
        .fields([
            ("base_path", FieldSpec::new(patterns::PATH)),
            ("subfolder", FieldSpec::catalog("name")),
            (
                "date_path",
                FieldSpec::new(r"\d{4}/\d{2}/\d{2}").with_date_format("%Y/%m/%d"),
            ),
            ("name", FieldSpec::catalog("field")),
            (
                "stamp",
                FieldSpec::new(r"\d{8}_\d{6}").with_datetime_format("%Y%m%d_%H%M%S"),
            ),
            ("ext", FieldSpec::catalog("extension")),
        ])
        .build()
        .unwrap();

    let values = FieldValues::from([
        ("base_path", FieldValue::text("data/warehouse")),
        ("subfolder", FieldValue::text("daily_loads")),
        ("date_path", FieldValue::date(date(2026, 8, 6))),
        ("name", FieldValue::text("inventory")),
        ("stamp", FieldValue::datetime(datetime(2026, 8, 6, 4, 30, 0))),
        ("ext", FieldValue::text("parquet")),
    ]);

    let path = model.get_path(&values).unwrap();
    let parsed = model.parse_path(&path).unwrap();
    assert_eq!(parsed, values);
    assert_eq!(
        parsed.names().collect::<Vec<_>>(),
        ["base_path", "subfolder", "date_path", "name", "stamp", "ext"]
    );
}
