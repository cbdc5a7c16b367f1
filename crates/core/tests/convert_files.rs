use std::fs;
use std::path::Path;

use png2c_core::ident::is_valid_c_identifier;
use png2c_core::{convert_all, convert_batch, ConvertConfig, ConvertError, Converter};
use tempfile::tempdir;

fn write_asset(dir: &Path, name: &str, bytes: &[u8]) {
    fs::write(dir.join(name), bytes).expect("write asset");
}

#[test]
fn convert_file_writes_sibling_header() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("foo.png");
    fs::write(&input, (0u8..18).collect::<Vec<_>>()).unwrap();

    let conversion = Converter::default().convert_file(&input).expect("convert");
    assert_eq!(conversion.output, tmp.path().join("foo.h"));
    assert_eq!(conversion.identifier, "foo");
    assert_eq!(conversion.bytes, 18);
    assert_eq!(
        conversion.to_string(),
        format!("Created {} (18 bytes)", tmp.path().join("foo.h").display())
    );

    let header = fs::read_to_string(tmp.path().join("foo.h")).unwrap();
    assert!(header.starts_with("unsigned char foo[] = {\n"));
    assert!(header.ends_with("unsigned int foo_len = 18;\n"));
}

#[test]
fn convert_file_overwrites_existing_header() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "default.png", &[1, 2, 3]);
    fs::write(tmp.path().join("default.h"), "stale contents that are much longer").unwrap();

    Converter::default().convert_file(&tmp.path().join("default.png")).unwrap();

    let header = fs::read_to_string(tmp.path().join("default.h")).unwrap();
    assert_eq!(
        header,
        "unsigned char default_keypad_image[] = {\n  0x01, 0x02, 0x03\n};\n\
         unsigned int default_keypad_image_len = 3;\n"
    );
}

#[test]
fn empty_asset_produces_empty_array() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "foo.png", &[]);
    let conversion = Converter::default().convert_file(&tmp.path().join("foo.png")).unwrap();
    assert_eq!(conversion.bytes, 0);
    assert_eq!(
        fs::read_to_string(&conversion.output).unwrap(),
        "unsigned char foo[] = {\n\n};\nunsigned int foo_len = 0;\n"
    );
}

#[test]
fn double_extension_and_no_extension_naming() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "icon.png.png", &[0xaa]);
    write_asset(tmp.path(), "raw", &[0xbb]);

    let converter = Converter::default();
    let doubled = converter.convert_file(&tmp.path().join("icon.png.png")).unwrap();
    assert_eq!(doubled.output, tmp.path().join("icon.png.h"));

    let bare = converter.convert_file(&tmp.path().join("raw")).unwrap();
    assert_eq!(bare.output, tmp.path().join("raw.h"));
    assert_eq!(bare.identifier, "raw");
    assert_eq!(fs::read(tmp.path().join("raw")).unwrap(), vec![0xbb], "input must not be touched");
}

#[test]
fn missing_input_reports_read_error() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("nope.png");
    let err = Converter::default().convert_file(&missing).unwrap_err();
    match &err {
        ConvertError::ReadInput { path, source } => {
            assert_eq!(path, &missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected ReadInput, got {other:?}"),
    }
    assert_eq!(err.path(), Some(missing.as_path()));
}

#[test]
fn unwritable_output_reports_write_error() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "banner.png", &[1]);
    let converter = Converter::default().with_out_dir(Some(tmp.path().join("does/not/exist")));
    let err = converter.convert_file(&tmp.path().join("banner.png")).unwrap_err();
    assert!(matches!(err, ConvertError::WriteOutput { .. }), "unexpected error: {err:?}");
}

#[test]
fn out_dir_receives_headers() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("include");
    fs::create_dir_all(&out).unwrap();
    write_asset(tmp.path(), "banner.png", &[9, 8, 7]);

    let config =
        ConvertConfig::new(["banner.png"]).with_base_dir(tmp.path()).with_out_dir("include");
    let done = convert_batch(&config).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].output, out.join("banner.h"));
    assert!(out.join("banner.h").exists());
    assert!(!tmp.path().join("banner.h").exists());
}

#[test]
fn default_config_converts_builtin_assets() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "banner.png", &[1]);
    write_asset(tmp.path(), "keypad_frame_graphic.png", &[2, 2]);
    write_asset(tmp.path(), "default_keypad_image.png", &[3, 3, 3]);

    let config = ConvertConfig::default().with_base_dir(tmp.path());
    let done = convert_batch(&config).unwrap();
    let names: Vec<&str> = done.iter().map(|c| c.identifier.as_str()).collect();
    assert_eq!(names, ["banner", "keypad_frame_graphic", "default_keypad_image"]);
    let sizes: Vec<usize> = done.iter().map(|c| c.bytes).collect();
    assert_eq!(sizes, [1, 2, 3]);
}

#[test]
fn sequential_batch_stops_at_first_failure() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "a.png", &[1]);
    write_asset(tmp.path(), "c.png", &[3]);

    let config = ConvertConfig::new(["a.png", "b.png", "c.png"]).with_base_dir(tmp.path());
    let mut reported = Vec::new();
    let err = convert_all(&config, |c| reported.push(c.identifier.clone())).unwrap_err();

    assert!(matches!(err, ConvertError::ReadInput { .. }));
    assert_eq!(reported, ["a"]);
    assert!(tmp.path().join("a.h").exists(), "earlier output stays in place");
    assert!(!tmp.path().join("c.h").exists(), "later inputs are not processed");
}

#[test]
fn pooled_batch_reports_in_input_order() {
    let tmp = tempdir().unwrap();
    let names: Vec<String> = (0..12).map(|i| format!("asset-{i:02}.png")).collect();
    for (i, name) in names.iter().enumerate() {
        write_asset(tmp.path(), name, &vec![i as u8; i * 10]);
    }

    let config = ConvertConfig::new(names.iter()).with_base_dir(tmp.path()).with_jobs(4);
    let mut reported = Vec::new();
    let done = convert_all(&config, |c| reported.push(c.identifier.clone())).unwrap();

    let expected: Vec<String> = (0..12).map(|i| format!("asset_{i:02}")).collect();
    assert_eq!(reported, expected);
    assert_eq!(done.iter().map(|c| c.identifier.clone()).collect::<Vec<_>>(), expected);
    for (i, conversion) in done.iter().enumerate() {
        assert_eq!(conversion.bytes, i * 10);
        assert!(conversion.output.exists());
    }
}

#[test]
fn pooled_batch_stops_writing_at_failed_input() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "one.png", &[1]);
    write_asset(tmp.path(), "two.png", &[2]);
    write_asset(tmp.path(), "three.png", &[3]);

    let config = ConvertConfig::new(["one.png", "missing.png", "two.png", "three.png"])
        .with_base_dir(tmp.path())
        .with_jobs(3);
    let mut reported = Vec::new();
    let err = convert_all(&config, |c| reported.push(c.identifier.clone())).unwrap_err();

    assert_eq!(err.path(), Some(tmp.path().join("missing.png").as_path()));
    assert_eq!(reported, ["one"]);
    assert!(tmp.path().join("one.h").exists());
    assert!(!tmp.path().join("two.h").exists(), "nothing after the failure is written");
    assert!(!tmp.path().join("three.h").exists(), "nothing after the failure is written");
}

fn headers_after_first(dir: &Path, names: &[String]) -> Vec<String> {
    names[1..]
        .iter()
        .map(|name| name.replace(".png", ".h"))
        .filter(|header| dir.join(header).is_file())
        .collect()
}

#[test]
fn pooled_write_failure_leaves_same_files_as_sequential() {
    let names: Vec<String> = std::iter::once("x.png".to_string())
        .chain((1..8).map(|i| format!("small{i}.png")))
        .collect();

    let run = |jobs: usize| {
        let tmp = tempdir().unwrap();
        write_asset(tmp.path(), "x.png", &vec![0x5a; 2 * 1024 * 1024]);
        for name in &names[1..] {
            write_asset(tmp.path(), name, &[7]);
        }
        // A directory where the first header should go makes its write fail.
        fs::create_dir(tmp.path().join("x.h")).unwrap();

        let config = ConvertConfig::new(names.iter()).with_base_dir(tmp.path()).with_jobs(jobs);
        let mut reported = Vec::new();
        let err = convert_all(&config, |c| reported.push(c.identifier.clone())).unwrap_err();
        assert!(matches!(err, ConvertError::WriteOutput { .. }), "unexpected error: {err:?}");
        (reported, headers_after_first(tmp.path(), &names))
    };

    let (seq_reported, seq_written) = run(1);
    let (pool_reported, pool_written) = run(4);

    assert!(seq_reported.is_empty());
    assert!(seq_written.is_empty());
    assert_eq!(pool_reported, seq_reported);
    assert_eq!(pool_written, seq_written);
}

#[test]
fn invalid_identifier_still_produces_header() {
    let tmp = tempdir().unwrap();
    write_asset(tmp.path(), "1up.png", &[1, 2]);
    write_asset(tmp.path(), "a.b.png", &[3]);

    let converter = Converter::default();
    let leading_digit = converter.convert_file(&tmp.path().join("1up.png")).unwrap();
    assert_eq!(leading_digit.identifier, "1up");
    assert!(!is_valid_c_identifier(&leading_digit.identifier));
    assert!(fs::read_to_string(tmp.path().join("1up.h"))
        .unwrap()
        .starts_with("unsigned char 1up[] = {\n"));

    let dotted = converter.convert_file(&tmp.path().join("a.b.png")).unwrap();
    assert_eq!(dotted.identifier, "a.b");
    assert_eq!(dotted.output, tmp.path().join("a.b.h"));
    assert!(dotted.output.exists());
}

#[test]
fn zero_jobs_is_rejected() {
    let config = ConvertConfig::new(["a.png"]).with_jobs(0);
    let err = convert_batch(&config).unwrap_err();
    assert!(matches!(err, ConvertError::Config(_)));
}
