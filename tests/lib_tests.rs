use chrono::{Local, TimeZone};
use hashsweep::engine::hashing::read_size;
use hashsweep::engine::sink::{format_date, format_date_time, format_time};
use hashsweep::engine::{
    CsvReportSink, FileProbe, ReportSink, ZERO_BYTES_MESSAGE, assemble, classify_root,
    digest_bytes, digest_file, file_extension, file_name, path_to_report_string, relativize,
    report_header, report_row, should_include_in_walk, size_skip_message,
};
use hashsweep::utils::WorkerThreadLimits;
use hashsweep::utils::settings_toml::{apply_file_to_config, parse_settings_toml};
use hashsweep::{DigestAlgorithm, FileRecord, HashError, OutputMode, RunConfig, ScanRoot};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONTENT_SHA1: &str = "040f06fd774092478d450774f5ba30c5da78acc8";
const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
const EMPTY_BLAKE3: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

fn write_file(dir: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let p = dir.join(rel);
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&p, content).unwrap();
    p.canonicalize().unwrap()
}

fn config_for(root: &Path, max_hash_size: u64) -> RunConfig {
    RunConfig {
        scan_root: root.to_path_buf(),
        report: root.join("unused.csv"),
        case_label: "case-001".to_string(),
        max_hash_size,
        ..Default::default()
    }
}

// --- digest ---

#[test]
fn test_digest_bytes_known_vector() {
    assert_eq!(digest_bytes(b"content", DigestAlgorithm::Sha1), CONTENT_SHA1);
}

#[test]
fn test_digest_bytes_empty_input() {
    assert_eq!(digest_bytes(b"", DigestAlgorithm::Sha1), EMPTY_SHA1);
    assert_eq!(digest_bytes(b"", DigestAlgorithm::Blake3), EMPTY_BLAKE3);
}

#[test]
fn test_digest_file_matches_known_vector() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "sub/hello.txt", b"content");
    assert_eq!(
        digest_file(&p, DigestAlgorithm::Sha1).unwrap(),
        CONTENT_SHA1
    );
}

#[test]
fn test_digest_file_larger_than_one_read() {
    let dir = TempDir::new().unwrap();
    let data: Vec<u8> = (0..read_size(DigestAlgorithm::Sha1) * 2 + 17)
        .map(|i| (i % 251) as u8)
        .collect();
    let p = write_file(dir.path(), "big.bin", &data);
    assert_eq!(
        digest_file(&p, DigestAlgorithm::Sha1).unwrap(),
        digest_bytes(&data, DigestAlgorithm::Sha1)
    );
    assert_eq!(
        digest_file(&p, DigestAlgorithm::Blake3).unwrap(),
        digest_bytes(&data, DigestAlgorithm::Blake3)
    );
}

#[test]
fn test_digest_file_missing_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let err = digest_file(&dir.path().join("gone.txt"), DigestAlgorithm::Sha1).unwrap_err();
    assert!(matches!(err, HashError::FileUnreadable { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_read_size_is_whole_blocks() {
    for alg in [DigestAlgorithm::Sha1, DigestAlgorithm::Blake3] {
        let n = read_size(alg);
        assert!(n >= 64 * 1024);
        assert_eq!(n % alg.block_size(), 0);
    }
}

// --- classify_root ---

#[test]
fn test_classify_root_file() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "a.txt", b"x");
    assert_eq!(classify_root(&p).unwrap(), ScanRoot::SingleFile(p));
}

#[test]
fn test_classify_root_directory() {
    let dir = TempDir::new().unwrap();
    let root = classify_root(dir.path()).unwrap();
    assert!(!root.is_single_file());
    assert!(root.path().is_absolute());
    assert_eq!(root.path(), dir.path().canonicalize().unwrap());
}

#[test]
fn test_classify_root_missing_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = classify_root(&dir.path().join("does-not-exist")).unwrap_err();
    assert!(matches!(err, HashError::LocationNotFound { .. }));
    assert!(err.is_fatal());
}

// --- relativize ---

#[test]
fn test_relativize_nested() {
    let root = PathBuf::from("/scan");
    assert_eq!(
        relativize(Path::new("/scan/sub/hello.txt"), &root),
        Some(PathBuf::from("sub/hello.txt"))
    );
    assert_eq!(
        relativize(Path::new("/scan/sub/sub/hello.txt"), &root),
        Some(PathBuf::from("sub/sub/hello.txt"))
    );
}

#[test]
fn test_relativize_direct_child() {
    let root = PathBuf::from("/scan");
    assert_eq!(
        relativize(Path::new("/scan/hello.txt"), &root),
        Some(PathBuf::from("hello.txt"))
    );
}

#[test]
fn test_relativize_file_is_root() {
    let root = PathBuf::from("/scan/sub/hello.txt");
    assert_eq!(relativize(&root, &root), None);
}

#[test]
fn test_relativize_outside_root() {
    let root = PathBuf::from("/scan");
    assert_eq!(relativize(Path::new("/other/hello.txt"), &root), None);
}

#[test]
fn test_relativize_relative_vs_absolute() {
    let root = PathBuf::from("/scan");
    assert_eq!(relativize(Path::new("scan/hello.txt"), &root), None);
}

#[test]
fn test_path_to_report_string_forward_slashes() {
    assert_eq!(
        path_to_report_string(Path::new("sub\\hello.txt")),
        "sub/hello.txt"
    );
}

// --- should_include_in_walk ---

#[test]
fn test_should_include_skips_own_outputs() {
    let report = PathBuf::from("/scan/hash_report.csv");
    let temp = PathBuf::from("/scan/hash_report.csv.tmp");
    let excluded = vec![report.clone(), temp.clone()];
    assert!(!should_include_in_walk(&report, &excluded));
    assert!(!should_include_in_walk(&temp, &excluded));
    assert!(should_include_in_walk(
        Path::new("/scan/other.csv"),
        &excluded
    ));
}

// --- probe ---

#[test]
fn test_file_name_and_extension() {
    assert_eq!(file_name(Path::new("/a/hello.txt")), "hello.txt");
    assert_eq!(file_extension(Path::new("/a/hello.txt")), ".txt");
    assert_eq!(file_extension(Path::new("/a/archive.tar.gz")), ".gz");
    assert_eq!(file_extension(Path::new("/a/noext")), "");
    assert_eq!(file_extension(Path::new("/a/.bashrc")), "");
}

#[test]
fn test_file_name_unicode() {
    let dir = TempDir::new().unwrap();
    let name = "ᚢᚱ᛫ᛒᛦᚦ᛫ᚪᚾᛗᚩᛞ";
    let content = "conticontinet big snake = with unicode stuff in the name";
    let p = write_file(dir.path(), name, content.as_bytes());
    let probe = FileProbe::new(&p);
    assert_eq!(probe.name(), name);
    assert_eq!(probe.size().unwrap(), content.len() as u64);
}

#[test]
fn test_probe_times_are_recent() {
    let dir = TempDir::new().unwrap();
    let before = Local::now() - chrono::Duration::seconds(5);
    let p = write_file(dir.path(), "hello.txt", b"x");
    let probe = FileProbe::new(&p);
    let modified = probe.modified().unwrap();
    assert!(modified >= before);
    assert!(modified <= Local::now() + chrono::Duration::seconds(5));
    assert!(probe.created().is_ok());
}

#[test]
fn test_probe_missing_file_fails_per_accessor() {
    let dir = TempDir::new().unwrap();
    let probe = FileProbe::new(&dir.path().join("gone.txt"));
    assert!(matches!(
        probe.size(),
        Err(HashError::MetadataUnavailable { what: "size", .. })
    ));
    assert!(matches!(
        probe.modified(),
        Err(HashError::MetadataUnavailable {
            what: "modified",
            ..
        })
    ));
    assert_eq!(probe.name(), "gone.txt");
    assert_eq!(probe.extension(), ".txt");
}

// --- assemble ---

#[test]
fn test_assemble_hashes_small_file() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "sub/hello.txt", b"content");
    let root = classify_root(dir.path()).unwrap();
    let r = assemble(&p, &root, &config_for(dir.path(), 1024));
    assert_eq!(r.digest, CONTENT_SHA1);
    assert_eq!(r.digest_upper(), CONTENT_SHA1.to_uppercase());
    assert_eq!(r.hash_error, "");
    assert_eq!(r.size, Some(7));
    assert_eq!(r.case_label, "case-001");
    assert_eq!(r.file_name, "hello.txt");
    assert_eq!(r.file_extension, ".txt");
    assert!(r.created.is_some());
    assert!(r.modified.is_some());
    // Full mode does not compute the relative path.
    assert_eq!(r.relative_path, None);
}

#[test]
fn test_assemble_skips_oversized_file() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "hello.txt", b"content");
    let root = classify_root(dir.path()).unwrap();
    let r = assemble(&p, &root, &config_for(dir.path(), 1));
    assert_eq!(r.digest, "");
    assert_eq!(r.hash_error, "file size, 7 > 1, hash skipped");
    assert_eq!(r.hash_error, size_skip_message(7, 1));
    assert_eq!(r.size, Some(7));
}

#[test]
fn test_assemble_file_at_threshold_is_hashed() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "hello.txt", b"content");
    let root = classify_root(dir.path()).unwrap();
    let r = assemble(&p, &root, &config_for(dir.path(), 7));
    assert_eq!(r.digest, CONTENT_SHA1);
    assert_eq!(r.hash_error, "");
}

#[test]
fn test_assemble_zero_byte_file_flagged_and_hashed() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "New Bitmap Image.bmp", b"");
    let root = classify_root(dir.path()).unwrap();
    let r = assemble(&p, &root, &config_for(dir.path(), 1024));
    assert_eq!(r.hash_error, ZERO_BYTES_MESSAGE);
    assert_eq!(r.digest, EMPTY_SHA1);
    assert_eq!(r.size, Some(0));
}

#[test]
fn test_assemble_zero_byte_file_with_zero_threshold() {
    // 0 > 0 is false, so the empty file is still hashed and the zero-byte notice wins.
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "empty", b"");
    let root = classify_root(dir.path()).unwrap();
    let r = assemble(&p, &root, &config_for(dir.path(), 0));
    assert_eq!(r.hash_error, ZERO_BYTES_MESSAGE);
    assert_eq!(r.digest, EMPTY_SHA1);
}

#[test]
fn test_assemble_vanished_file_still_produces_record() {
    let dir = TempDir::new().unwrap();
    let root = classify_root(dir.path()).unwrap();
    let gone = root.path().join("gone.txt");
    let r = assemble(&gone, &root, &config_for(dir.path(), 1024));
    assert_eq!(r.digest, "");
    assert_eq!(r.size, None);
    assert!(r.hash_error.contains("size unavailable"), "{}", r.hash_error);
    assert_eq!(r.file_name, "gone.txt");
}

#[cfg(unix)]
#[test]
fn test_assemble_unreadable_contents_keeps_size() {
    // A directory stats fine, opens fine on Unix, then fails to read.
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "not-a-file/inner.txt", b"content");
    let root = classify_root(dir.path()).unwrap();
    let target = root.path().join("not-a-file");
    let r = assemble(&target, &root, &config_for(dir.path(), u64::MAX));
    assert!(r.size.is_some());
    assert_eq!(r.digest, "");
    assert!(!r.hash_error.is_empty());
    assert!(r.hash_error.contains("on file:"), "{}", r.hash_error);
    assert!(!r.hash_error.contains("unavailable"), "{}", r.hash_error);
    assert!(!r.hash_error.contains("hash skipped"), "{}", r.hash_error);
    assert!(r.modified.is_some());
}

#[test]
fn test_assemble_survives_truncation_mid_hash() {
    let dir = TempDir::new().unwrap();
    let data = vec![0x5au8; 128 * 1024 * 1024];
    let p = write_file(dir.path(), "large.bin", &data);
    drop(data);
    let root = classify_root(dir.path()).unwrap();
    let cfg = config_for(dir.path(), u64::MAX);

    let victim = p.clone();
    let truncator = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(10));
        fs::OpenOptions::new()
            .write(true)
            .open(&victim)
            .unwrap()
            .set_len(0)
            .unwrap();
    });
    let r = assemble(&p, &root, &cfg);
    truncator.join().unwrap();

    // Either a (possibly short) digest or a captured per-file error; the run goes on.
    if r.digest.is_empty() {
        assert!(!r.hash_error.is_empty());
    } else {
        assert_eq!(r.digest.len(), 40);
    }
    assert_eq!(fs::metadata(&p).unwrap().len(), 0);
}

#[test]
fn test_assemble_simple_mode_relative_path() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "test-folder/New folder 2/deep.rtf", b"rtf");
    let root = classify_root(dir.path()).unwrap();
    let cfg = RunConfig {
        output_mode: OutputMode::Simple,
        ..config_for(dir.path(), 1024)
    };
    let r = assemble(&p, &root, &cfg);
    assert_eq!(
        r.relative_path,
        Some(PathBuf::from("test-folder/New folder 2/deep.rtf"))
    );
}

#[test]
fn test_assemble_single_file_root_has_no_relative_path() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "hello.txt", b"content");
    let root = classify_root(&p).unwrap();
    let cfg = RunConfig {
        output_mode: OutputMode::Simple,
        ..config_for(&p, 1024)
    };
    let r = assemble(&p, &root, &cfg);
    assert_eq!(r.relative_path, None);
    assert_eq!(r.digest, CONTENT_SHA1);
}

#[test]
fn test_assemble_blake3() {
    let dir = TempDir::new().unwrap();
    let p = write_file(dir.path(), "hello.txt", b"content");
    let root = classify_root(dir.path()).unwrap();
    let cfg = RunConfig {
        algorithm: DigestAlgorithm::Blake3,
        ..config_for(dir.path(), 1024)
    };
    let r = assemble(&p, &root, &cfg);
    assert_eq!(r.digest, digest_bytes(b"content", DigestAlgorithm::Blake3));
    assert_eq!(r.digest.len(), 64);
}

// --- report formatting ---

#[test]
fn test_format_date_and_time() {
    let d = Local.with_ymd_and_hms(2021, 2, 28, 16, 23, 56).unwrap();
    assert_eq!(format_date(&d), "2021-Feb-28");
    assert!(format_time(&d).starts_with("16:23:56"));
    assert!(format_date_time(&d).starts_with("2021-Feb-28 16:23:56"));
}

#[test]
fn test_report_header_full() {
    let h = report_header(OutputMode::Full, DigestAlgorithm::Sha1);
    assert_eq!(
        h,
        vec![
            "case-label",
            "path",
            "sha-1",
            "sha-1-uc",
            "hash-error",
            "size",
            "created",
            "created-time",
            "modified",
            "modified-time",
            "file-name",
            "file-extension",
        ]
    );
}

#[test]
fn test_report_header_simple() {
    let h = report_header(OutputMode::Simple, DigestAlgorithm::Sha1);
    assert_eq!(
        h,
        vec![
            "case-label",
            "relative-path",
            "sha1",
            "hash-error",
            "size",
            "created",
            "modified",
            "file-name",
            "file-extension",
        ]
    );
}

fn sample_record() -> FileRecord {
    let d = Local.with_ymd_and_hms(2021, 2, 28, 16, 23, 56).unwrap();
    FileRecord {
        case_label: "case-001".to_string(),
        path: PathBuf::from("/scan/sub/hello.txt"),
        relative_path: Some(PathBuf::from("sub/hello.txt")),
        digest: CONTENT_SHA1.to_string(),
        hash_error: String::new(),
        size: Some(7),
        created: Some(d),
        modified: None,
        file_name: "hello.txt".to_string(),
        file_extension: ".txt".to_string(),
    }
}

#[test]
fn test_report_row_matches_header_width() {
    let r = sample_record();
    for mode in [OutputMode::Full, OutputMode::Simple] {
        assert_eq!(
            report_row(&r, mode).len(),
            report_header(mode, DigestAlgorithm::Sha1).len()
        );
    }
}

#[test]
fn test_report_row_full() {
    let row = report_row(&sample_record(), OutputMode::Full);
    assert_eq!(row[1], "/scan/sub/hello.txt");
    assert_eq!(row[2], CONTENT_SHA1);
    assert_eq!(row[3], CONTENT_SHA1.to_uppercase());
    assert_eq!(row[5], "7");
    assert_eq!(row[6], "2021-Feb-28");
    assert!(row[7].starts_with("16:23:56"));
    // Missing modified time is written as empty fields.
    assert_eq!(row[8], "");
    assert_eq!(row[9], "");
}

#[test]
fn test_report_row_simple() {
    let row = report_row(&sample_record(), OutputMode::Simple);
    assert_eq!(row[1], "sub/hello.txt");
    assert_eq!(row[2], CONTENT_SHA1);
    assert!(row[5].starts_with("2021-Feb-28 16:23:56"));
    assert_eq!(row[6], "");
}

#[cfg(unix)]
#[test]
fn test_report_row_non_utf8_path_is_written_lossily() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    let mut r = sample_record();
    r.path = Path::new("/scan").join(OsStr::from_bytes(b"bad-\xff.txt"));
    r.relative_path = Some(PathBuf::from(OsStr::from_bytes(b"bad-\xff.txt")));
    let full = report_row(&r, OutputMode::Full);
    assert_eq!(full[1], "/scan/bad-\u{FFFD}.txt");
    let simple = report_row(&r, OutputMode::Simple);
    assert_eq!(simple[1], "bad-\u{FFFD}.txt");
}

#[test]
fn test_csv_sink_quotes_every_field() {
    let mut sink =
        CsvReportSink::new(Vec::new(), OutputMode::Simple, DigestAlgorithm::Sha1).unwrap();
    let mut r = sample_record();
    r.hash_error = "a, \"quoted\" error".to_string();
    sink.write_record(&r).unwrap();
    sink.flush().unwrap();
    let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"case-label\",\"relative-path\",\"sha1\",\"hash-error\",\"size\",\"created\",\"modified\",\"file-name\",\"file-extension\""
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("\"case-001\",\"sub/hello.txt\","));
    assert!(row.contains("\"a, \"\"quoted\"\" error\""));
    assert!(!out.contains('\r'));
}

#[test]
fn test_vec_sink_collects_records() {
    let mut sink: Vec<FileRecord> = Vec::new();
    sink.write_record(&sample_record()).unwrap();
    assert_eq!(sink.len(), 1);
}

// --- config ---

#[test]
fn test_default_workers_leaves_one_core() {
    let limits = |all| WorkerThreadLimits {
        all_threads: all,
        ..Default::default()
    };
    assert_eq!(limits(8).default_workers(), 7);
    assert_eq!(limits(2).default_workers(), 1);
    assert_eq!(limits(1).default_workers(), 1);
    assert_eq!(limits(0).default_workers(), 1);
}

#[test]
fn test_run_config_defaults() {
    let cfg = RunConfig::default();
    assert_eq!(cfg.case_label, "no-case");
    assert_eq!(cfg.max_hash_size, 1024 * 1024 * 1024);
    assert_eq!(cfg.output_mode, OutputMode::Full);
    assert_eq!(cfg.algorithm, DigestAlgorithm::Sha1);
    assert_eq!(cfg.workers, None);
    assert!(cfg.report.ends_with("hash_report.csv"));
}

#[test]
fn test_settings_toml_applies_present_fields_only() {
    let file = parse_settings_toml(
        r#"
[settings]
case_label = "case-042"
max_hash_size = 2048
simple = true
algorithm = "blake3"
workers = 3
"#,
    )
    .unwrap();
    let mut cfg = RunConfig::default();
    let report_before = cfg.report.clone();
    apply_file_to_config(&file, &mut cfg);
    assert_eq!(cfg.case_label, "case-042");
    assert_eq!(cfg.max_hash_size, 2048);
    assert_eq!(cfg.output_mode, OutputMode::Simple);
    assert_eq!(cfg.algorithm, DigestAlgorithm::Blake3);
    assert_eq!(cfg.workers, Some(3));
    assert_eq!(cfg.report, report_before);
    assert!(!cfg.follow_links);
}

#[test]
fn test_settings_toml_rejects_unknown_algorithm() {
    assert!(parse_settings_toml("[settings]\nalgorithm = \"md5\"\n").is_err());
}
