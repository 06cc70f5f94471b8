use fuzzer::engine::{
    FileWordlist, Renderer, WordSource, declared_content_length, is_length_hidden, is_status_hidden,
    read_lines, renderer_for, response_content_length,
};
use fuzzer::pipeline::{RunCounters, create_pipeline_channels, process_job};
use fuzzer::{FilterSpec, FuzzOpts, Opts, OutputMode, RunConfig, UrlTemplate, validate_threads};
use std::collections::HashSet;
use std::io::Write;
use std::sync::atomic::Ordering;
use std::time::Duration;

// --- UrlTemplate ---

#[test]
fn test_template_resolve_first_only() {
    let t = UrlTemplate::new("https://site.test/FUZZER?q=FUZZER").unwrap();
    assert_eq!(t.resolve("admin"), "https://site.test/admin?q=FUZZER");
}

#[test]
fn test_template_placeholder_anywhere() {
    let t = UrlTemplate::new("http://FUZZER.site.test/").unwrap();
    assert_eq!(t.resolve("dev"), "http://dev.site.test/");
}

#[test]
fn test_template_empty_job() {
    let t = UrlTemplate::new("http://site.test/FUZZER").unwrap();
    assert_eq!(t.resolve(""), "http://site.test/");
}

#[test]
fn test_template_is_case_sensitive() {
    assert!(UrlTemplate::new("http://site.test/fuzzer").is_err());
}

// --- filter predicates ---

#[test]
fn test_status_hidden() {
    let hidden: HashSet<u16> = [404, 403].into_iter().collect();
    assert!(is_status_hidden(404, &hidden));
    assert!(!is_status_hidden(200, &hidden));
    assert!(!is_status_hidden(200, &HashSet::new()));
}

#[test]
fn test_length_hidden() {
    let hidden: HashSet<i64> = [0, 5213].into_iter().collect();
    assert!(is_length_hidden(5213, &hidden));
    assert!(!is_length_hidden(5214, &hidden));
    assert!(!is_length_hidden(-1, &hidden));
}

// --- RunConfig ---

#[test]
fn test_run_config_validates_threads() {
    let t = UrlTemplate::new("http://x/FUZZER").unwrap();
    assert!(RunConfig::new(0, t.clone(), FilterSpec::default(), vec![]).is_err());
    let c = RunConfig::new(3, t, FilterSpec::default(), vec!["a".into()]).unwrap();
    assert_eq!(c.threads, 3);
    assert_eq!(c.jobs, vec!["a"]);
}

#[test]
fn test_validate_threads_error_message() {
    let msg = validate_threads(0).unwrap_err().to_string();
    assert!(msg.contains("at least 1"));
}

// --- wordlist ---

#[test]
fn test_wordlist_keeps_blank_lines() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"admin\n\n  spaced  \nlogin").unwrap();
    let jobs = FileWordlist::new(f.path()).load().unwrap();
    assert_eq!(jobs, vec!["admin", "", "  spaced  ", "login"]);
}

#[test]
fn test_wordlist_non_utf8_line_kept() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"admin\nlogin\ncaf\xe9\nbackup\n").unwrap();
    let jobs = FileWordlist::new(f.path()).load().unwrap();
    assert_eq!(jobs.len(), 4);
    assert_eq!(jobs[2], "caf%E9");
    let t = UrlTemplate::new("http://site.test/FUZZER").unwrap();
    assert_eq!(t.resolve(&jobs[2]), "http://site.test/caf%E9");
}

#[test]
fn test_read_lines_crlf() {
    assert_eq!(
        read_lines("a\r\nb\r\n".as_bytes()).unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
}

// --- fetch helpers ---

#[test]
fn test_declared_length_whitespace() {
    let mut h = reqwest::header::HeaderMap::new();
    h.insert(
        reqwest::header::CONTENT_LENGTH,
        reqwest::header::HeaderValue::from_static("42"),
    );
    assert_eq!(declared_content_length(&h), 42);
}

#[test]
fn test_not_modified_length_is_zero() {
    let h = reqwest::header::HeaderMap::new();
    assert_eq!(
        response_content_length(reqwest::StatusCode::NOT_MODIFIED, &h),
        0
    );
    assert_eq!(response_content_length(reqwest::StatusCode::OK, &h), -1);
}

// --- options ---

#[test]
fn test_fuzz_opts_from_opts() {
    let o = Opts {
        threads: 12,
        hidden_status_codes: vec![404],
        hidden_content_lengths: vec![0],
        timeout: Some(Duration::from_secs(4)),
        ..Opts::default()
    };
    let f = FuzzOpts::from(&o);
    assert_eq!(f.threads, 12);
    assert_eq!(f.timeout, Some(Duration::from_secs(4)));
    assert!(f.cancel.is_none());
    assert_eq!(f.filter(), FilterSpec::new([404], [0]));
}

#[test]
fn test_renderer_for_each_mode() {
    let hit = fuzzer::Hit {
        worker_id: 2,
        job: "login".into(),
        status_code: 404,
        content_length: 0,
    };
    let mut plain = Vec::new();
    renderer_for(OutputMode::Plain)
        .render(&hit, &mut plain)
        .unwrap();
    assert_eq!(
        String::from_utf8(plain).unwrap(),
        "Thread 2: login - Status: 404, Size: 0 bytes\n"
    );
    let mut json = Vec::new();
    renderer_for(OutputMode::Json)
        .render(&hit, &mut json)
        .unwrap();
    assert!(String::from_utf8(json).unwrap().contains("\"job\":\"login\""));
}

// --- pipeline pieces ---

#[test]
fn test_job_channel_holds_whole_wordlist() {
    let ch = create_pipeline_channels(500);
    for i in 0..500 {
        ch.job_tx.try_send(format!("w{i}")).unwrap();
    }
    assert!(ch.job_tx.try_send("overflow".into()).is_err());
}

#[test]
fn test_empty_job_channel_still_accepts_close() {
    let ch = create_pipeline_channels(0);
    drop(ch.job_tx);
    assert!(ch.job_rx.recv().is_err());
}

#[test]
fn test_counters_snapshot() {
    let c = RunCounters::default();
    c.dispatched.store(4, Ordering::Relaxed);
    c.accepted.store(2, Ordering::Relaxed);
    c.filtered.store(1, Ordering::Relaxed);
    c.failed.store(1, Ordering::Relaxed);
    let s = c.snapshot(10, true, Duration::from_millis(3));
    assert_eq!(
        (s.jobs, s.dispatched, s.accepted, s.filtered, s.failed),
        (10, 4, 2, 1, 1)
    );
    assert!(s.cancelled);
    // Cancel arriving after the last claim is not a cancelled run.
    c.dispatched.store(10, Ordering::Relaxed);
    assert!(!c.snapshot(10, true, Duration::ZERO).cancelled);
}

#[test]
fn test_process_job_applies_filter() {
    use fuzzer::engine::Fetch;
    use fuzzer::pipeline::WorkerContext;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    struct Fixed;
    impl Fetch for Fixed {
        fn fetch(&self, _url: &str) -> fuzzer::FetchOutcome {
            fuzzer::FetchOutcome::Success {
                status_code: 404,
                content_length: 9,
            }
        }
    }

    let ctx = WorkerContext {
        template: Arc::new(UrlTemplate::new("http://x/FUZZER").unwrap()),
        filter: Arc::new(FilterSpec::new([404], [])),
        fetcher: Arc::new(Fixed),
        cancel: Arc::new(AtomicBool::new(false)),
        counters: Arc::new(RunCounters::default()),
    };
    assert!(process_job(1, "x".into(), &ctx).is_none());
    assert_eq!(ctx.counters.filtered.load(Ordering::Relaxed), 1);

    let ctx = WorkerContext {
        filter: Arc::new(FilterSpec::default()),
        ..ctx
    };
    let hit = process_job(7, "x".into(), &ctx).unwrap();
    assert_eq!((hit.worker_id, hit.status_code, hit.content_length), (7, 404, 9));
    assert_eq!(ctx.counters.accepted.load(Ordering::Relaxed), 1);
}
