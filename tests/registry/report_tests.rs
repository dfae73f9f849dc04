use crate::common::{Counter, Greeter};
use method_stub::{Config, HistoryReport, ReportFormat, StubRegistry};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_report_covers_known_and_called_methods() {
    let registry = StubRegistry::new(Counter::default());
    registry.stub("get", |_: &Counter| 99u64).unwrap();
    registry.call::<u64>("inc", (3u64,)).unwrap();
    registry.call::<u64>("get", ()).unwrap();

    let report = registry.report();
    assert_eq!(report.subject, "Counter");
    assert_eq!(report.total_calls(), 2);

    let names: Vec<&str> = report.methods.iter().map(|m| m.method.as_str()).collect();
    assert_eq!(names, vec!["get", "inc", "reset"]);

    let inc = report.method("inc").unwrap();
    assert!(!inc.stubbed);
    assert_eq!(inc.calls, vec![vec!["3".to_string()]]);

    let get = report.method("get").unwrap();
    assert!(get.stubbed);
    assert_eq!(get.calls, vec![Vec::<String>::new()]);
}

#[test]
fn test_configured_report_format() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[report]\nformat = \"json\"\n\n[registry]\ntrace_dispatch = true").unwrap();
    let config = Config::load_from(file.path()).unwrap();

    let registry = StubRegistry::new(Greeter::new()).with_config(&config);
    registry.call::<String>("greet", (String::from("Ada"),)).unwrap();

    let rendered = registry.render_report().unwrap();
    let parsed: HistoryReport = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, registry.report());
    assert_eq!(
        parsed.method("greet").map(|m| m.calls.clone()),
        Some(vec![vec!["\"Ada\"".to_string()]])
    );
}

#[test]
fn test_default_report_is_text() {
    let registry = StubRegistry::new(Greeter::new());
    registry.call::<String>("greet", (String::from("Ada"),)).unwrap();

    let rendered = registry.render_report().unwrap();
    assert_eq!(rendered, registry.report().render(ReportFormat::Text).unwrap());
    assert!(rendered.contains("greet: 1 call(s)"));
}
