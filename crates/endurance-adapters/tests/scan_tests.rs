//! Usage scanning end to end over workspace-shaped trees.

use std::path::{Path, PathBuf};

use endurance_adapters::{LocalFilesystem, MemoryFilesystem};
use endurance_core::{
    application::{ApplicationError, UsageScanner},
    domain::{Conventions, ScanPattern, ScanRoot, UNKNOWN_MODULE},
    error::EnduranceError,
};

fn workspace() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.add_file(
        "/w/modules/user/user.service.js",
        "emitter.emit(eventTypes.USER_CREATED, payload);\n\
         const key = process.env.API_KEY;\n\
         emitter.emit(eventTypes.USER_DELETED, id);\n",
    )
    .add_file(
        "/w/modules/user/lib/token.js",
        "sign(process.env.API_KEY, process.env.JWT_SECRET)",
    )
    .add_file("/w/modules/user/README.md", "emitter.emit(eventTypes.IGNORED)")
    .add_file("/w/modules/billing/index.js", "module.exports = {};")
    .add_file(
        "/w/node_modules/endurance-core/lib/emitter.js",
        "this.emit(eventTypes.CORE_READY); const p = process.env.PORT;",
    )
    .add_file(
        "/w/node_modules/endurance-core/node_modules/dep/index.js",
        "emitter.emit(eventTypes.NESTED_DEPENDENCY)",
    )
    .add_file(
        "/w/node_modules/edrm-mailer/src/send.js",
        "emitter.emit(eventTypes.MAIL_SENT)",
    )
    .add_file("/w/node_modules/express/index.js", "emitter.emit(eventTypes.NOPE)");
    fs
}

fn scanner(fs: &MemoryFilesystem) -> UsageScanner {
    UsageScanner::new(Box::new(fs.clone()), Conventions::default())
}

fn symbols_and_labels(fs: &MemoryFilesystem, pattern: ScanPattern) -> Vec<(String, String)> {
    let scanner = scanner(fs);
    let roots = scanner.workspace_roots(Path::new("/w")).unwrap();
    scanner
        .scan(&roots, pattern)
        .unwrap()
        .findings
        .into_iter()
        .map(|f| (f.symbol, f.module_name))
        .collect()
}

#[test]
fn events_across_all_roots_in_discovery_order() {
    let fs = workspace();

    assert_eq!(
        symbols_and_labels(&fs, ScanPattern::Events),
        vec![
            ("eventTypes.USER_CREATED".into(), "user".into()),
            ("eventTypes.USER_DELETED".into(), "user".into()),
            ("eventTypes.CORE_READY".into(), "core".into()),
            ("eventTypes.MAIL_SENT".into(), "edrm-mailer".into()),
        ]
    );
}

#[test]
fn env_vars_are_not_deduplicated() {
    let fs = workspace();

    assert_eq!(
        symbols_and_labels(&fs, ScanPattern::EnvVars),
        vec![
            // lib/ sorts before user.service.js in the in-memory listing
            ("process.env.API_KEY".into(), "user".into()),
            ("process.env.JWT_SECRET".into(), "user".into()),
            ("process.env.API_KEY".into(), "user".into()),
            ("process.env.PORT".into(), "core".into()),
        ]
    );
}

#[test]
fn repeated_symbol_in_one_file_yields_one_finding_each() {
    let fs = MemoryFilesystem::new();
    fs.add_file(
        "/w/modules/config/env.js",
        "a(process.env.API_KEY);\nb(process.env.API_KEY);\n",
    );

    let report = scanner(&fs)
        .scan(&[ScanRoot::untagged("/w/modules")], ScanPattern::EnvVars)
        .unwrap();

    let file = PathBuf::from("/w/modules/config/env.js");
    let findings: Vec<_> = report.for_file(&file).collect();
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.symbol == "process.env.API_KEY"));
    assert!(findings.iter().all(|f| f.module_name == "config"));
}

#[test]
fn no_matches_anywhere_is_empty_report() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/w/modules/user/index.js", "module.exports = {};");

    let scanner = scanner(&fs);
    let roots = scanner.workspace_roots(Path::new("/w")).unwrap();
    let report = scanner.scan(&roots, ScanPattern::Events).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.files_scanned, 1);
}

#[test]
fn missing_modules_directory_fails() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/w/node_modules/edrm-mailer/index.js", "");

    let scanner = scanner(&fs);
    let roots = scanner.workspace_roots(Path::new("/w")).unwrap();
    let err = scanner.scan(&roots, ScanPattern::Events).unwrap_err();

    assert!(matches!(
        err,
        EnduranceError::Application(ApplicationError::ScanRootMissing { .. })
    ));
}

#[test]
fn files_directly_under_untagged_root_are_unknown() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/w/modules/index.js", "process.env.NODE_ENV");

    let report = scanner(&fs)
        .scan(&[ScanRoot::untagged("/w/modules")], ScanPattern::EnvVars)
        .unwrap();
    assert_eq!(report.findings[0].module_name, UNKNOWN_MODULE);
}

#[test]
fn custom_prefix_and_extension() {
    let fs = MemoryFilesystem::new();
    fs.add_dir("/w/modules")
        .add_file("/w/node_modules/acme-audit/hooks.mjs", "emit(eventTypes.AUDIT)")
        .add_file("/w/node_modules/acme-audit/hooks.js", "emit(eventTypes.SKIPPED)");
    let conventions = Conventions {
        package_prefix: "acme-".into(),
        source_extension: ".mjs".into(),
        ..Conventions::default()
    };

    let scanner = UsageScanner::new(Box::new(fs.clone()), conventions);
    let roots = scanner.workspace_roots(Path::new("/w")).unwrap();
    let report = scanner.scan(&roots, ScanPattern::Events).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].symbol, "eventTypes.AUDIT");
    assert_eq!(report.findings[0].module_name, "acme-audit");
}

#[test]
fn local_scan_of_real_tree() {
    let temp = tempfile::tempdir().unwrap();
    let module = temp.path().join("modules/payments");
    std::fs::create_dir_all(&module).unwrap();
    std::fs::write(
        module.join("payments.listener.js"),
        "emitter.emit(eventTypes.PAYMENT_CAPTURED, p);",
    )
    .unwrap();

    let scanner = UsageScanner::new(Box::new(LocalFilesystem::new()), Conventions::default());
    let roots = scanner.workspace_roots(temp.path()).unwrap();
    let report = scanner.scan(&roots, ScanPattern::Events).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].module_name, "payments");
    assert_eq!(
        report.findings[0].file_path,
        module.join("payments.listener.js")
    );
}

#[cfg(unix)]
#[test]
fn local_scan_survives_symlink_loop() {
    let temp = tempfile::tempdir().unwrap();
    let user = temp.path().join("modules/user");
    std::fs::create_dir_all(user.join("lib")).unwrap();
    std::fs::write(user.join("user.service.js"), "const s = process.env.JWT_SECRET;").unwrap();
    std::os::unix::fs::symlink(&user, user.join("loop")).unwrap();
    std::os::unix::fs::symlink(&user, user.join("lib/back")).unwrap();

    let scanner = UsageScanner::new(Box::new(LocalFilesystem::new()), Conventions::default());
    let roots = scanner.workspace_roots(temp.path()).unwrap();
    let report = scanner.scan(&roots, ScanPattern::EnvVars).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].symbol, "process.env.JWT_SECRET");
    assert_eq!(report.findings[0].module_name, "user");
}
