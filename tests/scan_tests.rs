//! End-to-end scanning tests against files on disk

use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use lscmd::{scan_paths, DefinitionKind, FileOrder, ScanError, ScanOptions};

fn write(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_alias_and_function_end_to_end() {
    let dir = tempdir().unwrap();
    let rc = write(
        dir.path(),
        ".bashrc",
        "alias ll='ls -la'\nfunction greet() {\n  echo \"hi\"\n}\n",
    );

    let report = scan_paths(&[rc.clone()], &ScanOptions::default()).unwrap();
    let defs: Vec<_> = report.inventory.iter().collect();

    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "ll");
    assert_eq!(defs[0].kind, DefinitionKind::Alias);
    assert_eq!(defs[0].body, "ls -la");
    assert_eq!(defs[0].line, 1);
    assert_eq!(defs[0].file, rc);

    assert_eq!(defs[1].name, "greet");
    assert_eq!(defs[1].kind, DefinitionKind::Function);
    assert_eq!(defs[1].body, "echo \"hi\"\n");
    assert_eq!(defs[1].line, 2);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_scanning_twice_is_identical() {
    let dir = tempdir().unwrap();
    let a = write(
        dir.path(),
        "a.bash",
        "alias x=1\nf() {\n  { nested; }\n}\nalias x=2\n",
    );
    let b = write(dir.path(), "b.zsh", "alias y=3\nalias x=4\n");
    let files = vec![a, b];

    let first = scan_paths(&files, &ScanOptions::default()).unwrap();
    let second = scan_paths(&files, &ScanOptions::default()).unwrap();

    assert_eq!(first.inventory, second.inventory);
    let order: Vec<_> = first.inventory.iter().map(|d| d.name.clone()).collect();
    assert_eq!(order, vec!["x", "f", "y"]);
}

#[test]
fn test_later_file_shadows_earlier() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.sh", "alias x='from a'\n");
    let b = write(dir.path(), "b.sh", "alias x='from b'\n");

    let report = scan_paths(&[a.clone(), b.clone()], &ScanOptions::default()).unwrap();
    let live = report.inventory.get(DefinitionKind::Alias, "x").unwrap();
    assert_eq!(live.body, "from b");
    assert_eq!(live.file, b);

    let shadowed = report.inventory.shadowed("x");
    assert_eq!(shadowed.len(), 1);
    assert_eq!(shadowed[0].body, "from a");
    assert_eq!(shadowed[0].file, a);

    // Reversing the order reverses the outcome
    let report = scan_paths(&[b, a], &ScanOptions::default()).unwrap();
    assert_eq!(
        report.inventory.get(DefinitionKind::Alias, "x").unwrap().body,
        "from a"
    );
}

#[test]
fn test_function_shadows_alias_of_same_name() {
    let dir = tempdir().unwrap();
    let rc = write(dir.path(), ".bashrc", "alias x='ls'\nx() { echo; }\n");

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    assert_eq!(report.inventory.len(), 1);
    let live = report.inventory.get(DefinitionKind::Function, "x").unwrap();
    assert_eq!(live.line, 2);

    let shadowed = report.inventory.shadowed("x");
    assert_eq!(shadowed.len(), 1);
    assert_eq!(shadowed[0].kind, DefinitionKind::Alias);
    assert_eq!(shadowed[0].body, "ls");
}

#[test]
fn test_sorted_order() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.sh", "alias x=a\n");
    let b = write(dir.path(), "b.sh", "alias x=b\n");

    let options = ScanOptions {
        order: FileOrder::Lexicographic,
        ..ScanOptions::default()
    };
    let report = scan_paths(&[b, a], &options).unwrap();
    assert_eq!(
        report.inventory.get(DefinitionKind::Alias, "x").unwrap().body,
        "b"
    );
}

#[test]
fn test_truncated_file_keeps_earlier_definitions() {
    let dir = tempdir().unwrap();
    let rc = write(
        dir.path(),
        ".bashrc",
        "alias ok='fine'\nalias x='unterminated\nalias never=1\n",
    );

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    assert_eq!(report.inventory.len(), 1);
    assert!(report.inventory.get(DefinitionKind::Alias, "ok").is_some());
    assert!(report.inventory.get(DefinitionKind::Alias, "x").is_none());

    assert_eq!(report.diagnostics.len(), 1);
    match &report.diagnostics[0] {
        ScanError::TruncatedInput { line, .. } => assert_eq!(*line, 2),
        other => panic!("unexpected diagnostic: {}", other),
    }
}

#[test]
fn test_unsupported_file_does_not_stop_scan() {
    let dir = tempdir().unwrap();
    let script = write(dir.path(), "tool", "#!/usr/bin/env python3\nalias = 1\n");
    let rc = write(dir.path(), ".zshrc", "alias g=git\n");

    let report = scan_paths(&[script, rc], &ScanOptions::default()).unwrap();
    assert_eq!(report.files_read, 2);
    assert_eq!(report.inventory.len(), 1);
    assert!(matches!(
        report.diagnostics[0],
        ScanError::UnsupportedDialect { .. }
    ));
}

#[test]
fn test_missing_file_is_diagnostic() {
    let dir = tempdir().unwrap();
    let rc = write(dir.path(), ".profile", "alias a=1\n");
    let missing = dir.path().join(".bashrc");

    let report = scan_paths(&[missing, rc], &ScanOptions::default()).unwrap();
    assert_eq!(report.files_read, 1);
    assert!(matches!(report.diagnostics[0], ScanError::Io { .. }));
}

#[test]
fn test_nothing_readable() {
    let dir = tempdir().unwrap();
    let err = scan_paths(&[dir.path().join("nope")], &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::NoInputAvailable));

    let err = scan_paths(&[], &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::NoInputAvailable));
}

#[test]
fn test_deeply_nested_function_body() {
    let dir = tempdir().unwrap();
    let body = concat!(
        "if a; then\n",
        "  while b; do\n",
        "    { c; }\n",
        "    case $x in\n",
        "      y) echo '}' ;;\n",
        "    esac\n",
        "  done\n",
        "fi\n",
    );
    let indented: String = body.lines().map(|l| format!("    {}\n", l)).collect();
    let rc = write(
        dir.path(),
        "deep.bash",
        &format!("deep() {{\n{}}}\nalias after=1\n", indented),
    );

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    let deep = report.inventory.get(DefinitionKind::Function, "deep").unwrap();
    assert_eq!(deep.body, body);
    assert!(report.inventory.get(DefinitionKind::Alias, "after").is_some());
}

#[test]
fn test_alias_quoting_forms() {
    let dir = tempdir().unwrap();
    let rc = write(
        dir.path(),
        ".bash_aliases",
        concat!(
            "alias a=1 b='two words'\n",
            "alias empty=\n",
            "alias dq=\"echo 'inner'\"\n",
            "alias tab=$'a\\tb'\n",
            "alias 'q=quoted whole'\n",
        ),
    );

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    let body = |name: &str| {
        report
            .inventory
            .get(DefinitionKind::Alias, name)
            .map(|d| d.body.clone())
    };
    assert_eq!(body("a").as_deref(), Some("1"));
    assert_eq!(body("b").as_deref(), Some("two words"));
    assert_eq!(body("empty").as_deref(), Some(""));
    assert_eq!(body("dq").as_deref(), Some("echo 'inner'"));
    assert_eq!(body("tab").as_deref(), Some("a\\tb"));
    assert_eq!(body("q").as_deref(), Some("quoted whole"));
}

#[test]
fn test_command_substitutions_keep_the_file_readable() {
    let dir = tempdir().unwrap();
    let rc = write(
        dir.path(),
        ".bashrc",
        concat!(
            "alias now=`date +%s`\n",
            "f() {\n",
            "  local x=\"$(printf '%s' \"it's\")\"\n",
            "}\n",
            "alias after=1\n",
        ),
    );

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    assert!(report.diagnostics.is_empty());
    let names: Vec<_> = report.inventory.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["now", "f", "after"]);
    assert_eq!(
        report.inventory.get(DefinitionKind::Alias, "now").unwrap().body,
        "`date +%s`"
    );
}

#[test]
fn test_case_arm_definitions() {
    let dir = tempdir().unwrap();
    let rc = write(
        dir.path(),
        ".zshrc",
        concat!(
            "case \"$OSTYPE\" in\n",
            "  darwin*) alias ls='ls -G' ;;\n",
            "  linux*) alias ls='ls --color' ;;\n",
            "esac\n",
        ),
    );

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    let ls = report.inventory.get(DefinitionKind::Alias, "ls").unwrap();
    assert_eq!(ls.body, "ls --color");
    assert_eq!(ls.line, 3);
    assert_eq!(report.inventory.shadowed("ls")[0].body, "ls -G");
}

#[test]
fn test_malformed_name_skips_only_that_candidate() {
    let dir = tempdir().unwrap();
    let rc = write(dir.path(), ".profile", "alias good=1 $bad=2 other=3\n");

    let report = scan_paths(&[rc], &ScanOptions::default()).unwrap();
    assert_eq!(report.inventory.len(), 2);
    assert!(matches!(
        report.diagnostics[0],
        ScanError::MalformedName { .. }
    ));
}

#[test]
fn test_crlf_and_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".bashrc");
    let mut bytes = b"\xEF\xBB\xBFalias w='win'\r\nhi() {\r\n  echo \xFF\r\n}\r\n".to_vec();
    bytes.extend_from_slice(b"alias z=1\r\n");
    fs::write(&path, bytes).unwrap();

    let report = scan_paths(&[path], &ScanOptions::default()).unwrap();
    assert_eq!(
        report.inventory.get(DefinitionKind::Alias, "w").unwrap().body,
        "win"
    );
    let hi = report.inventory.get(DefinitionKind::Function, "hi").unwrap();
    assert!(hi.body.starts_with("echo "));
    assert!(!hi.body.contains('\r'));
    assert!(report.inventory.get(DefinitionKind::Alias, "z").is_some());
}

#[test]
fn test_powershell_profile() {
    let dir = tempdir().unwrap();
    let profile = write(
        dir.path(),
        "Microsoft.PowerShell_profile.ps1",
        concat!(
            "$env:PATH = @\"\n",
            "function NotReal { }\n",
            "\"@\n",
            "Set-Alias -Name g -Value git\n",
            "function Get-Greeting {\n",
            "    param([string]$Who)\n",
            "    Write-Output \"Hello $Who\"\n",
            "}\n",
        ),
    );

    let report = scan_paths(&[profile], &ScanOptions::default()).unwrap();
    let names: Vec<_> = report.inventory.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["g", "Get-Greeting"]);
    assert_eq!(
        report
            .inventory
            .get(DefinitionKind::Function, "Get-Greeting")
            .unwrap()
            .body,
        "param([string]$Who)\nWrite-Output \"Hello $Who\"\n"
    );
}

#[test]
fn test_dialect_override() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "aliases.txt", "alias k=kubectl\n");

    let report = scan_paths(&[file.clone()], &ScanOptions::default()).unwrap();
    assert!(report.inventory.is_empty());

    let options = ScanOptions {
        dialect: Some(lscmd::Dialect::Bash),
        ..ScanOptions::default()
    };
    let report = scan_paths(&[file], &options).unwrap();
    assert_eq!(report.inventory.len(), 1);
}
