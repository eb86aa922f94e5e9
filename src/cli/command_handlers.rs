use log::{debug, info, warn};

use crate::{
    api::LockMode,
    model::{
        lock::{LockEntry, LockSnapshot},
        lock_file::LockFile,
        ConfigurationKey, ModuleKey,
    },
    recorder::LockRecorder,
    resolution::ResolutionReport,
};
use std::{
    collections::BTreeSet,
    error::Error,
    path::{Path, PathBuf},
};

/// Handler to record command
/// Records every resolution report and writes or verifies the lock file
pub fn do_record(
    lock_mode: LockMode,
    root: &Path,
    lock_file_name: &Path,
    report_paths: &[PathBuf],
) -> Result<LockSnapshot, Box<dyn Error>> {
    let reports = report_paths
        .iter()
        .map(|path| load_report(&root.join(path)))
        .collect::<Result<Vec<_>, _>>()?;
    warn_duplicate_configurations(&reports);

    let recorder = LockRecorder::new();
    record_reports(&recorder, &reports)?;
    let snapshot = recorder.into_dependency_lock().into_snapshot();
    let lockfile = LockFile::from(&snapshot);

    let lock_file_path = root.join(lock_file_name);

    match (lock_mode, lock_file_path.exists()) {
        (LockMode::Locked, false) => return Err("Lock file does not exist".into()),

        (LockMode::Locked, true) => {
            debug!("Verifying lockfile...");
            let old_lock = LockSnapshot::from(load_lock_file(&lock_file_path)?);
            if old_lock != snapshot {
                return Err(format!(
                    "Lock file {} is out of date, run `deplock record` to update it",
                    lock_file_path.display()
                )
                .into());
            }
            debug!("Lockfile is up to date");
        }

        (LockMode::Update, exists) => {
            let old_lock = if exists {
                Some(LockSnapshot::from(load_lock_file(&lock_file_path)?))
            } else {
                None
            };

            debug!("Generated lockfile: {:?}", lockfile);

            if old_lock.is_some_and(|old_lock| old_lock == snapshot) {
                debug!("Lockfile is up to date");
            } else {
                std::fs::write(&lock_file_path, lockfile.to_string()?)?;
                info!("Wrote lockfile to {}", lock_file_path.display());
            }
        }
    }

    Ok(snapshot)
}

/// Handler to show command
pub fn do_show(
    root: &Path,
    lock_file_name: &Path,
    module: Option<&ModuleKey>,
) -> Result<(), Box<dyn Error>> {
    let snapshot = LockSnapshot::from(load_lock_file(&root.join(lock_file_name))?);
    for line in render_entries(&snapshot, module) {
        println!("{}", line);
    }
    Ok(())
}

fn render_entries(snapshot: &LockSnapshot, module: Option<&ModuleKey>) -> Vec<String> {
    snapshot
        .entries()
        .filter(|entry| module.map_or(true, |module| entry.module == module))
        .map(render_entry)
        .collect()
}

fn render_entry(entry: LockEntry<'_>) -> String {
    format!("{} {} {}", entry.configuration, entry.module, entry.version)
}

fn record_reports(
    recorder: &LockRecorder,
    reports: &[ResolutionReport],
) -> Result<(), Box<dyn Error>> {
    std::thread::scope(|scope| -> Result<(), Box<dyn Error>> {
        let handles = reports
            .iter()
            .map(|report| {
                scope.spawn(move || {
                    recorder.resolve_and_persist(&report.project, &report.configuration, report)
                })
            })
            .collect::<Vec<_>>();

        for (report, handle) in reports.iter().zip(handles) {
            let summary = handle
                .join()
                .map_err(|_| "Recording thread panicked")??;
            info!(
                "Locked {} dependencies of {} ({})",
                summary.recorded, report.project, report.configuration
            );
        }
        Ok(())
    })
}

fn warn_duplicate_configurations(reports: &[ResolutionReport]) {
    let mut seen = BTreeSet::new();
    for report in reports {
        let configuration = ConfigurationKey::new(&report.project, &report.configuration);
        if !seen.insert(configuration.clone()) {
            warn!(
                "Configuration {} is reported more than once, entries may overwrite each other",
                configuration
            );
        }
    }
}

fn load_report(path: &Path) -> Result<ResolutionReport, Box<dyn Error>> {
    let report = ResolutionReport::from_str(&std::fs::read_to_string(path)?)
        .map_err(|err| format!("Could not parse report {}: {}", path.display(), err))?;
    Ok(report)
}

fn load_lock_file(path: &Path) -> Result<LockFile, Box<dyn Error>> {
    let lock_file = LockFile::from_str(&std::fs::read_to_string(path)?)
        .map_err(|err| format!("Could not parse lock file {}: {}", path.display(), err))?;
    Ok(lock_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const APP_COMPILE: &str = r#"
project = ":app"
configuration = "compile"

[[dependencies]]
requested = { kind = "module", group = "com.example", module = "lib", version = "1.+" }
status = "resolved"
selected = { group = "com.example", module = "lib", version = "1.3.0" }

[[dependencies]]
requested = { kind = "project", path = ":other-module" }
status = "resolved"
selected = { group = "build", module = "other-module", version = "unspecified" }
"#;

    const APP_TEST: &str = r#"
project = ":app"
configuration = "test"

[[dependencies]]
requested = { kind = "module", group = "org.junit", module = "junit", version = "4.+" }
status = "resolved"
selected = { group = "org.junit", module = "junit", version = "4.13.2" }

[[dependencies]]
requested = { kind = "module", group = "org.missing", module = "gone" }
status = "failed"
reason = "Could not find org.missing:gone"
"#;

    fn write_reports(root: &Path) -> Vec<PathBuf> {
        std::fs::write(root.join("compile.toml"), APP_COMPILE).unwrap();
        std::fs::write(root.join("test.toml"), APP_TEST).unwrap();
        vec![PathBuf::from("test.toml"), PathBuf::from("compile.toml")]
    }

    #[test]
    fn record_writes_lock_file() {
        let root = tempfile::tempdir().unwrap();
        let reports = write_reports(root.path());
        let lock_file_name = Path::new("dependencies.lock");

        let snapshot =
            do_record(LockMode::Update, root.path(), lock_file_name, &reports).unwrap();

        assert_eq!(
            render_entries(&snapshot, None),
            vec![
                ":app (compile) com.example:lib 1.+ -> 1.3.0",
                ":app (test) org.junit:junit 4.+ -> 4.13.2",
            ]
        );
        let written = load_lock_file(&root.path().join(lock_file_name)).unwrap();
        assert_eq!(LockSnapshot::from(written), snapshot);
    }

    #[test]
    fn locked_mode_verifies_lock_file() {
        let root = tempfile::tempdir().unwrap();
        let reports = write_reports(root.path());
        let lock_file_name = Path::new("dependencies.lock");

        do_record(LockMode::Locked, root.path(), lock_file_name, &reports)
            .expect_err("lock file is missing");

        do_record(LockMode::Update, root.path(), lock_file_name, &reports).unwrap();
        do_record(LockMode::Locked, root.path(), lock_file_name, &reports).unwrap();

        std::fs::write(
            root.path().join("compile.toml"),
            APP_COMPILE.replace("1.3.0", "1.4.0"),
        )
        .unwrap();
        do_record(LockMode::Locked, root.path(), lock_file_name, &reports)
            .expect_err("lock file is out of date");
    }

    #[test]
    fn update_mode_keeps_unreadable_lock_file() {
        let root = tempfile::tempdir().unwrap();
        let reports = write_reports(root.path());
        let lock_file_path = root.path().join("dependencies.lock");
        let newer = "version = 2\nsomething = \"new\"\n";
        std::fs::write(&lock_file_path, newer).unwrap();

        do_record(
            LockMode::Update,
            root.path(),
            Path::new("dependencies.lock"),
            &reports,
        )
        .expect_err("lock file version is not supported");
        assert_eq!(std::fs::read_to_string(&lock_file_path).unwrap(), newer);
    }

    #[test]
    fn locked_mode_ignores_configurations_without_dependencies() {
        let root = tempfile::tempdir().unwrap();
        let reports = write_reports(root.path());
        let lock_file_name = Path::new("dependencies.lock");
        do_record(LockMode::Update, root.path(), lock_file_name, &reports).unwrap();

        let lock_file_path = root.path().join(lock_file_name);
        let mut edited = std::fs::read_to_string(&lock_file_path).unwrap();
        edited.push_str(
            "\n[[configurations]]\nproject = \":lib\"\nconfiguration = \"compile\"\n",
        );
        std::fs::write(&lock_file_path, edited).unwrap();

        do_record(LockMode::Locked, root.path(), lock_file_name, &reports).unwrap();
    }

    #[test]
    fn show_filters_by_module() {
        let root = tempfile::tempdir().unwrap();
        let reports = write_reports(root.path());
        let snapshot = do_record(
            LockMode::Update,
            root.path(),
            Path::new("dependencies.lock"),
            &reports,
        )
        .unwrap();

        let module = "org.junit:junit".parse::<ModuleKey>().unwrap();
        assert_eq!(
            render_entries(&snapshot, Some(&module)),
            vec![":app (test) org.junit:junit 4.+ -> 4.13.2"]
        );
    }

    #[test]
    fn unparsable_report_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("broken.toml"), "project = ").unwrap();

        let result = do_record(
            LockMode::Update,
            root.path(),
            Path::new("dependencies.lock"),
            &[PathBuf::from("broken.toml")],
        );
        assert!(result.is_err());
        assert!(!root.path().join("dependencies.lock").exists());
    }
}
