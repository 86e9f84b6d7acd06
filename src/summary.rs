use std::path::Path;

use crate::clean::CleanResult;
use crate::config::CleaningPolicy;

/// Renders the end-of-run report shown to the user.
pub fn format(result: &CleanResult, policy: &CleaningPolicy) -> String {
    let mut out = String::new();
    let mib = result.bytes_freed as f64 / (1024.0 * 1024.0);

    if result.dry_run {
        out.push_str(&format!(
            "Dry Run: {} Files would be deleted\n",
            result.deleted_count
        ));
        out.push_str(&format!("Space to free: {mib:.1}MiB\n"));
    } else {
        out.push_str(&format!(
            "Clean Complete: {} Files deleted\n",
            result.deleted_count
        ));
        out.push_str(&format!("Space freed: {mib:.1}MiB\n"));
    }

    list_line(
        &mut out,
        "Directories cleaned:",
        result.cleaned.iter().map(|d| last_segment(d)),
    );
    let mut missing = policy
        .directories()
        .iter()
        .filter(|d| !result.cleaned.contains(d))
        .peekable();
    if missing.peek().is_some() {
        list_line(
            &mut out,
            "Directories not found:",
            missing.map(|d| last_segment(d)),
        );
    }
    list_line(
        &mut out,
        "Ignored files named:",
        policy.name_exceptions().iter().cloned(),
    );
    list_line(
        &mut out,
        "Ignored file extensions:",
        policy.extension_exceptions().iter().cloned(),
    );

    if !result.failures.is_empty() {
        out.push_str(&format!(
            "Failed to delete {} files:\n",
            result.failures.len()
        ));
        for failure in &result.failures {
            out.push_str(&format!("  {failure}\n"));
        }
    }

    out
}

fn list_line(out: &mut String, label: &str, items: impl Iterator<Item = String>) {
    out.push_str(label);
    for item in items {
        out.push(' ');
        out.push_str(&item);
    }
    out.push('\n');
}

fn last_segment(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
