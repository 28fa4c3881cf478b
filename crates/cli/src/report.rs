//! Human-readable output for retention plans and pruning results

use crate::util::{display_name, plural};
use owo_colors::{OwoColorize, Stream::Stdout};
use retention::RetentionPlan;
use std::io::{self, Write};
use std::path::PathBuf;
use store::PruneReport;

/// Print the keep list grouped by tier, then the delete list
pub fn print_plan(plan: &RetentionPlan<PathBuf>) -> io::Result<()> {
    write_plan(&mut io::stdout().lock(), plan)
}

/// Print what a pruning pass did
pub fn print_prune_report(report: &PruneReport) -> io::Result<()> {
    write_prune_report(&mut io::stdout().lock(), report)
}

fn write_plan(out: &mut impl Write, plan: &RetentionPlan<PathBuf>) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        "Keeping:".if_supports_color(Stdout, |t| t.bold()),
        plural(plan.keep.len(), "snapshot").if_supports_color(Stdout, |t| t.green())
    )?;

    for tier in &plan.tiers {
        writeln!(
            out,
            "  {} {}",
            format!("[{}]", tier.granularity).if_supports_color(Stdout, |t| t.yellow()),
            format!("{} of {}", tier.kept.len(), tier.count).if_supports_color(Stdout, |t| t.dimmed())
        )?;
        for snapshot in &tier.kept {
            writeln!(
                out,
                "    {}  {}",
                tier.granularity.key(snapshot.date).to_string().if_supports_color(Stdout, |t| t.cyan()),
                display_name(&snapshot.id)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "Deleting:".if_supports_color(Stdout, |t| t.bold()),
        plural(plan.delete.len(), "snapshot").if_supports_color(Stdout, |t| t.red())
    )?;
    if plan.delete.is_empty() {
        writeln!(out, "  {}", "nothing to delete".if_supports_color(Stdout, |t| t.dimmed()))?;
    }
    for path in &plan.delete {
        writeln!(out, "  {}", display_name(path))?;
    }

    Ok(())
}

fn write_prune_report(out: &mut impl Write, report: &PruneReport) -> io::Result<()> {
    if report.dry_run {
        return writeln!(
            out,
            "{} {}",
            "Would delete".if_supports_color(Stdout, |t| t.yellow()),
            plural(report.removed.len(), "snapshot")
        );
    }

    let removed = report.removed.len() + report.already_gone.len();
    writeln!(
        out,
        "{} {}",
        "Deleted".if_supports_color(Stdout, |t| t.green()),
        plural(removed, "snapshot")
    )?;

    for (path, reason) in &report.failed {
        writeln!(
            out,
            "{} {}: {}",
            "Failed:".if_supports_color(Stdout, |t| t.red()),
            path.display(),
            reason
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use retention::{compute_keep_and_delete, RetentionPolicy, Snapshot};

    fn daily(days: std::ops::RangeInclusive<u32>) -> Vec<Snapshot<PathBuf>> {
        days.map(|day| {
            Snapshot::new(
                NaiveDate::from_ymd_opt(2018, 1, day).unwrap(),
                PathBuf::from(format!("/backup/201801{:02}-120000", day)),
            )
        })
        .collect()
    }

    fn render(plan: &RetentionPlan<PathBuf>) -> String {
        owo_colors::set_override(false);
        let mut out = Vec::new();
        write_plan(&mut out, plan).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plan_lists_share_one_indent() {
        let policy = RetentionPolicy::default().with_days(1).with_weeks(0).with_months(0).with_years(0);
        let plan = compute_keep_and_delete(&daily(1..=3), &policy);
        let text = render(&plan);

        let lines: Vec<_> = text.lines().collect();
        let deleting = lines.iter().position(|l| l.starts_with("Deleting:")).unwrap();
        assert_eq!(lines[deleting], "Deleting: 2 snapshots");
        assert_eq!(lines[deleting + 1], "  20180101-120000");
        assert_eq!(lines[deleting + 2], "  20180102-120000");
        assert!(text.contains("    2018-01-03  20180103-120000"));
    }

    #[test]
    fn test_empty_delete_list_uses_same_indent() {
        let plan = compute_keep_and_delete(&daily(1..=2), &RetentionPolicy::default());
        let text = render(&plan);

        assert!(text.contains("Deleting: 0 snapshots\n  nothing to delete\n"));
    }

    #[test]
    fn test_failed_deletion_names_the_directory() {
        let report = PruneReport {
            failed: vec![(PathBuf::from("/backup/20180101-120000"), "busy".to_string())],
            ..Default::default()
        };
        owo_colors::set_override(false);
        let mut out = Vec::new();
        write_prune_report(&mut out, &report).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Deleted 0 snapshots\nFailed: /backup/20180101-120000: busy\n"
        );
    }
}
