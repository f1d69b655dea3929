//! # Group Diff CLI: Describe the change between two group snapshots.
//!
//! ```bash
//! roster group-diff --new after.json                     # "Group created."
//! roster group-diff --old before.json --new after.json --names names.yaml
//! roster group-diff --old before.json --new after.json --info
//! ```
//!
//! Snapshot files hold `group_id` (hex), `group_name`, `member_ids` and an
//! optional `avatar` digest (hex). The names file maps member ids to
//! display names.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use roster_core::{MemberId, RosterConfig};
use roster_groups::{GroupChangeDetector, GroupSnapshot};

/// Group-diff subcommand arguments.
#[derive(Args, Debug)]
pub struct GroupDiffArgs {
    /// Current snapshot file.
    #[arg(long)]
    pub new: PathBuf,

    /// Previous snapshot file. Omit for a newly seen group.
    #[arg(long)]
    pub old: Option<PathBuf>,

    /// Member display names (YAML or JSON map of member id to name).
    #[arg(long)]
    pub names: Option<PathBuf>,

    /// The local account's member id.
    #[arg(long)]
    pub local_member: Option<String>,

    /// Print the structured update info as JSON instead of descriptions.
    #[arg(long)]
    pub info: bool,
}

/// Execute the group-diff subcommand.
pub fn run_group_diff(args: &GroupDiffArgs, config: &RosterConfig) -> Result<u8> {
    let out = render_diff(args, config)?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(0)
}

/// Produce the subcommand's stdout text.
pub fn render_diff(args: &GroupDiffArgs, config: &RosterConfig) -> Result<String> {
    let mut detector = GroupChangeDetector::from_config(config);
    if let Some(local) = &args.local_member {
        let member = MemberId::new(local.as_str()).context("invalid --local-member")?;
        detector = detector.with_local_member(member);
    }

    let new: GroupSnapshot = crate::read_input(&args.new)?;
    let old = args
        .old
        .as_deref()
        .map(crate::read_input::<GroupSnapshot>)
        .transpose()?;
    let names: BTreeMap<MemberId, String> = match &args.names {
        Some(path) => crate::read_input(path)?,
        None => BTreeMap::new(),
    };
    let resolver = |member: &MemberId| names.get(member).cloned();

    tracing::debug!(
        group = %new.group_id(),
        has_previous = old.is_some(),
        known_names = names.len(),
        "diffing group snapshots"
    );

    if args.info {
        let info = detector.update_info(old.as_ref(), &new, &resolver);
        return serde_json::to_string_pretty(&info).context("failed to serialize update info");
    }

    Ok(detector
        .describe_change(old.as_ref(), &new, &resolver)
        .join("\n"))
}
