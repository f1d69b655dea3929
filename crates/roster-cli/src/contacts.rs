//! # Contacts CLI: Resolve an address book against a directory.
//!
//! ```bash
//! roster contacts --contacts book.yaml --directory directory.yaml
//! roster contacts --contacts book.json --directory directory.yaml --region GB
//! ```
//!
//! The contacts file is a list of raw records (`unique_id`, `first_name`,
//! `last_name`, `phone_numbers`, `emails`). The directory file maps E.164
//! numbers to network identities.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use roster_contacts::{
    sort_contacts, ContactIdentity, DirectoryResolver, InMemoryDirectory, RawContactRecord,
    ResolvedIdentity,
};
use roster_core::{NameOrdering, NetworkId, RosterConfig};
use roster_phone::{PhoneNumber, PhoneNumberNormalizer, Region};

/// Contacts subcommand arguments.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Address book file (YAML or JSON list of contact records).
    #[arg(long)]
    pub contacts: PathBuf,

    /// Directory file mapping E.164 numbers to network identities.
    #[arg(long)]
    pub directory: PathBuf,

    /// Sort order. Overrides the configuration file.
    #[arg(long, value_enum)]
    pub ordering: Option<OrderingArg>,

    /// Default region for numbers without a country code (e.g. US, GB).
    #[arg(long)]
    pub region: Option<String>,

    /// The account's own number; its region takes precedence.
    #[arg(long)]
    pub local_number: Option<String>,
}

/// Name ordering as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderingArg {
    FirstLast,
    LastFirst,
}

impl From<OrderingArg> for NameOrdering {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::FirstLast => NameOrdering::FirstLast,
            OrderingArg::LastFirst => NameOrdering::LastFirst,
        }
    }
}

/// One output row: the contact plus its directory matches.
#[derive(Debug, Serialize)]
pub struct ContactReport {
    #[serde(flatten)]
    pub contact: ContactIdentity,
    pub is_signal_contact: bool,
    pub matched_network_ids: Vec<NetworkId>,
}

/// Execute the contacts subcommand.
pub fn run_contacts(args: &ContactsArgs, config: &RosterConfig) -> Result<u8> {
    let reports = build_reports(args, config)?;
    let json = serde_json::to_string_pretty(&reports).context("failed to serialize contacts")?;
    println!("{json}");
    Ok(0)
}

/// Load, normalize, sort and resolve the address book.
pub fn build_reports(args: &ContactsArgs, config: &RosterConfig) -> Result<Vec<ContactReport>> {
    let config = effective_config(args, config)?;
    let region = Region::from_config(&config).context("invalid region")?;
    let normalizer = PhoneNumberNormalizer::new(region);

    let records: Vec<RawContactRecord> = crate::read_input(&args.contacts)?;
    let entries: BTreeMap<PhoneNumber, NetworkId> = crate::read_input(&args.directory)?;
    let directory: InMemoryDirectory = entries.into_iter().collect();

    tracing::info!(
        contacts = records.len(),
        directory_entries = directory.len(),
        region = %normalizer.region(),
        "resolving address book"
    );

    let mut contacts: Vec<ContactIdentity> = records
        .into_iter()
        .map(|record| ContactIdentity::from_record(record, &normalizer))
        .collect();
    sort_contacts(&mut contacts, config.name_ordering);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let resolver = DirectoryResolver::from_config(&config);
    let resolved = runtime.block_on(resolver.resolve_batch(&contacts, Arc::new(directory)));

    Ok(contacts
        .into_iter()
        .zip(resolved)
        .map(|(contact, resolved)| report(contact, &resolved))
        .collect())
}

fn effective_config(args: &ContactsArgs, config: &RosterConfig) -> Result<RosterConfig> {
    let mut config = config.clone();
    if let Some(region) = &args.region {
        config.default_region = region.clone();
    }
    if let Some(local) = &args.local_number {
        config.local_number = Some(local.clone());
    }
    if let Some(ordering) = args.ordering {
        config.name_ordering = ordering.into();
    }
    config.validate().context("invalid command-line overrides")?;
    Ok(config)
}

fn report(contact: ContactIdentity, resolved: &ResolvedIdentity) -> ContactReport {
    ContactReport {
        is_signal_contact: resolved.is_signal_contact(),
        matched_network_ids: resolved.signal_identifiers(),
        contact,
    }
}
