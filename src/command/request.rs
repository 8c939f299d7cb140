use std::fmt;

use clap::ValueEnum;

use crate::dns::ZoneType;

/// Operations accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    #[value(name = "list_primary_zone")]
    ListPrimaryZones,
    #[value(name = "list_secondary_zone")]
    ListSecondaryZones,
    #[value(name = "add_secondary_zone")]
    AddSecondaryZone,
    #[value(name = "delete_zone")]
    DeleteZone,
    #[value(name = "promote_zone")]
    PromoteZone,
    #[value(name = "delete_a")]
    DeleteARecord,
    #[value(name = "add_web")]
    AddWeb,
    #[value(name = "add_slb")]
    AddSlb,
    #[value(name = "add_tc")]
    AddTc,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::ListPrimaryZones => "list_primary_zone",
            Command::ListSecondaryZones => "list_secondary_zone",
            Command::AddSecondaryZone => "add_secondary_zone",
            Command::DeleteZone => "delete_zone",
            Command::PromoteZone => "promote_zone",
            Command::DeleteARecord => "delete_a",
            Command::AddWeb => "add_web",
            Command::AddSlb => "add_slb",
            Command::AddTc => "add_tc",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated option values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub zone: Option<String>,
    pub a_record: Option<String>,
    pub primary_ns: Option<String>,
}

/// Option names a command may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Zone,
    ARecord,
    PrimaryNs,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Zone => "zone",
            Field::ARecord => "a_record",
            Field::PrimaryNs => "primary_ns",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Field::Zone => "-z/--zone",
            Field::ARecord => "-a/--a-record",
            Field::PrimaryNs => "-p/--primary-ns",
        }
    }

    pub fn purpose(&self) -> &'static str {
        match self {
            Field::Zone => "zone to run query against",
            Field::ARecord => "A record to delete",
            Field::PrimaryNs => "primary NS to receive zone xfer from",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    ListZones {
        zone_type: ZoneType,
        name_filter: Option<String>,
    },
    AddSecondaryZone {
        zone_name: String,
        primary_ns: String,
    },
    DeleteZone {
        zone_name: String,
    },
    PromoteZone {
        zone_name: String,
    },
    DeleteARecord {
        zone_name: String,
        record_name: String,
    },
}

/// A command together with every parameter it needs.
///
/// Only [`validate`](super::validate) builds these, so every name is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    kind: RequestKind,
}

impl Request {
    pub(super) fn new(kind: RequestKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    pub fn zone_name(&self) -> Option<&str> {
        match &self.kind {
            RequestKind::ListZones { name_filter, .. } => name_filter.as_deref(),
            RequestKind::AddSecondaryZone { zone_name, .. }
            | RequestKind::DeleteZone { zone_name }
            | RequestKind::PromoteZone { zone_name }
            | RequestKind::DeleteARecord { zone_name, .. } => Some(zone_name),
        }
    }
}
