pub mod prompt;

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::application::{ProvisionError, ProvisioningService, RunReport, RunRequest, Target};
use crate::config::Config;
use crate::domain::{InvalidIdentifierError, ResourceIdentifier, ResourceKind, TopicHandle};
use crate::ports::{AuthError, CloudHandle, ConfirmProceed};

const EXAMPLES: &str = "\
Examples:
  # Create alarms for all running VMs in a compartment
  oci-vm-alarms --compartment ocid1.compartment.oc1..abc123 --topic ocid1.onstopic.oc1..def456

  # Create an alarm for one VM (compartment detected from the instance)
  oci-vm-alarms --vm-ocid ocid1.instance.oc1.iad.anuwcljr --topic ocid1.onstopic.oc1..def456

  # Non-interactive mode for automation
  oci-vm-alarms --vm-ocid ocid1.instance.oc1..ghi789 --topic ocid1.onstopic.oc1..def456 --non-interactive

  # Find the topic to use
  oci-vm-alarms --compartment ocid1.compartment.oc1..abc123 --list-topics";

/// Create OCI VM liveness alarms wired to a notification topic
#[derive(Debug, Parser)]
#[command(name = "oci-vm-alarms", version, after_help = EXAMPLES)]
pub struct Args {
    /// OCID of the compartment whose running VMs get alarms (all-VMs mode)
    #[arg(long, visible_alias = "compartment-ocid", value_name = "OCID")]
    pub compartment: Option<String>,

    /// OCID of a single VM instance to monitor (single-VM mode)
    #[arg(long = "vm-ocid", visible_alias = "vm-instance-ocid", value_name = "OCID")]
    pub vm_ocid: Option<String>,

    /// OCID of the notification topic alarms publish to
    #[arg(long, visible_alias = "notification-topic", value_name = "OCID")]
    pub topic: Option<String>,

    /// Skip interactive prompts for automation/scripting
    #[arg(long)]
    pub non_interactive: bool,

    /// List notification topics in --compartment and exit
    #[arg(long)]
    pub list_topics: bool,

    /// Profile in the OCI config file [env: OCI_CLI_PROFILE]
    #[arg(long)]
    pub profile: Option<String>,

    /// Path of the OCI config file [env: OCI_CONFIG_FILE]
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("--compartment and --vm-ocid are mutually exclusive")]
    ConflictingTargets,

    #[error("either --compartment or --vm-ocid is required")]
    MissingTarget,

    #[error("--topic is required")]
    MissingTopic,

    #[error("--list-topics requires --compartment")]
    ListTopicsNeedsCompartment,

    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),
}

/// Anything that ends the process with a non-zero status before a report exists
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

impl RunError {
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Auth(_) | Self::Provision(_) => 1,
        }
    }

    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            Self::Usage(_) => Some("Run with --help for usage."),
            Self::Auth(e) => e.remedy(),
            Self::Provision(ProvisionError::TopicNotFound { .. }) => {
                Some("Please check the topic OCID and try again.")
            }
            Self::Provision(_) => None,
        }
    }
}

/// What the arguments ask for, with every identifier validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Provision(RunRequest),
    ListTopics(ResourceIdentifier),
}

impl Command {
    pub fn from_args(args: &Args) -> Result<Self, UsageError> {
        if args.list_topics {
            let compartment = match (&args.compartment, &args.vm_ocid) {
                (Some(compartment), None) => compartment,
                _ => return Err(UsageError::ListTopicsNeedsCompartment),
            };
            let compartment = ResourceIdentifier::validate(compartment.as_str(), ResourceKind::Compartment)?;
            return Ok(Self::ListTopics(compartment));
        }

        let target = match (&args.compartment, &args.vm_ocid) {
            (Some(_), Some(_)) => return Err(UsageError::ConflictingTargets),
            (None, None) => return Err(UsageError::MissingTarget),
            (None, Some(vm)) => Target::Instance(ResourceIdentifier::validate(vm.as_str(), ResourceKind::Instance)?),
            (Some(compartment), None) => Target::Compartment(ResourceIdentifier::validate(
                compartment.as_str(),
                ResourceKind::Compartment,
            )?),
        };

        let topic = args.topic.as_deref().ok_or(UsageError::MissingTopic)?;
        let topic = ResourceIdentifier::validate(topic, ResourceKind::Topic)?;

        Ok(Self::Provision(RunRequest { target, topic }))
    }
}

/// Successful end of a CLI invocation
#[derive(Debug)]
pub enum CliOutcome {
    Provisioned(RunReport),
    ListedTopics(Vec<TopicHandle>),
}

impl CliOutcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Provisioned(report) if !report.succeeded() => 1,
            _ => 0,
        }
    }
}

/// What gets printed on stdout once the command is done
impl fmt::Display for CliOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provisioned(report) => {
                write!(f, "{report}")?;
                if let Some(verdict) = report.verdict() {
                    writeln!(f, "{verdict}")?;
                }
                Ok(())
            }
            Self::ListedTopics(topics) if topics.is_empty() => writeln!(f, "No notification topics found"),
            Self::ListedTopics(topics) => {
                for topic in topics {
                    write!(f, "{}  {}  [{}]", topic.id, topic.name, topic.lifecycle_state)?;
                    match &topic.description {
                        Some(description) if !description.is_empty() => writeln!(f, "  {description}")?,
                        _ => writeln!(f)?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Validate arguments, authenticate, then carry out the command.
/// Printing the outcome is left to the caller.
///
/// `connect` is only called once every identifier has passed validation.
pub async fn run<F>(
    args: &Args,
    config: &Config,
    connect: F,
    confirm: &dyn ConfirmProceed,
) -> Result<CliOutcome, RunError>
where
    F: FnOnce(&Config) -> Result<CloudHandle, AuthError>,
{
    let command = Command::from_args(args)?;
    let service = ProvisioningService::new(connect(config)?);

    match command {
        Command::Provision(request) => Ok(CliOutcome::Provisioned(service.run(&request, confirm).await?)),
        Command::ListTopics(compartment) => Ok(CliOutcome::ListedTopics(service.list_topics(&compartment).await?)),
    }
}
