//! Subcommand dispatch
//!
//! Builds the real collaborators from configuration and routes each
//! subcommand to them. Operator-facing reporting of workflow failures
//! (dirty tree details, rerun hazard) happens here; the error itself is
//! returned for the binary to turn into an exit code.

use anyhow::{Context, Result};

use crate::cli::{Cli, Command};
use crate::config::{self, Config};
use crate::domain;
use crate::error::BuildCutError;
use crate::git::{Git2Repository, RepositoryGateway};
use crate::store::{AgvTool, VersionStore};
use crate::tools::{Clipboard, NoClipboard, PlistBuddy, SystemClipboard};
use crate::ui;
use crate::workflow::{BuildCutWorkflow, BuildPreview};

/// Run the parsed command line
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref()).context("loading configuration")?;
    let store = AgvTool::new(&config.tools.agvtool);

    match cli.command {
        Command::GetMarketingVersion => println!("{}", store.marketing_version()?),
        Command::SetMarketingVersion { version, verbose } => {
            print_verbose(verbose, &store.set_marketing_version(&version)?)
        }
        Command::GetBuildNumber => println!("{}", store.build_number()?),
        Command::SetBuildNumber { version, verbose } => {
            print_verbose(verbose, &store.set_build_number(&version)?)
        }
        Command::BumpBuildNumber { verbose } => {
            print_verbose(verbose, &store.bump_build_number()?)
        }
        Command::GetFullVersion => println!("{}", store.version()?),
        Command::MakeBuild { prev_tag, dry_run } => {
            let repo = open_repository()?;
            make_build(&config, &store, &repo, prev_tag, dry_run)?
        }
        Command::PushTag { tag, remote, force } => {
            let repo = open_repository()?;
            let remote = remote.unwrap_or_else(|| config.remote.name.clone());
            push_tag(&store, &repo, tag, &remote, force)?
        }
    }

    Ok(())
}

fn open_repository() -> Result<Git2Repository> {
    Git2Repository::open(".").context("opening git repository")
}

fn print_verbose(verbose: bool, output: &str) {
    if verbose && !output.is_empty() {
        println!("{}", output);
    }
}

/// Run (or preview) a build cut with the real side-effect tools.
pub fn make_build(
    config: &Config,
    store: &dyn VersionStore,
    repo: &dyn RepositoryGateway,
    prev_tag: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let plist = PlistBuddy::new(&config.tools.plist_buddy);
    let clipboard: Box<dyn Clipboard> = if config.release_notes.copy_to_clipboard {
        Box::new(SystemClipboard)
    } else {
        Box::new(NoClipboard)
    };

    let workflow = BuildCutWorkflow::new(
        store,
        repo,
        &plist,
        clipboard.as_ref(),
        config.build_settings(),
    );

    // The default is taken before the bump: it names the tag of the build
    // that is current right now.
    let prev_tag = prev_tag.or_else(|| workflow.default_previous_tag());

    if dry_run {
        let preview = workflow
            .preview(prev_tag.as_deref())
            .map_err(report_failure)?;
        display_preview(&preview);
        return Ok(());
    }

    let outcome = workflow.run(prev_tag.as_deref()).map_err(report_failure)?;
    ui::display_build_summary(&outcome);
    ui::display_manual_push_instruction(&outcome.tag.name, &config.remote.name);
    Ok(())
}

/// Publish a release tag; the operator confirms unless `force` is set.
pub fn push_tag(
    store: &dyn VersionStore,
    repo: &dyn RepositoryGateway,
    tag: Option<String>,
    remote: &str,
    force: bool,
) -> Result<()> {
    let name = match tag {
        Some(name) => name,
        None => domain::tag_name_for(&store.canonical_version()?),
    };

    let handle = repo
        .find_tag(&name)?
        .ok_or_else(|| BuildCutError::UnknownRevision(name.clone()))?;

    if !force && !ui::confirm_push_tag(&handle.name, remote)? {
        println!("Push cancelled by user.");
        return Ok(());
    }

    ui::display_status(&format!("Pushing tag {} to {}", handle.name, remote));
    repo.push_tag(&handle, remote)?;
    ui::display_success(&format!("Pushed tag {} to {}", handle.name, remote));
    Ok(())
}

fn report_failure(err: BuildCutError) -> BuildCutError {
    match &err {
        BuildCutError::DirtyWorkingTree(status) => ui::display_dirty_tree("start", status),
        BuildCutError::Halted { stage, .. } if stage.build_number_advanced() => {
            ui::display_rerun_hazard()
        }
        _ => {}
    }
    err
}

fn display_preview(preview: &BuildPreview) {
    ui::display_status("Dry run:");
    ui::display_success(&format!(
        "  Step 1: bump build number (currently {})",
        preview.current_version
    ));
    match &preview.settings_plist {
        Some(path) => ui::display_success(&format!(
            "  Step 2: write the new version into {}",
            path.display()
        )),
        None => ui::display_success("  Step 2: skip settings plist (not configured)"),
    }
    ui::display_success(&format!(
        "  Step 3: write release notes with {} commit(s) since {}",
        preview.commits.len(),
        preview.previous_tag.as_deref().unwrap_or("the beginning")
    ));
    ui::display_success("  Step 4: stage the notes, commit all changes, create annotated tag");
    for commit in &preview.commits {
        println!("    * `{}` {}", commit.short_hash, commit.subject);
    }
}
