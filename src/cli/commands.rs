use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::state::{AppState, GiftEntry};
use crate::app::App;
use crate::config::AppConfig;
use crate::script::{apply_step, parse_steps};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Steps to apply in order: add, remove=<id>, person=<id>:<text>, present=<id>:<text>
    #[arg()]
    pub steps: Vec<String>,
    /// Print the resulting list as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_tui(app: &mut App) -> Result<()> {
    app.run()
}

pub fn replay(config: Arc<AppConfig>, args: ReplayArgs) -> Result<()> {
    let output = run_replay(&config, &args)?;
    print!("{output}");
    Ok(())
}

fn run_replay(config: &AppConfig, args: &ReplayArgs) -> Result<String> {
    let steps = parse_steps(args.steps.as_slice()).context("parsing replay steps")?;
    let mut state = AppState::new(config.editor.max_field_len);
    for step in &steps {
        apply_step(&mut state, step);
    }
    tracing::debug!(steps = steps.len(), gifts = state.len(), "replay finished");

    let entries = state.entries();
    if args.json {
        let mut json = serde_json::to_string(&entries).context("serializing gift list")?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(format_entries(&entries))
    }
}

fn format_entries(entries: &[GiftEntry]) -> String {
    if entries.is_empty() {
        return "No gifts.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            &mut out,
            "#{}  person: {}  present: {}",
            entry.id, entry.person, entry.present
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{run_replay, ReplayArgs};
    use crate::config::AppConfig;

    fn args(steps: &[&str], json: bool) -> ReplayArgs {
        ReplayArgs {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            json,
        }
    }

    #[test]
    fn replay_without_steps_prints_empty_list() -> Result<()> {
        let output = run_replay(&AppConfig::default(), &args(&[], false))?;
        assert_eq!(output, "No gifts.\n");
        Ok(())
    }

    #[test]
    fn replay_prints_each_gift() -> Result<()> {
        let output = run_replay(
            &AppConfig::default(),
            &args(
                &[
                    "add",
                    "add",
                    "add",
                    "person=1:Uncle",
                    "present=1:Golf Clubs",
                    "remove=2",
                    "present=3:Scarf",
                ],
                false,
            ),
        )?;
        insta::assert_snapshot!(output.trim_end(), @r###"
        #1  person: Uncle  present: Golf Clubs
        #3  person:   present: Scarf
        "###);
        Ok(())
    }

    #[test]
    fn replay_emits_json() -> Result<()> {
        let output = run_replay(
            &AppConfig::default(),
            &args(&["add", "person=1:Aunt", "add"], true),
        )?;
        assert_eq!(
            output,
            "[{\"id\":1,\"person\":\"Aunt\",\"present\":\"\"},{\"id\":2,\"person\":\"\",\"present\":\"\"}]\n"
        );
        Ok(())
    }

    #[test]
    fn replay_rejects_bad_steps() {
        let err = run_replay(&AppConfig::default(), &args(&["add", "explode"], false))
            .expect_err("bad step");
        assert!(format!("{err:#}").contains("unknown step 'explode'"));
    }

    #[test]
    fn ids_restart_after_clearing_the_list() -> Result<()> {
        let output = run_replay(
            &AppConfig::default(),
            &args(&["add", "add", "remove=1", "remove=2", "add"], false),
        )?;
        assert_eq!(output, "#1  person:   present: \n");
        Ok(())
    }
}
