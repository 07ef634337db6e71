use std::path::PathBuf;

use outreach_core::{MessageKind, Msg, TabEvent};

/// One line typed into the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Dispatch(Msg),
    /// Resume text lives in a file; the panel reads it before submitting.
    Setup { resume_path: PathBuf, api_key: String },
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  open <url>                  switch to a tab showing <url>
  load <url>                  the active tab finished loading <url>
  blank                       switch to a tab without a page
  setup <resume-file> <key>   save your resume and API key
  reset                       start over
  referral | meeting | connect  draft a message
  regenerate                  draft again
  copy                        copy the draft to the clipboard
  jobs                        open LinkedIn jobs in the browser
  show                        redraw the panel
  quit";

pub fn parse_command(line: &str) -> Result<PanelCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("open", [url]) => PanelCommand::Dispatch(Msg::Tab(TabEvent::Activated {
            url: Some((*url).to_string()),
        })),
        ("load", [url]) => PanelCommand::Dispatch(Msg::Tab(TabEvent::NavigationComplete {
            url: Some((*url).to_string()),
        })),
        ("blank", []) => PanelCommand::Dispatch(Msg::Tab(TabEvent::Activated { url: None })),
        ("setup", [path, key]) => PanelCommand::Setup {
            resume_path: PathBuf::from(path),
            api_key: (*key).to_string(),
        },
        ("reset", []) => PanelCommand::Dispatch(Msg::ResetClicked),
        ("regenerate", []) => PanelCommand::Dispatch(Msg::RegenerateClicked),
        ("copy", []) => PanelCommand::Dispatch(Msg::CopyClicked),
        ("jobs", []) => PanelCommand::Dispatch(Msg::OpenJobsClicked),
        ("show", []) => PanelCommand::Show,
        ("help", []) => PanelCommand::Help,
        ("quit" | "exit", []) => PanelCommand::Quit,
        (word, []) => match MessageKind::from_label(word) {
            Some(kind) => PanelCommand::Dispatch(Msg::GenerateClicked(kind)),
            None => return Err(format!("unknown command `{word}`")),
        },
        (word, _) => return Err(format!("wrong arguments for `{word}`")),
    };
    Ok(command)
}
